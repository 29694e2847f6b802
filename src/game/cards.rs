use super::globals::*;
use super::payment::Payee;
use super::state::State;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// How a card changes the rent of the property it sends the player to.
pub enum RentModifier {
    None,
    /// Pay the owner twice the rent (nearest railroad).
    DoubleRent,
    /// Pay the owner ten times a dice throw (nearest utility).
    TenTimesDice,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// What the turn does after a card has been resolved.
pub enum CardOutcome {
    /// Carry on with the cell the player is now on.
    Continue(RentModifier),
    /// The player went to jail, so the turn is over.
    EndTurn,
}

impl State {
    /// Draw a card from the specified deck and apply it to the player.
    pub fn handle_card(&mut self, me: usize, kind: DeckKind) -> CardOutcome {
        let card = self.board.deck_mut(kind).draw();
        let deck_name = match kind {
            DeckKind::Chance => "Chance",
            DeckKind::CommunityChest => "Community Chest",
        };
        self.log.add(
            2,
            format!("{} drew {} card: '{}'", self.players[me], deck_name, card),
        );

        match card.effect {
            /*********        MOVING        *********/
            CardEffect::MoveTo(position) => self.advance_to(me, position),

            CardEffect::MoveBack(steps) => {
                let position = (self.players[me].position + BOARD_SIZE - steps) % BOARD_SIZE;
                self.players[me].position = position;
                self.log.add(
                    2,
                    format!("{} goes to {}", self.players[me], self.board.name(position)),
                );
            }

            CardEffect::NearestRailroad => {
                let position = self.nearest(me, &RAILROAD_POSITIONS);
                self.advance_to(me, position);
                return CardOutcome::Continue(RentModifier::DoubleRent);
            }

            CardEffect::NearestUtility => {
                let position = self.nearest(me, &UTILITY_POSITIONS);
                self.advance_to(me, position);
                return CardOutcome::Continue(RentModifier::TenTimesDice);
            }

            /*********        JAIL        *********/
            CardEffect::GetOutOfJailFree => {
                self.log.add(
                    2,
                    format!("{} now has a 'Get Out of Jail Free' card", self.players[me]),
                );
                if !self.board.deck_mut(kind).remove(&card) {
                    panic!("State::handle_card() - drawn card '{}' is not in its deck", card);
                }
                self.players[me].jail_free_cards.push(kind);
            }

            CardEffect::GoToJail => {
                let reason = format!("got GTJ {} card", deck_name);
                self.send_to_jail(me, &reason);
                return CardOutcome::EndTurn;
            }

            /*********        MONEY        *********/
            CardEffect::Collect(amount) => {
                self.players[me].money += amount;
                self.log.add(2, format!("{} gets ${}", self.players[me], amount));
            }

            CardEffect::Pay(amount) => {
                self.pay(me, amount, Payee::Bank);
                if !self.players[me].is_bankrupt {
                    self.log.add(2, format!("{} pays ${}", self.players[me], amount));
                }
            }

            CardEffect::Repairs {
                per_house,
                per_hotel,
            } => {
                let (houses, hotels) = self.players[me].improvement_counts(&self.board);
                let repair_cost = houses * per_house + hotels * per_hotel;
                self.log.add(2, format!("Repair cost: ${}", repair_cost));
                self.pay(me, repair_cost, Payee::Bank);
            }

            CardEffect::PayEachPlayer(amount) => {
                for other in self.other_players(me) {
                    self.pay(me, amount, Payee::Player(other));
                    if self.players[me].is_bankrupt {
                        break;
                    }
                    self.log.add(
                        2,
                        format!("{} pays {} ${}", self.players[me], self.players[other], amount),
                    );
                }
            }

            CardEffect::CollectFromEachPlayer(amount) => {
                for other in self.other_players(me) {
                    self.pay(other, amount, Payee::Player(me));
                    if !self.players[other].is_bankrupt {
                        self.log.add(
                            2,
                            format!("{} pays {} ${}", self.players[other], self.players[me], amount),
                        );
                    }
                }
            }
        }

        CardOutcome::Continue(RentModifier::None)
    }

    /// The first of `positions` going forward from the player's position.
    fn nearest(&self, me: usize, positions: &std::collections::HashSet<usize>) -> usize {
        let start = self.players[me].position;

        match (1..=BOARD_SIZE)
            .map(|step| (start + step) % BOARD_SIZE)
            .find(|position| positions.contains(position))
        {
            Some(position) => position,
            None => unreachable!("State::nearest() - no matching position on the board"),
        }
    }
}
