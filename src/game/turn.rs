use super::cards::{CardOutcome, RentModifier};
use super::globals::*;
use super::payment::Payee;
use super::state::State;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// How a player's move ended.
pub enum TurnResult {
    /// The player rolled a double and moves again.
    RollAgain,
    /// The player's turn is over.
    Ended,
    /// The player is (or went) bankrupt.
    Bankrupt,
}

impl State {
    /*********        PUBLIC INTERFACES        *********/

    /// Make one move for the player: actions before rolling the dice, the
    /// roll itself, moving and whatever happens on the cell the player
    /// lands on. A double doesn't move the player again here; it returns
    /// `TurnResult::RollAgain` and the game loop calls this again.
    pub fn make_a_move(&mut self, me: usize) -> TurnResult {
        if self.players[me].is_bankrupt {
            return TurnResult::Bankrupt;
        }

        let position = self.players[me].position;
        self.log.add(
            1,
            format!(
                "=== {} (${}, at {}) goes: ===",
                self.players[me],
                self.players[me].money,
                self.board.name(position)
            ),
        );

        // Before throwing the dice: trade, unmortgage and improve
        while self.do_a_two_way_trade(me) {}
        while self.unmortgage_a_property(me) {}
        self.improve_properties(me);

        let roll = self.dice.roll();
        self.log.add(2, format!("{}", roll));

        // Third double in a row: straight to jail, without moving
        if roll.is_double && self.players[me].doubles_rolled == 2 {
            self.send_to_jail(me, "rolled 3 doubles in a row");
            return TurnResult::Ended;
        }

        if self.players[me].in_jail && self.stays_in_jail(me, roll.is_double) {
            return TurnResult::Ended;
        }

        // The fine for leaving jail may have been too much
        if self.players[me].is_bankrupt {
            return TurnResult::Bankrupt;
        }

        // Move, collecting the salary when passing 'Go'
        let new_position = self.players[me].position + roll.sum;
        if new_position >= BOARD_SIZE {
            self.handle_salary(me);
        }
        self.players[me].position = new_position % BOARD_SIZE;
        self.log.add(
            2,
            format!(
                "{} goes to: {}",
                self.players[me],
                self.board.name(self.players[me].position)
            ),
        );

        if let Some(result) = self.resolve_landing(me) {
            return result;
        }

        if self.players[me].is_bankrupt {
            return TurnResult::Bankrupt;
        }

        if roll.is_double {
            self.players[me].doubles_rolled += 1;
            self.log.add(
                2,
                format!(
                    "{} rolled a double ({} in a row) so they go again.",
                    self.players[me], self.players[me].doubles_rolled
                ),
            );
            return TurnResult::RollAgain;
        }

        self.players[me].doubles_rolled = 0;
        TurnResult::Ended
    }

    /*********        JAIL        *********/

    /// Decide whether a player in jail gets out. Return `true` if they stay,
    /// which ends their turn.
    fn stays_in_jail(&mut self, me: usize, rolled_double: bool) -> bool {
        if let Some(kind) = self.players[me].jail_free_cards.pop() {
            self.log.add(2, format!("{} uses a GOOJF card", self.players[me]));
            self.return_jail_free_card(kind);
        } else if rolled_double {
            self.log.add(
                2,
                format!("{} rolled a double and leaves jail for free", self.players[me]),
            );
        } else if self.players[me].days_in_jail == 2 {
            // It's the third day
            let fine = self.rules.exit_jail_fine;
            self.log.add(
                2,
                format!(
                    "{} did not roll a double for the third time, pays ${} and leaves jail",
                    self.players[me], fine
                ),
            );
            self.pay(me, fine, Payee::Bank);
        } else {
            self.log.add(2, format!("{} stays in jail", self.players[me]));
            self.players[me].days_in_jail += 1;
            return true;
        }

        self.players[me].in_jail = false;
        self.players[me].days_in_jail = 0;
        false
    }

    /*********        LANDING        *********/

    /// Apply the effects of the cell the player landed on. Cards come
    /// first since they can send the player elsewhere: Chance before
    /// Community Chest, as Chance can send the player to Community Chest.
    /// Return the end of the turn if the move stops here.
    fn resolve_landing(&mut self, me: usize) -> Option<TurnResult> {
        let mut rent_modifier = RentModifier::None;

        for deck in [DeckKind::Chance, DeckKind::CommunityChest] {
            let position = self.players[me].position;
            let draws_from_deck = matches!(
                (&self.board.cells[position].kind, deck),
                (CellKind::Chance, DeckKind::Chance)
                    | (CellKind::CommunityChest, DeckKind::CommunityChest)
            );
            if !draws_from_deck {
                continue;
            }

            match self.handle_card(me, deck) {
                CardOutcome::EndTurn => return Some(TurnResult::Ended),
                CardOutcome::Continue(modifier) => rent_modifier = modifier,
            }
            if self.players[me].is_bankrupt {
                return Some(TurnResult::Bankrupt);
            }
        }

        let position = self.players[me].position;
        match self.board.cells[position].kind {
            CellKind::GoToJail => {
                self.send_to_jail(me, "landed on Go To Jail");
                return Some(TurnResult::Ended);
            }
            CellKind::Property(_) => self.handle_landing_on_property(me, rent_modifier),
            CellKind::FreeParking => {
                if self.rules.free_parking_money {
                    let jackpot = std::mem::take(&mut self.board.free_parking_money);
                    self.players[me].money += jackpot;
                    self.log.add(
                        2,
                        format!("{} gets ${} from Free Parking", self.players[me], jackpot),
                    );
                }
            }
            CellKind::Tax(TaxRule::Fixed) => {
                let tax = self.rules.luxury_tax;
                self.pay(me, tax, Payee::Bank);
                if !self.players[me].is_bankrupt {
                    self.log.add(2, format!("{} pays Luxury Tax ${}", self.players[me], tax));
                }
            }
            CellKind::Tax(TaxRule::FixedOrPercent) => self.handle_income_tax(me),
            CellKind::Plain | CellKind::Chance | CellKind::CommunityChest => (),
        }

        None
    }

    /// Pay the smaller of the fixed income tax and a share of the player's
    /// net worth (counting mortgaged properties at full value).
    fn handle_income_tax(&mut self, me: usize) {
        let net_worth = self.players[me].net_worth(&self.board, self.rules.mortgage_value, true);
        let percent_tax = (self.rules.income_tax_percentage * net_worth as f64) as i64;
        let tax = self.rules.income_tax.min(percent_tax);

        if tax == self.rules.income_tax {
            self.log.add(
                2,
                format!("{} pays fixed Income tax ${}", self.players[me], tax),
            );
        } else {
            self.log.add(
                2,
                format!(
                    "{} pays {:.0}% Income tax ${}",
                    self.players[me],
                    self.rules.income_tax_percentage * 100.0,
                    tax
                ),
            );
        }
        self.pay(me, tax, Payee::Bank);
    }

    /*********        PROPERTIES        *********/

    /// Landing on a property: buy it, auction it, or pay rent.
    fn handle_landing_on_property(&mut self, me: usize, rent_modifier: RentModifier) {
        let position = self.players[me].position;
        let property = self.board.property(position);
        let (owner, is_mortgaged, cost_base) =
            (property.owner, property.is_mortgaged, property.cost_base);

        let owner = match owner {
            Some(owner) => owner,
            None => {
                if self.is_willing_to_buy(me, position, cost_base) {
                    self.buy_property(me, position, cost_base);
                } else {
                    self.log.add(
                        2,
                        format!(
                            "{} landed on {}, refuses to buy it",
                            self.players[me],
                            self.board.name(position)
                        ),
                    );
                    if self.rules.auction_refused_properties {
                        self.auction(me, position);
                    }
                }
                return;
            }
        };

        if is_mortgaged {
            self.log.add(2, "Property is mortgaged, no rent");
            return;
        }
        if owner == me {
            self.log.add(2, "Own property, no rent");
            return;
        }

        self.log.add(
            2,
            format!(
                "{} landed on a property, owned by {}",
                self.players[me], self.players[owner]
            ),
        );

        let mut rent = self.board.rent(position, &mut self.dice, &mut self.log);
        match rent_modifier {
            RentModifier::None => (),
            RentModifier::DoubleRent => {
                rent *= 2;
                self.log.add(2, format!("Per Chance card, rent is doubled (${}).", rent));
            }
            RentModifier::TenTimesDice => {
                // Undo the utility multiplier to get the dice throw back
                rent = rent / self.board.property(position).monopoly_multiplier * 10;
                self.log.add(
                    2,
                    format!("Per Chance card, rent is 10x dice throw (${}).", rent),
                );
            }
        }

        self.pay(me, rent, Payee::Player(owner));
        if !self.players[me].is_bankrupt {
            self.log.add(
                2,
                format!("{} pays {} rent ${}", self.players[me], self.players[owner], rent),
            );
        }
    }

    /// Whether the player wants to pay `price` for the unowned property at `position`.
    fn is_willing_to_buy(&self, me: usize, position: usize, price: i64) -> bool {
        let player = &self.players[me];
        let group = self.board.property(position).group;

        player.money - price >= player.settings.unspendable_cash
            && price <= player.money
            && !player.settings.ignore_property_groups.contains(&group)
    }

    fn buy_property(&mut self, me: usize, position: usize, price: i64) {
        self.players[me].money -= price;
        self.transfer_property(position, Some(me));
        self.log.add(
            2,
            format!(
                "{} bought {} for ${}",
                self.players[me],
                self.board.name(position),
                price
            ),
        );

        // Everyone's trade lists may change with the new owner
        self.update_all_trade_lists();
    }

    /// Auction a property the player refused to buy.
    ///
    /// Bidding starts at $10 and goes up by $5 while more than one player is
    /// still in. Players bid up to the price of the property, or twice that
    /// if they already own a property of its group. If everybody drops out
    /// at once, the first of the last round's bidders gets it at that round's price.
    fn auction(&mut self, me: usize, position: usize) {
        let cost_base = self.board.property(position).cost_base;
        let group = self.board.property(position).group;
        let n_players = self.players.len();

        // Bidders in turn order, starting from the player who refused
        let turn_order: Vec<usize> = (me..n_players)
            .chain(0..me)
            .filter(|&i| !self.players[i].is_bankrupt)
            .collect();

        let bids = |state: &State, price: i64| -> Vec<usize> {
            turn_order
                .iter()
                .copied()
                .filter(|&i| {
                    let player = &state.players[i];
                    let owns_group_member = player
                        .owned
                        .iter()
                        .any(|&p| state.board.property(p).group == group);
                    let limit = if owns_group_member { cost_base * 2 } else { cost_base };

                    price <= limit && state.is_willing_to_buy(i, position, price)
                })
                .collect()
        };

        let mut price = 10;
        let mut bidders = bids(self, price);
        if bidders.is_empty() {
            self.log.add(3, "Property for auction, but nobody wanted it");
            return;
        }

        while bidders.len() > 1 {
            let next_bidders = bids(self, price + 5);
            if next_bidders.is_empty() {
                break;
            }
            price += 5;
            bidders = next_bidders;
        }

        let winner = bidders[0];
        self.log.add(
            3,
            format!(
                "{} wins the auction for {} at ${}",
                self.players[winner],
                self.board.name(position),
                price
            ),
        );
        self.buy_property(winner, position, price);
    }
}
