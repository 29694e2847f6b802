use std::fmt;

use super::globals::{DeckKind, CHANCE_CARDS, COMMUNITY_CHEST_CARDS};
use super::state::State;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Who receives a payment.
pub enum Payee {
    Bank,
    /// The player at this index.
    Player(usize),
}

/// A payee with the players' names at hand, for logging.
struct PayeeName<'a>(Payee, &'a State);

impl fmt::Display for PayeeName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Payee::Bank => write!(f, "the bank"),
            Payee::Player(i) => write!(f, "{}", self.1.players[i]),
        }
    }
}

impl State {
    /*********        PAYMENTS        *********/

    /// Make a player pay `amount` to `payee`. This is where bankruptcy is triggered.
    ///
    /// If the player doesn't have the cash, they sell houses and mortgage
    /// properties until they do. If even that isn't enough, they go bankrupt
    /// and everything they have goes to the payee.
    pub fn pay(&mut self, payer: usize, amount: i64, payee: Payee) {
        // Regular transaction
        if amount <= self.players[payer].money {
            self.players[payer].money -= amount;
            self.credit(payee, amount);
            return;
        }

        let max_raisable = self.max_raisable_money(payer);

        // Can pay, but needs to sell some things first
        if max_raisable >= amount {
            self.log.add(
                2,
                format!(
                    "{} has ${}, they can pay ${}, but need to mortgage/sell some things for that",
                    self.players[payer], self.players[payer].money, amount
                ),
            );
            self.raise_money(payer, amount);

            self.players[payer].money -= amount;
            self.credit(payee, amount);
            return;
        }

        // Bankruptcy (can't pay even after selling and mortgaging everything)
        self.log.add(
            2,
            format!(
                "{} has to pay ${}, max they can raise is ${}",
                self.players[payer], amount, max_raisable
            ),
        );
        self.go_bankrupt(payer, amount, payee);
    }

    /// Give money to a payee. Money paid to the bank goes to
    /// 'Free Parking' if the free parking house rule is on.
    fn credit(&mut self, payee: Payee, amount: i64) {
        match payee {
            Payee::Player(i) => self.players[i].money += amount,
            Payee::Bank if self.rules.free_parking_money => {
                self.board.free_parking_money += amount
            }
            Payee::Bank => (),
        }
    }

    /// How much cash a player could produce by selling every improvement
    /// and mortgaging every property. Used to decide on bankruptcy.
    pub fn max_raisable_money(&self, index: usize) -> i64 {
        let player = &self.players[index];
        let mut max_raisable = player.money;

        for &position in &player.owned {
            let property = self.board.property(position);

            max_raisable += property.cost_house * property.improvement_level() as i64 / 2;
            if !property.is_mortgaged {
                max_raisable += self.mortgage_price(position);
            }
        }

        max_raisable
    }

    /*********        LIQUIDATION        *********/

    /// Sell houses and hotels, then mortgage properties, until
    /// the player has `required_amount` in cash (or nothing is left).
    pub fn raise_money(&mut self, index: usize, required_amount: i64) {
        // Sell improvements until all are sold or enough money is raised
        loop {
            let money_to_raise = required_amount - self.players[index].money;
            if money_to_raise <= 0 {
                break;
            }

            let position = match self.next_property_to_downgrade(index, money_to_raise) {
                Some(p) => p,
                None => break,
            };

            let had_hotel = self.board.property(position).has_hotel;
            let raised = self.board.sell_improvement(position);
            self.players[index].money += raised;

            let property = self.board.property(position);
            let line = if had_hotel && property.houses == 0 {
                format!(
                    "{} sells a hotel and all houses on {}, raising ${}",
                    self.players[index],
                    self.board.name(position),
                    raised
                )
            } else if had_hotel {
                format!(
                    "{} sells a hotel on {}, raising ${}",
                    self.players[index],
                    self.board.name(position),
                    raised
                )
            } else {
                format!(
                    "{} sells a house on {} ({} left), raising ${}",
                    self.players[index],
                    self.board.name(position),
                    property.houses,
                    raised
                )
            };
            self.log.add(3, line);
        }

        // Mortgage properties, most valuable first
        let mut to_mortgage: Vec<usize> = self.players[index]
            .owned
            .iter()
            .copied()
            .filter(|&p| {
                let property = self.board.property(p);
                !property.is_mortgaged && !property.is_improved()
            })
            .collect();
        to_mortgage.sort_by_key(|&p| self.mortgage_price(p));

        while self.players[index].money < required_amount {
            let position = match to_mortgage.pop() {
                Some(p) => p,
                None => break,
            };

            let mortgage_price = self.mortgage_price(position);
            self.board.property_mut(position).is_mortgaged = true;
            self.players[index].money += mortgage_price;

            self.log.add(
                3,
                format!(
                    "{} mortgages {}, raising ${}",
                    self.players[index],
                    self.board.name(position),
                    mortgage_price
                ),
            );
        }
    }

    /// Pick the property to sell a house or hotel from next.
    ///
    /// Only properties with the most improvements in their group can be
    /// downgraded. Houses are sold before hotels. Of those, pick the cheapest
    /// one that raises at least `money_to_raise`, or the most expensive one.
    fn next_property_to_downgrade(&self, index: usize, money_to_raise: i64) -> Option<usize> {
        let mut candidates: Vec<usize> = self.players[index]
            .owned
            .iter()
            .copied()
            .filter(|&position| {
                let property = self.board.property(position);
                property.is_improved()
                    && self
                        .board
                        .group_members(property.group)
                        .iter()
                        .all(|&other| {
                            self.board.property(other).improvement_level()
                                <= property.improvement_level()
                        })
            })
            .collect();

        if candidates.is_empty() {
            return None;
        }

        // Selling a hotel is a last resort
        if candidates
            .iter()
            .any(|&p| !self.board.property(p).has_hotel)
        {
            candidates.retain(|&p| !self.board.property(p).has_hotel);
        }

        // Sort potential downgrades from cheap to expensive
        candidates.sort_by_key(|&p| self.board.property(p).cost_house / 2);

        // Drop the most expensive option while the next one still covers the debt
        while candidates.len() > 1 {
            let second = candidates[candidates.len() - 2];
            if self.board.property(second).cost_house / 2 < money_to_raise {
                break;
            }
            candidates.pop();
        }

        candidates.last().copied()
    }

    /*********        BANKRUPTCY        *********/

    /// Take a player out of the game. Everything they can sell is sold, all
    /// their cash goes to the payee, and so do their properties.
    fn go_bankrupt(&mut self, index: usize, amount: i64, payee: Payee) {
        self.players[index].is_bankrupt = true;
        self.log.add(2, format!("{} is bankrupt", self.players[index]));

        // Raise as much cash as possible to give to the payee
        self.raise_money(index, amount);

        let remaining = self.players[index].money.max(0);
        let line = format!(
            "{} gave {} all their remaining money (${})",
            self.players[index],
            PayeeName(payee, self),
            remaining
        );
        self.log.add(2, line);
        self.credit(payee, remaining);
        self.players[index].money = 0;

        // Jail-free cards go back into their decks
        let cards = std::mem::take(&mut self.players[index].jail_free_cards);
        for kind in cards {
            self.return_jail_free_card(kind);
        }

        // Transfer every property (mortgaged at this point) to the payee
        while let Some(&position) = self.players[index].owned.last() {
            match payee {
                Payee::Player(to) => self.transfer_property(position, Some(to)),
                Payee::Bank => {
                    self.transfer_property(position, None);
                    self.board.property_mut(position).is_mortgaged = false;
                }
            }

            let line = format!(
                "{} transfers {} to {}",
                self.players[index],
                self.board.name(position),
                PayeeName(payee, self)
            );
            self.log.add(3, line);
        }

        // Nobody can trade with a bankrupt player any more
        self.players[index].wants_to_sell.clear();
        self.players[index].wants_to_buy.clear();
        self.update_all_trade_lists();
    }

    /// Put a "Get Out of Jail Free" card back into its deck.
    pub fn return_jail_free_card(&mut self, kind: DeckKind) {
        let deck_cards = match kind {
            DeckKind::Chance => CHANCE_CARDS.as_slice(),
            DeckKind::CommunityChest => COMMUNITY_CHEST_CARDS.as_slice(),
        };

        match deck_cards.iter().find(|c| c.is_jail_free()) {
            Some(&card) => self.board.deck_mut(kind).add(card),
            None => panic!("State::return_jail_free_card() - {:?} has no jail-free card", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::game::payment::Payee;
    use crate::game::state::tests::state_with;

    #[test]
    fn mortgages_to_pay_rent() {
        let mut state = state_with(&[50, 1500]);
        state.assign_property(0, 5);

        state.pay(0, 100, Payee::Player(1));

        assert!(!state.players[0].is_bankrupt);
        assert_eq!(state.players[0].money, 50);
        assert_eq!(state.players[1].money, 1600);
        assert!(state.board.property(5).is_mortgaged);
    }

    #[test]
    fn paying_exactly_all_cash_is_not_bankruptcy() {
        let mut state = state_with(&[100, 0]);

        state.pay(0, 100, Payee::Bank);

        assert!(!state.players[0].is_bankrupt);
        assert_eq!(state.players[0].money, 0);
    }

    #[test]
    fn sells_houses_before_mortgaging() {
        let mut state = state_with(&[0, 0]);
        for &position in &[37, 39] {
            state.assign_property(0, position);
        }
        state.board.build(37);
        state.board.build(39);

        // Each house sells for $100
        state.pay(0, 150, Payee::Bank);

        assert!(!state.players[0].is_bankrupt);
        assert_eq!(state.players[0].money, 50);
        assert_eq!(state.board.property(37).houses, 0);
        assert_eq!(state.board.property(39).houses, 0);
        assert!(!state.board.property(37).is_mortgaged);
        assert!(!state.board.property(39).is_mortgaged);
        assert_eq!(state.board.available_houses, 32);
    }

    #[test]
    fn sells_houses_before_hotels() {
        let mut state = state_with(&[0, 0]);
        for &position in &[1, 3, 6, 8, 9] {
            state.assign_property(0, position);
        }
        for _ in 0..5 {
            state.board.build(1);
            state.board.build(3);
        }
        for &position in &[6, 8, 9] {
            state.board.build(position);
        }

        // A house on Oriental Avenue sells for $25
        state.pay(0, 20, Payee::Bank);

        assert_eq!(state.players[0].money, 5);
        assert_eq!(state.board.property(6).houses, 0);
        assert_eq!(state.board.property(8).houses, 1);
        assert!(state.board.property(1).has_hotel);
        assert!(state.board.property(3).has_hotel);
    }

    #[test]
    fn hotel_is_torn_down_when_the_bank_lacks_houses() {
        let mut state = state_with(&[0, 0]);
        state.assign_property(0, 1);
        state.assign_property(0, 3);
        for _ in 0..5 {
            state.board.build(1);
            state.board.build(3);
        }
        state.board.available_houses = 2;

        // The whole hotel goes for 5 * $25
        state.pay(0, 100, Payee::Bank);

        assert!(!state.players[0].is_bankrupt);
        assert_eq!(state.players[0].money, 25);
        let torn_down = state.board.property(3);
        assert!(!torn_down.has_hotel);
        assert_eq!(torn_down.houses, 0);
        assert!(state.board.property(1).has_hotel);
        assert_eq!(state.board.available_houses, 2);
        assert_eq!(state.board.available_hotels, 11);
    }

    #[test]
    fn mortgages_the_most_valuable_property_first() {
        let mut state = state_with(&[0, 0]);
        state.assign_property(0, 1);
        state.assign_property(0, 39);

        state.pay(0, 30, Payee::Bank);

        assert!(state.board.property(39).is_mortgaged);
        assert!(!state.board.property(1).is_mortgaged);
        assert_eq!(state.players[0].money, 170);
    }

    #[test]
    fn bankruptcy_hands_everything_to_the_creditor() {
        let mut state = state_with(&[10, 0]);
        state.assign_property(0, 1);
        state.assign_property(0, 3);
        state.board.build(1);
        state.players[0].jail_free_cards.push(crate::game::globals::DeckKind::Chance);
        state.board.chance.remove(&crate::game::globals::CHANCE_CARDS[8]);

        // Max raisable: 10 + 25 (house) + 30 + 30 (mortgages)
        assert_eq!(state.max_raisable_money(0), 95);
        state.pay(0, 500, Payee::Player(1));

        let bankrupt = &state.players[0];
        assert!(bankrupt.is_bankrupt);
        assert_eq!(bankrupt.money, 0);
        assert!(bankrupt.owned.is_empty());
        assert!(bankrupt.jail_free_cards.is_empty());
        assert!(bankrupt.wants_to_buy.is_empty() && bankrupt.wants_to_sell.is_empty());

        assert_eq!(state.players[1].money, 95);
        assert_eq!(state.players[1].owned.len(), 2);
        assert_eq!(state.board.property(1).owner, Some(1));
        assert!(state.board.property(1).is_mortgaged);
        assert_eq!(state.board.property(1).monopoly_multiplier, 2);
        assert_eq!(state.board.chance.len(), 16);
    }

    #[test]
    fn bankruptcy_to_the_bank_frees_the_properties() {
        let mut state = state_with(&[0, 0]);
        state.assign_property(0, 5);

        state.pay(0, 1000, Payee::Bank);

        assert!(state.players[0].is_bankrupt);
        assert_eq!(state.board.property(5).owner, None);
        assert!(!state.board.property(5).is_mortgaged);
    }

    #[test]
    fn bank_payments_feed_free_parking_with_the_house_rule() {
        let mut state = state_with(&[500, 0]);
        state.rules.free_parking_money = true;

        state.pay(0, 100, Payee::Bank);

        assert_eq!(state.board.free_parking_money, 100);
    }
}
