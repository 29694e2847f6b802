use super::state::State;

impl State {
    /*********        MORTGAGES        *********/

    /// The price of lifting the mortgage on the property at `position`:
    /// the mortgage itself plus the bank's fee.
    pub fn unmortgage_price(&self, position: usize) -> i64 {
        let cost_base = self.board.property(position).cost_base as f64;
        (cost_base * (self.rules.mortgage_value + self.rules.mortgage_fee)) as i64
    }

    /// Lift the mortgage on the first mortgaged property the player can afford
    /// without dipping into their unspendable cash. Return whether one was lifted.
    pub fn unmortgage_a_property(&mut self, me: usize) -> bool {
        let player = &self.players[me];
        let found = player.owned.iter().copied().find(|&position| {
            self.board.property(position).is_mortgaged
                && player.money - self.unmortgage_price(position) >= player.settings.unspendable_cash
        });

        let position = match found {
            Some(p) => p,
            None => return false,
        };

        let cost = self.unmortgage_price(position);
        self.players[me].money -= cost;
        self.board.property_mut(position).is_mortgaged = false;

        self.log.add(
            2,
            format!(
                "{} unmortgages {} for ${}",
                self.players[me],
                self.board.name(position),
                cost
            ),
        );

        true
    }

    /*********        HOUSES AND HOTELS        *********/

    /// Keep building houses and hotels, cheapest first, while there
    /// is money to spend and something to build on.
    pub fn improve_properties(&mut self, me: usize) {
        while let Some(position) = self.next_property_to_improve(me) {
            let cost = self.board.property(position).cost_house;

            // Don't spend the unspendable cash
            if self.players[me].money - cost < self.players[me].settings.unspendable_cash {
                break;
            }

            let level = self.board.build(position);
            self.players[me].money -= cost;

            let what = match level {
                1 => "1st house",
                2 => "2nd house",
                3 => "3rd house",
                4 => "4th house",
                _ => "hotel",
            };
            self.log.add(
                2,
                format!(
                    "{} built a {} on {} for ${}",
                    self.players[me],
                    what,
                    self.board.name(position),
                    cost
                ),
            );
        }
    }

    /// The cheapest property the player can build on next, if any.
    ///
    /// A property can be built on if its group is an unmortgaged monopoly,
    /// it doesn't have a hotel yet, no other property of the group has
    /// fewer improvements, and the bank has a house (or hotel) left.
    fn next_property_to_improve(&self, me: usize) -> Option<usize> {
        self.players[me]
            .owned
            .iter()
            .copied()
            .filter(|&position| {
                let property = self.board.property(position);
                let level = property.improvement_level();

                !property.has_hotel
                    && self.board.is_improvable(position)
                    && (self.rules.allow_unequal_development
                        || self
                            .board
                            .group_members(property.group)
                            .iter()
                            .all(|&other| self.board.property(other).improvement_level() >= level))
                    && self.board.has_supply_for(position)
            })
            .min_by_key(|&position| (self.board.property(position).cost_house, position))
    }
}

#[cfg(test)]
mod tests {
    use crate::game::globals::Group;
    use crate::game::state::tests::state_with;
    use proptest::prelude::*;

    #[test]
    fn builds_evenly_while_money_lasts() {
        let mut state = state_with(&[500, 0]);
        state.assign_property(0, 1);
        state.assign_property(0, 3);

        // $50 a house
        state.improve_properties(0);

        // 4 houses and a hotel on each
        assert_eq!(state.players[0].money, 0);
        assert!(state.board.property(1).has_hotel);
        assert!(state.board.property(3).has_hotel);
        assert_eq!(state.board.available_houses, 32);
        assert_eq!(state.board.available_hotels, 10);
    }

    #[test]
    fn unequal_development_builds_on_the_cheapest_first() {
        let mut state = state_with(&[250, 0]);
        state.rules.allow_unequal_development = true;
        state.assign_property(0, 1);
        state.assign_property(0, 3);

        state.improve_properties(0);

        assert_eq!(state.players[0].money, 0);
        assert!(state.board.property(1).has_hotel);
        assert_eq!(state.board.property(3).improvement_level(), 0);
    }

    #[test]
    fn stops_at_the_unspendable_cash() {
        let mut state = state_with(&[1000, 0]);
        state.players[0].settings.unspendable_cash = 880;
        state.assign_property(0, 37);
        state.assign_property(0, 39);

        state.improve_properties(0);

        assert_eq!(state.players[0].money, 1000);
        assert_eq!(state.board.property(37).houses, 0);
    }

    #[test]
    fn needs_an_unmortgaged_monopoly() {
        let mut state = state_with(&[1000, 0]);
        state.assign_property(0, 1);
        state.improve_properties(0);
        assert_eq!(state.board.property(1).houses, 0);

        state.assign_property(0, 3);
        state.board.property_mut(3).is_mortgaged = true;
        state.improve_properties(0);
        assert_eq!(state.board.property(1).houses, 0);
    }

    #[test]
    fn stops_when_the_bank_runs_out_of_houses() {
        let mut state = state_with(&[1000, 0]);
        state.assign_property(0, 1);
        state.assign_property(0, 3);
        state.board.available_houses = 3;

        state.improve_properties(0);

        assert_eq!(state.board.available_houses, 0);
        assert_eq!(state.players[0].money, 850);
    }

    #[test]
    fn unmortgaging_costs_the_fee_too() {
        let mut state = state_with(&[100, 0]);
        state.assign_property(0, 5);
        state.board.property_mut(5).is_mortgaged = true;

        // 200 * (0.5 + 0.1)
        assert_eq!(state.unmortgage_price(5), 120);
        assert!(!state.unmortgage_a_property(0));

        state.players[0].money = 150;
        assert!(state.unmortgage_a_property(0));
        assert_eq!(state.players[0].money, 30);
        assert!(!state.board.property(5).is_mortgaged);
        assert!(!state.unmortgage_a_property(0));
    }

    proptest! {
        #[test]
        fn development_stays_even(money in 0i64..5000) {
            let mut state = state_with(&[money, 0]);
            for &position in &[11, 13, 14] {
                state.assign_property(0, position);
            }

            state.improve_properties(0);

            let levels: Vec<u8> = state
                .board
                .group_members(Group::Pink)
                .iter()
                .map(|&p| state.board.property(p).improvement_level())
                .collect();
            let max = levels.iter().max().copied().unwrap_or(0);
            let min = levels.iter().min().copied().unwrap_or(0);
            prop_assert!(max - min <= 1);
            prop_assert!(state.players[0].money >= 0);
        }
    }
}
