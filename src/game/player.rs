use std::collections::HashSet;
use std::fmt;

use super::board::Board;
use super::globals::DeckKind;
use crate::config::PlayerSettings;

#[derive(Clone, Debug)]
/// A player playing the game.
pub struct Player {
    pub name: String,
    /// How the player makes decisions.
    pub settings: PlayerSettings,
    /// The amount of money the player has. Only negative in the
    /// middle of paying a debt.
    pub money: i64,
    /// The player's position around the board. 'Go' is at 0
    /// and 'Boardwalk' (the last cell going clockwise) is at 39.
    pub position: usize,
    /// Whether the player is currently in jail.
    pub in_jail: bool,
    /// The number of consecutive doubles the player has rolled.
    pub doubles_rolled: u8,
    /// The number of turns the player has spent in jail so far.
    pub days_in_jail: u8,
    /// The decks of the "Get Out of Jail Free" cards the player holds.
    pub jail_free_cards: Vec<DeckKind>,
    /// Positions of the properties the player owns.
    pub owned: Vec<usize>,
    /// Properties the player is willing to give away in a trade.
    pub wants_to_sell: HashSet<usize>,
    /// Properties of other players that this player wants to trade for.
    pub wants_to_buy: HashSet<usize>,
    /// Whether the player is out of the game.
    pub is_bankrupt: bool,
}

impl Player {
    /// Create a new player at 'Go'.
    pub fn new(name: &str, settings: PlayerSettings, money: i64) -> Player {
        Player {
            name: name.to_owned(),
            settings,
            money,
            position: 0,
            in_jail: false,
            doubles_rolled: 0,
            days_in_jail: 0,
            jail_free_cards: vec![],
            owned: vec![],
            wants_to_sell: HashSet::new(),
            wants_to_buy: HashSet::new(),
            is_bankrupt: false,
        }
    }

    /// The player's cash plus the value of their properties and improvements.
    ///
    /// With `count_mortgaged_as_full_value` (used for income tax), mortgaged
    /// properties count for their full price. Otherwise they only count for
    /// what's left after paying off the mortgage.
    pub fn net_worth(
        &self,
        board: &Board,
        mortgage_value: f64,
        count_mortgaged_as_full_value: bool,
    ) -> i64 {
        let mut net_worth = self.money;

        for &position in &self.owned {
            let property = board.property(position);

            if property.is_mortgaged && !count_mortgaged_as_full_value {
                net_worth += (property.cost_base as f64 * (1.0 - mortgage_value)) as i64;
            } else {
                net_worth += property.cost_base;
                // A hotel counts for the price of one house, like a house does
                let improvements = property.houses as i64 + property.has_hotel as i64;
                net_worth += improvements * property.cost_house;
            }
        }

        net_worth
    }

    /// The number of houses and hotels the player owns, as `(houses, hotels)`.
    pub fn improvement_counts(&self, board: &Board) -> (i64, i64) {
        self.owned.iter().fold((0, 0), |(houses, hotels), &position| {
            let property = board.property(position);
            (
                houses + property.houses as i64,
                hotels + property.has_hotel as i64,
            )
        })
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameSettings;

    #[test]
    fn net_worth_counts_properties_and_improvements() {
        let mut board = Board::new(&GameSettings::default());
        let mut player = Player::new("Hero", PlayerSettings::default(), 100);

        for &position in &[1, 3, 5] {
            board.set_owner(position, Some(0));
            player.owned.push(position);
        }
        board.build(1);
        board.property_mut(5).is_mortgaged = true;

        // 100 + (60 + 50) + 60 + 200 * 0.5
        assert_eq!(player.net_worth(&board, 0.5, false), 370);
        // 100 + (60 + 50) + 60 + 200
        assert_eq!(player.net_worth(&board, 0.5, true), 470);
        assert_eq!(player.improvement_counts(&board), (1, 0));
    }

    #[test]
    fn hotel_counts_for_one_house_price() {
        let mut board = Board::new(&GameSettings::default());
        let mut player = Player::new("Hero", PlayerSettings::default(), 100);

        for &position in &[1, 3] {
            board.set_owner(position, Some(0));
            player.owned.push(position);
        }
        for _ in 0..5 {
            board.build(1);
        }

        // 100 + (60 + 50) + 60
        assert_eq!(player.net_worth(&board, 0.5, false), 270);
        assert_eq!(player.improvement_counts(&board), (0, 1));
    }
}
