use std::collections::HashMap;

use super::deck::Deck;
use super::dice::Dice;
use super::globals::*;
use super::log::EventLog;
use crate::config::GameSettings;

/// The board of one game: its cells, their ownership and
/// improvements, the card decks and the bank's houses and hotels.
pub struct Board {
    /// All the cells of the board, starting from 'Go'.
    pub cells: Vec<Cell>,
    /// Positions of the properties on the board, sorted by their group.
    /// Positions within a group are in board order.
    pub groups: HashMap<Group, Vec<usize>>,
    pub chance: Deck,
    pub community_chest: Deck,
    /// Houses left in the bank.
    pub available_houses: u32,
    /// Hotels left in the bank.
    pub available_hotels: u32,
    /// Money collected on 'Free Parking' (only with the free parking house rule).
    pub free_parking_money: i64,
}

impl Board {
    /*********        INITIALISATION INTERFACES        *********/

    /// Return a new board, with nothing owned and the decks in printed order.
    pub fn new(settings: &GameSettings) -> Board {
        let cells = CELLS.clone();

        let mut groups: HashMap<Group, Vec<usize>> = HashMap::new();
        for (position, cell) in cells.iter().enumerate() {
            if let CellKind::Property(property) = &cell.kind {
                groups.entry(property.group).or_default().push(position);
            }
        }

        Board {
            cells,
            groups,
            chance: Deck::new(CHANCE_CARDS.clone()),
            community_chest: Deck::new(COMMUNITY_CHEST_CARDS.clone()),
            available_houses: settings.available_houses,
            available_hotels: settings.available_hotels,
            free_parking_money: 0,
        }
    }

    /*********        GETTERS        *********/

    /// The property at `position`, if that cell is a property.
    pub fn try_property(&self, position: usize) -> Option<&Property> {
        match &self.cells[position].kind {
            CellKind::Property(p) => Some(p),
            _ => None,
        }
    }

    /// The property at `position`. Panic if that cell is not a property.
    pub fn property(&self, position: usize) -> &Property {
        match self.try_property(position) {
            Some(p) => p,
            None => panic!("Board::property() - cell {} is not a property", position),
        }
    }

    /// A mutable reference to the property at `position`.
    /// Panic if that cell is not a property.
    pub fn property_mut(&mut self, position: usize) -> &mut Property {
        match &mut self.cells[position].kind {
            CellKind::Property(p) => p,
            _ => panic!("Board::property_mut() - cell {} is not a property", position),
        }
    }

    /// Positions of all the properties of `group`.
    pub fn group_members(&self, group: Group) -> &[usize] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The name of the cell at `position`.
    pub fn name(&self, position: usize) -> &'static str {
        self.cells[position].name
    }

    pub fn deck_mut(&mut self, kind: DeckKind) -> &mut Deck {
        match kind {
            DeckKind::Chance => &mut self.chance,
            DeckKind::CommunityChest => &mut self.community_chest,
        }
    }

    /*********        OWNERSHIP        *********/

    /// Set the owner of the property at `position` and update
    /// the rent multipliers of its group.
    pub fn set_owner(&mut self, position: usize, owner: Option<usize>) {
        let group = {
            let property = self.property_mut(position);
            property.owner = owner;
            property.group
        };

        self.recalculate_monopoly_multipliers(group);
    }

    /// Update the rent multipliers of every property in `group`.
    /// This runs every time the ownership of a property changes:
    ///
    /// - Railroads are 1/2/4/8 depending on how many one player owns
    /// - Utilities are 4 or 10 depending on whether one player owns both
    /// - Other properties are 2 for a monopoly and 1 otherwise
    pub fn recalculate_monopoly_multipliers(&mut self, group: Group) {
        let members = self.group_members(group).to_vec();
        let owners: Vec<Option<usize>> = members
            .iter()
            .map(|&position| self.property(position).owner)
            .collect();

        for &position in &members {
            let property = self.property_mut(position);
            let ownership_count = owners.iter().filter(|&&o| o == property.owner).count() as u32;

            property.monopoly_multiplier = match group {
                Group::Railroads => 2_i64.pow(ownership_count.saturating_sub(1)),
                Group::Utilities if ownership_count == 2 => 10,
                Group::Utilities => 4,
                _ if ownership_count as usize == members.len() => 2,
                _ => 1,
            };
        }
    }

    /// Whether houses can be built in the group of the property at `position`:
    /// it is a colour group owned entirely by one player, and none of it is mortgaged.
    pub fn is_improvable(&self, position: usize) -> bool {
        let property = self.property(position);

        property.group.is_color()
            && property.owner.is_some()
            && property.monopoly_multiplier == 2
            && self
                .group_members(property.group)
                .iter()
                .all(|&p| !self.property(p).is_mortgaged)
    }

    /*********        RENT        *********/

    /// The rent a player pays for landing on the property at `position`.
    ///
    /// Utility rent depends on a fresh throw of the dice, so it is
    /// thrown here, when the rent is being paid.
    pub fn rent(&self, position: usize, dice: &mut Dice, log: &mut EventLog) -> i64 {
        let property = self.property(position);

        // There is a hotel on this property
        if property.has_hotel {
            return property.rent_house[4];
        }

        // There are houses on this property
        if property.houses > 0 {
            return property.rent_house[property.houses as usize - 1];
        }

        if property.group != Group::Utilities {
            // Undeveloped monopolies and railroads scale the base rent
            return property.rent_base * property.monopoly_multiplier;
        }

        // Utilities: dice throw * 4 or 10
        let roll = dice.roll();
        log.add(2, format!("{}", roll));

        roll.sum as i64 * property.monopoly_multiplier
    }

    /*********        IMPROVEMENTS        *********/

    /// Whether the bank has what it takes to improve the property at `position`.
    pub fn has_supply_for(&self, position: usize) -> bool {
        let property = self.property(position);

        if property.houses < HOUSES_PER_HOTEL {
            self.available_houses > 0
        } else {
            self.available_hotels > 0
        }
    }

    /// Build a house, or a hotel if there are 4 houses already, on the
    /// property at `position`. Return the new improvement level.
    pub fn build(&mut self, position: usize) -> u8 {
        let name = self.cells[position].name;
        let property = match &mut self.cells[position].kind {
            CellKind::Property(p) => p,
            _ => panic!("Board::build() - cell {} is not a property", position),
        };

        if property.has_hotel || property.houses > HOUSES_PER_HOTEL {
            panic!("Board::build() - invalid improvement level on {}", name);
        }

        if property.houses < HOUSES_PER_HOTEL {
            assert!(self.available_houses > 0, "Board::build() - no houses left");
            property.houses += 1;
            self.available_houses -= 1;
        } else {
            // The hotel replaces the 4 houses, which go back to the bank
            assert!(self.available_hotels > 0, "Board::build() - no hotels left");
            property.houses = 0;
            property.has_hotel = true;
            self.available_houses += HOUSES_PER_HOTEL as u32;
            self.available_hotels -= 1;
        }

        property.improvement_level()
    }

    /// Sell one level of improvement from the property at `position` back to
    /// the bank for half its price. Return the money raised.
    ///
    /// A hotel is swapped back for 4 houses if the bank has them. If it
    /// doesn't, the hotel and all the houses it stands for are sold at once.
    pub fn sell_improvement(&mut self, position: usize) -> i64 {
        let name = self.cells[position].name;
        let available_houses = self.available_houses;
        let property = match &mut self.cells[position].kind {
            CellKind::Property(p) => p,
            _ => panic!("Board::sell_improvement() - cell {} is not a property", position),
        };
        let sell_price = property.cost_house / 2;

        if property.has_hotel {
            property.has_hotel = false;
            self.available_hotels += 1;

            if available_houses >= HOUSES_PER_HOTEL as u32 {
                property.houses = HOUSES_PER_HOTEL;
                self.available_houses -= HOUSES_PER_HOTEL as u32;
                sell_price
            } else {
                property.houses = 0;
                sell_price * 5
            }
        } else if property.houses > 0 {
            property.houses -= 1;
            self.available_houses += 1;
            sell_price
        } else {
            panic!("Board::sell_improvement() - nothing to sell on {}", name);
        }
    }

    /*********        LOGGING        *********/

    /// Log the houses and hotels left in the bank, and the free parking money.
    pub fn log_board_state(&self, log: &mut EventLog, free_parking_rule: bool) {
        log.add(
            1,
            format!(
                "Available houses/hotels: {}/{}",
                self.available_houses, self.available_hotels
            ),
        );
        if free_parking_rule {
            log.add(1, format!("Free Parking Money: ${}", self.free_parking_money));
        }
    }

    /// Log who owns what, the rent multipliers and the improvements.
    pub fn log_current_map(&self, log: &mut EventLog, player_names: &[String]) {
        log.add(0, "== BOARD ==");

        for cell in &self.cells {
            let property = match &cell.kind {
                CellKind::Property(p) => p,
                _ => continue,
            };

            let owner = match property.owner {
                Some(i) => player_names[i].as_str(),
                None => "None",
            };
            let improvements = if property.has_hotel {
                String::from("hotel")
            } else if property.houses > 0 {
                format!("{} house(s)", property.houses)
            } else {
                String::from("none")
            };

            log.add(
                1,
                format!(
                    "- {}, Owner: {}, Rent multiplier: {}, Mortgaged: {}, Improvements: {}",
                    cell.name,
                    owner,
                    property.monopoly_multiplier,
                    property.is_mortgaged,
                    improvements
                ),
            );
        }
    }
}
