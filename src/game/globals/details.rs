use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// The groups that properties are sorted into.
pub enum Group {
    Brown,
    Lightblue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    Indigo,
    Railroads,
    Utilities,
}

impl Group {
    /// Whether houses and hotels can be built on properties of this group.
    pub fn is_color(&self) -> bool {
        !matches!(self, Group::Railroads | Group::Utilities)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// The two card decks on the board.
pub enum DeckKind {
    Chance,
    CommunityChest,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// What happens to the player who draws a card.
pub enum CardEffect {
    /// Move forward to a position, collecting salary if 'Go' is passed.
    MoveTo(usize),
    /// Move forward to the nearest railroad and pay double rent there.
    NearestRailroad,
    /// Move forward to the nearest utility and pay 10 times a dice throw there.
    NearestUtility,
    /// Move backwards by this many cells.
    MoveBack(usize),
    /// Receive money from the bank.
    Collect(i64),
    /// Pay money to the bank.
    Pay(i64),
    /// Pay the bank for every house and hotel owned.
    Repairs { per_house: i64, per_hotel: i64 },
    /// Pay every other player.
    PayEachPlayer(i64),
    /// Receive money from every other player.
    CollectFromEachPlayer(i64),
    /// Keep the card until it is used to leave jail.
    GetOutOfJailFree,
    /// Go directly to jail, ending the turn.
    GoToJail,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// A Chance or Community Chest card.
pub struct Card {
    /// The text printed on the card.
    pub text: &'static str,
    /// The effect of the card.
    pub effect: CardEffect,
}

impl Card {
    /// Create a new card.
    pub const fn new(text: &'static str, effect: CardEffect) -> Card {
        Card { text, effect }
    }

    /// Whether this is a "Get Out of Jail Free" card.
    pub fn is_jail_free(&self) -> bool {
        self.effect == CardEffect::GetOutOfJailFree
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// How a tax cell computes what the player owes.
pub enum TaxRule {
    /// A fixed amount (luxury tax).
    Fixed,
    /// The smaller of a fixed amount and a share of the player's
    /// net worth (income tax).
    FixedOrPercent,
}

#[derive(Clone, Debug)]
/// A property tile on the board, along with its current state.
pub struct Property {
    /// The group that the property belongs to.
    pub group: Group,
    /// The price of the property.
    pub cost_base: i64,
    /// The rent without any houses on the property.
    pub rent_base: i64,
    /// The price of building one house (or the hotel).
    pub cost_house: i64,
    /// The rent with 1, 2, 3 and 4 houses, and with a hotel.
    pub rent_house: [i64; 5],

    /// The index of the player who owns this property.
    pub owner: Option<usize>,
    /// Whether the property is mortgaged.
    pub is_mortgaged: bool,
    /// The number of houses on the property (0 to 4).
    pub houses: u8,
    /// Whether there is a hotel on the property.
    pub has_hotel: bool,
    /// Rent multiplier derived from the ownership of the property's group.
    pub monopoly_multiplier: i64,
}

impl Property {
    /// Creates a new unowned property.
    pub fn new(
        group: Group,
        cost_base: i64,
        rent_base: i64,
        cost_house: i64,
        rent_house: [i64; 5],
    ) -> Property {
        Property {
            group,
            cost_base,
            rent_base,
            cost_house,
            rent_house,
            owner: None,
            is_mortgaged: false,
            houses: 0,
            has_hotel: false,
            monopoly_multiplier: 1,
        }
    }

    /// The improvement level of the property, where a hotel counts as level 5.
    pub fn improvement_level(&self) -> u8 {
        if self.has_hotel {
            5
        } else {
            self.houses
        }
    }

    /// Whether there are houses or a hotel on the property.
    pub fn is_improved(&self) -> bool {
        self.has_hotel || self.houses > 0
    }
}

#[derive(Clone, Debug)]
/// The kinds of cells on the board, with the data each kind needs.
pub enum CellKind {
    /// A cell that does nothing ('Go', 'Jail / Just Visiting').
    Plain,
    Tax(TaxRule),
    Property(Property),
    GoToJail,
    Chance,
    CommunityChest,
    FreeParking,
}

#[derive(Clone, Debug)]
/// A cell of the board.
pub struct Cell {
    pub name: &'static str,
    pub kind: CellKind,
}

impl Cell {
    /// Creates a new cell.
    pub fn new(name: &'static str, kind: CellKind) -> Cell {
        Cell { name, kind }
    }

    /// Creates a new property cell.
    pub fn property(
        name: &'static str,
        group: Group,
        cost_base: i64,
        rent_base: i64,
        cost_house: i64,
        rent_house: [i64; 5],
    ) -> Cell {
        Cell {
            name,
            kind: CellKind::Property(Property::new(
                group, cost_base, rent_base, cost_house, rent_house,
            )),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// The outcome of throwing the dice.
pub struct DiceRoll {
    /// The value of every die.
    pub dice: Vec<u8>,
    /// The sum of the dice.
    pub sum: usize,
    /// Whether all the dice (at least two of them) resulted in the same number.
    pub is_double: bool,
}

impl DiceRoll {
    /// Creates a roll from the values of the dice.
    pub fn from_dice(dice: Vec<u8>) -> DiceRoll {
        let sum = dice.iter().map(|&d| d as usize).sum();
        let is_double = dice.len() > 1 && dice.windows(2).all(|pair| pair[0] == pair[1]);

        DiceRoll {
            dice,
            sum,
            is_double,
        }
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "roll: {} ({:?}{})",
            self.sum,
            self.dice,
            if self.is_double { ", double" } else { "" }
        )
    }
}
