mod details;
pub use details::*;

use lazy_static::lazy_static;
use std::collections::HashSet;

/// The number of cells around the board.
pub const BOARD_SIZE: usize = 40;

/// Position of 'Go'.
pub const GO_POSITION: usize = 0;

/// Position of 'Jail'.
pub const JAIL_POSITION: usize = 10;

/// Position of 'Go To Jail'.
pub const GO_TO_JAIL_POSITION: usize = 30;

/// The number of houses that a hotel replaces.
pub const HOUSES_PER_HOTEL: u8 = 4;

lazy_static! {
    /// Positions of the railroads on the game board.
    pub static ref RAILROAD_POSITIONS: HashSet<usize> = HashSet::from([5, 15, 25, 35]);

    /// Positions of the utilities on the game board.
    pub static ref UTILITY_POSITIONS: HashSet<usize> = HashSet::from([12, 28]);

    /// All the cells of the board, in order, starting from 'Go'.
    pub static ref CELLS: Vec<Cell> = vec![
        // 0-4
        Cell::new("GO", CellKind::Plain),
        Cell::property("A1 Mediterranean Avenue", Group::Brown, 60, 2, 50, [10, 30, 90, 160, 250]),
        Cell::new("COM1 Community Chest", CellKind::CommunityChest),
        Cell::property("A2 Baltic Avenue", Group::Brown, 60, 4, 50, [20, 60, 180, 320, 450]),
        Cell::new("IT Income Tax", CellKind::Tax(TaxRule::FixedOrPercent)),
        // 5-9
        Cell::property("R1 Reading Railroad", Group::Railroads, 200, 25, 0, [0; 5]),
        Cell::property("B1 Oriental Avenue", Group::Lightblue, 100, 6, 50, [30, 90, 270, 400, 550]),
        Cell::new("CH1 Chance", CellKind::Chance),
        Cell::property("B2 Vermont Avenue", Group::Lightblue, 100, 6, 50, [30, 90, 270, 400, 550]),
        Cell::property("B3 Connecticut Avenue", Group::Lightblue, 120, 8, 50, [40, 100, 300, 450, 600]),
        // 10-14
        Cell::new("JL Jail", CellKind::Plain),
        Cell::property("C1 St. Charles Place", Group::Pink, 140, 10, 100, [50, 150, 450, 625, 750]),
        Cell::property("U1 Electric Company", Group::Utilities, 150, 0, 0, [0; 5]),
        Cell::property("C2 States Avenue", Group::Pink, 140, 10, 100, [50, 150, 450, 625, 750]),
        Cell::property("C3 Virginia Avenue", Group::Pink, 160, 12, 100, [60, 180, 500, 700, 900]),
        // 15-19
        Cell::property("R2 Pennsylvania Railroad", Group::Railroads, 200, 25, 0, [0; 5]),
        Cell::property("D1 St. James Place", Group::Orange, 180, 14, 100, [70, 200, 550, 700, 950]),
        Cell::new("COM2 Community Chest", CellKind::CommunityChest),
        Cell::property("D2 Tennessee Avenue", Group::Orange, 180, 14, 100, [70, 200, 550, 700, 950]),
        Cell::property("D3 New York Avenue", Group::Orange, 200, 16, 100, [80, 220, 600, 800, 1000]),
        // 20-24
        Cell::new("FP Free Parking", CellKind::FreeParking),
        Cell::property("E1 Kentucky Avenue", Group::Red, 220, 18, 150, [90, 250, 700, 875, 1050]),
        Cell::new("CH2 Chance", CellKind::Chance),
        Cell::property("E2 Indiana Avenue", Group::Red, 220, 18, 150, [90, 250, 700, 875, 1050]),
        Cell::property("E3 Illinois Avenue", Group::Red, 240, 20, 150, [100, 300, 750, 925, 1100]),
        // 25-29
        Cell::property("R3 B&O Railroad", Group::Railroads, 200, 25, 0, [0; 5]),
        Cell::property("F1 Atlantic Avenue", Group::Yellow, 260, 22, 150, [110, 330, 800, 975, 1150]),
        Cell::property("F2 Ventnor Avenue", Group::Yellow, 260, 22, 150, [110, 330, 800, 975, 1150]),
        Cell::property("U2 Waterworks", Group::Utilities, 150, 0, 0, [0; 5]),
        Cell::property("F3 Marvin Gardens", Group::Yellow, 280, 24, 150, [120, 360, 850, 1025, 1200]),
        // 30-34
        Cell::new("GTJ Go To Jail", CellKind::GoToJail),
        Cell::property("G1 Pacific Avenue", Group::Green, 300, 26, 200, [130, 390, 900, 1100, 1275]),
        Cell::property("G2 North Carolina Avenue", Group::Green, 300, 26, 200, [130, 390, 900, 1100, 1275]),
        Cell::new("COM3 Community Chest", CellKind::CommunityChest),
        Cell::property("G3 Pennsylvania Avenue", Group::Green, 320, 28, 200, [150, 450, 1000, 1200, 1400]),
        // 35-39
        Cell::property("R4 Short Line", Group::Railroads, 200, 25, 0, [0; 5]),
        Cell::new("CH3 Chance", CellKind::Chance),
        Cell::property("H1 Park Place", Group::Indigo, 350, 35, 200, [175, 500, 1100, 1300, 1500]),
        Cell::new("LT Luxury Tax", CellKind::Tax(TaxRule::Fixed)),
        Cell::property("H2 Boardwalk", Group::Indigo, 400, 50, 200, [200, 600, 1400, 1700, 2000]),
    ];

    /// The Chance deck, before shuffling.
    pub static ref CHANCE_CARDS: Vec<Card> = vec![
        Card::new("Advance to Boardwalk", CardEffect::MoveTo(39)),
        Card::new("Advance to Go (Collect $200)", CardEffect::MoveTo(GO_POSITION)),
        Card::new(
            "Advance to Illinois Avenue. If you pass Go, collect $200",
            CardEffect::MoveTo(24),
        ),
        Card::new(
            "Advance to St. Charles Place. If you pass Go, collect $200",
            CardEffect::MoveTo(11),
        ),
        Card::new(
            "Advance to the nearest Railroad. If owned, pay owner twice the rental to which they are otherwise entitled",
            CardEffect::NearestRailroad,
        ),
        Card::new(
            "Advance to the nearest Railroad. If owned, pay owner twice the rental to which they are otherwise entitled",
            CardEffect::NearestRailroad,
        ),
        Card::new(
            "Advance token to nearest Utility. If owned, throw dice and pay owner a total ten times amount thrown.",
            CardEffect::NearestUtility,
        ),
        Card::new("Bank pays you dividend of $50", CardEffect::Collect(50)),
        Card::new("Get Out of Jail Free", CardEffect::GetOutOfJailFree),
        Card::new("Go Back 3 Spaces", CardEffect::MoveBack(3)),
        Card::new(
            "Go to Jail. Go directly to Jail, do not pass Go, do not collect $200",
            CardEffect::GoToJail,
        ),
        Card::new(
            "Make general repairs on all your property. For each house pay $25. For each hotel pay $100",
            CardEffect::Repairs { per_house: 25, per_hotel: 100 },
        ),
        Card::new("Speeding fine $15", CardEffect::Pay(15)),
        Card::new(
            "Take a trip to Reading Railroad. If you pass Go, collect $200",
            CardEffect::MoveTo(5),
        ),
        Card::new(
            "You have been elected Chairman of the Board. Pay each player $50",
            CardEffect::PayEachPlayer(50),
        ),
        Card::new("Your building loan matures. Collect $150", CardEffect::Collect(150)),
    ];

    /// The Community Chest deck, before shuffling.
    pub static ref COMMUNITY_CHEST_CARDS: Vec<Card> = vec![
        Card::new("Advance to Go (Collect $200)", CardEffect::MoveTo(GO_POSITION)),
        Card::new("Bank error in your favor. Collect $200", CardEffect::Collect(200)),
        Card::new("Doctor's fee. Pay $50", CardEffect::Pay(50)),
        Card::new("From sale of stock you get $50", CardEffect::Collect(50)),
        Card::new("Get Out of Jail Free", CardEffect::GetOutOfJailFree),
        Card::new(
            "Go to Jail. Go directly to jail, do not pass Go, do not collect $200",
            CardEffect::GoToJail,
        ),
        Card::new("Holiday fund matures. Receive $100", CardEffect::Collect(100)),
        Card::new("Income tax refund. Collect $20", CardEffect::Collect(20)),
        Card::new(
            "It is your birthday. Collect $10 from every player",
            CardEffect::CollectFromEachPlayer(10),
        ),
        Card::new("Life insurance matures. Collect $100", CardEffect::Collect(100)),
        Card::new("Pay hospital fees of $100", CardEffect::Pay(100)),
        Card::new("Pay school fees of $50", CardEffect::Pay(50)),
        Card::new("Receive $25 consultancy fee", CardEffect::Collect(25)),
        Card::new(
            "You are assessed for street repair. $40 per house. $115 per hotel",
            CardEffect::Repairs { per_house: 40, per_hotel: 115 },
        ),
        Card::new(
            "You have won second prize in a beauty contest. Collect $10",
            CardEffect::Collect(10),
        ),
        Card::new("You inherit $100", CardEffect::Collect(100)),
    ];
}
