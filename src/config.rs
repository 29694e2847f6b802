//! Simulation settings, loaded from a TOML file.
//!
//! Every field has a default, so a partial file (or no file at all)
//! gives the standard two-player setup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::game::globals::{CellKind, Group, CELLS};

/// Problems that make a set of settings unusable.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("at least two players are needed, got {0}")]
    NotEnoughPlayers(usize),
    #[error("player name '{0}' is used more than once")]
    DuplicatePlayer(String),
    #[error("dice need at least one die with at least two sides")]
    InvalidDice,
    #[error("cell {0} is not a property")]
    NotAProperty(usize),
    #[error("property {0} is given to more than one player")]
    PropertyAssignedTwice(usize),
    #[error("{0} must not be negative")]
    NegativeAmount(&'static str),
    #[error("{0} must be between 0 and 1")]
    RateOutOfRange(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
/// How many games to play and how.
pub struct SimulationSettings {
    /// Number of games to simulate.
    pub n_games: usize,
    /// Number of turns to play in each game. A game with more than one
    /// player left after this is considered to have no winner.
    pub n_moves: u32,
    /// Seed that every game's seed is derived from.
    pub seed: u64,
    /// Number of worker threads.
    pub threads: usize,
    /// End the game early once every remaining player has more cash than this.
    pub never_bankrupt_cash: Option<i64>,
    /// Whether to write the narration of every game.
    pub keep_game_log: bool,
    /// Where the narration of every game is written.
    pub game_log_file: String,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            n_games: 10000,
            n_moves: 1000,
            seed: 0,
            threads: 4,
            never_bankrupt_cash: None,
            keep_game_log: true,
            game_log_file: String::from("gamelog.txt"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
/// The rules of the game.
pub struct GameSettings {
    pub dice_count: u8,
    pub dice_sides: u8,
    /// Randomly shuffle the order of players in every game.
    pub shuffle_players: bool,
    /// Starting cash for players that don't set their own.
    pub starting_money: i64,
    /// Houses the bank has for building.
    pub available_houses: u32,
    /// Hotels the bank has for building.
    pub available_hotels: u32,
    /// Salary for passing 'Go'.
    pub salary: i64,
    pub luxury_tax: i64,
    /// Fixed income tax.
    pub income_tax: i64,
    /// Share of the net worth paid as income tax, if that's less than `income_tax`.
    pub income_tax_percentage: f64,
    /// Share of the property price a player gets for mortgaging it.
    pub mortgage_value: f64,
    /// Extra share of the property price paid to unmortgage it.
    pub mortgage_fee: f64,
    /// Fine to leave jail without rolling doubles.
    pub exit_jail_fine: i64,
    /// House rule: money paid to the bank goes to 'Free Parking',
    /// and whoever lands there collects it.
    pub free_parking_money: bool,
    /// House rule: houses don't have to be built evenly across a group.
    pub allow_unequal_development: bool,
    /// House rule: a property the lander refuses to buy is auctioned.
    pub auction_refused_properties: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            dice_count: 2,
            dice_sides: 6,
            shuffle_players: false,
            starting_money: 1500,
            available_houses: 32,
            available_hotels: 12,
            salary: 200,
            luxury_tax: 100,
            income_tax: 200,
            income_tax_percentage: 0.1,
            mortgage_value: 0.5,
            mortgage_fee: 0.1,
            exit_jail_fine: 50,
            free_parking_money: false,
            allow_unequal_development: false,
            auction_refused_properties: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// The behaviour of a player.
pub struct PlayerSettings {
    /// Money the player wants to keep unspent.
    pub unspendable_cash: i64,
    /// Groups of properties the player refuses to buy.
    pub ignore_property_groups: HashSet<Group>,
    /// Whether the player trades properties with other players.
    pub participates_in_trades: bool,
    /// Maximum amount the player overpays in a trade (more expensive - less expensive).
    pub trade_max_diff_absolute: i64,
    /// Maximum ratio the player overpays in a trade (more expensive / less expensive).
    pub trade_max_diff_relative: f64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        PlayerSettings {
            unspendable_cash: 200,
            ignore_property_groups: HashSet::new(),
            participates_in_trades: true,
            trade_max_diff_absolute: 200,
            trade_max_diff_relative: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A player taking part in every game.
pub struct PlayerEntry {
    pub name: String,
    /// Overrides `GameSettings::starting_money`.
    #[serde(default)]
    pub starting_money: Option<i64>,
    /// Positions of properties the player owns from the start.
    #[serde(default)]
    pub starting_properties: Vec<usize>,
    #[serde(flatten)]
    pub behaviour: PlayerSettings,
}

impl PlayerEntry {
    /// A player with standard behaviour and nothing special at the start.
    pub fn new(name: &str) -> Self {
        PlayerEntry {
            name: name.to_owned(),
            starting_money: None,
            starting_properties: vec![],
            behaviour: PlayerSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
/// Everything a simulation run needs.
pub struct Settings {
    pub simulation: SimulationSettings,
    pub game: GameSettings,
    pub players: Vec<PlayerEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            simulation: SimulationSettings::default(),
            game: GameSettings::default(),
            players: vec![PlayerEntry::new("Hero"), PlayerEntry::new("Alice")],
        }
    }
}

impl Settings {
    /// Load the settings from `path`, or use the defaults if there is no such file.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(config = %path.display(), "no config file, using defaults");
            return Ok(Settings::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file '{}'", path.display()))?;

        Self::from_toml(&text).with_context(|| format!("loading config '{}'", path.display()))
    }

    /// Parse and validate settings written in TOML.
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text).context("parsing TOML settings")?;
        settings.validate()?;

        Ok(settings)
    }

    /// Check that the settings describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.len() < 2 {
            return Err(ConfigError::NotEnoughPlayers(self.players.len()));
        }

        let mut names = HashSet::new();
        for player in &self.players {
            if !names.insert(player.name.as_str()) {
                return Err(ConfigError::DuplicatePlayer(player.name.clone()));
            }
        }

        let game = &self.game;
        if game.dice_count == 0 || game.dice_sides < 2 {
            return Err(ConfigError::InvalidDice);
        }

        // Every starting property is a property, owned by at most one player
        let mut assigned = HashSet::new();
        for player in &self.players {
            for &position in &player.starting_properties {
                match CELLS.get(position).map(|cell| &cell.kind) {
                    Some(CellKind::Property(_)) => (),
                    _ => return Err(ConfigError::NotAProperty(position)),
                }
                if !assigned.insert(position) {
                    return Err(ConfigError::PropertyAssignedTwice(position));
                }
            }
        }

        let amounts = [
            ("starting_money", game.starting_money),
            ("salary", game.salary),
            ("luxury_tax", game.luxury_tax),
            ("income_tax", game.income_tax),
            ("exit_jail_fine", game.exit_jail_fine),
        ];
        for (name, amount) in amounts {
            if amount < 0 {
                return Err(ConfigError::NegativeAmount(name));
            }
        }
        for player in &self.players {
            if player.starting_money.map_or(false, |m| m < 0) {
                return Err(ConfigError::NegativeAmount("starting_money"));
            }
            if player.behaviour.unspendable_cash < 0 {
                return Err(ConfigError::NegativeAmount("unspendable_cash"));
            }
            if player.behaviour.trade_max_diff_absolute < 0 {
                return Err(ConfigError::NegativeAmount("trade_max_diff_absolute"));
            }
        }

        let rates = [
            ("income_tax_percentage", game.income_tax_percentage),
            ("mortgage_value", game.mortgage_value),
            ("mortgage_fee", game.mortgage_fee),
        ];
        for (name, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::RateOutOfRange(name));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
            [simulation]
            n_games = 50

            [game]
            free_parking_money = true

            [[players]]
            name = "Hero"
            unspendable_cash = 0
            ignore_property_groups = ["Utilities"]
            starting_properties = [11, 13, 14]

            [[players]]
            name = "Alice"
            starting_money = 200
            "#,
        )
        .unwrap();

        assert_eq!(settings.simulation.n_games, 50);
        assert_eq!(settings.simulation.n_moves, 1000);
        assert!(settings.game.free_parking_money);
        assert_eq!(settings.game.salary, 200);

        let hero = &settings.players[0];
        assert_eq!(hero.behaviour.unspendable_cash, 0);
        assert!(hero.behaviour.ignore_property_groups.contains(&Group::Utilities));
        assert_eq!(hero.starting_properties, vec![11, 13, 14]);
        assert_eq!(hero.starting_money, None);

        let alice = &settings.players[1];
        assert_eq!(alice.starting_money, Some(200));
        assert_eq!(alice.behaviour, PlayerSettings::default());
    }

    #[test]
    fn rejects_a_single_player() {
        let mut settings = Settings::default();
        settings.players.truncate(1);

        assert_eq!(settings.validate(), Err(ConfigError::NotEnoughPlayers(1)));
    }

    #[test]
    fn rejects_bad_starting_properties() {
        let mut settings = Settings::default();
        settings.players[0].starting_properties = vec![7];
        assert_eq!(settings.validate(), Err(ConfigError::NotAProperty(7)));

        settings.players[0].starting_properties = vec![11];
        settings.players[1].starting_properties = vec![11];
        assert_eq!(
            settings.validate(),
            Err(ConfigError::PropertyAssignedTwice(11))
        );
    }

    #[test]
    fn rejects_negative_player_amounts() {
        let mut settings = Settings::default();
        settings.players[1].behaviour.unspendable_cash = -500;
        assert_eq!(
            settings.validate(),
            Err(ConfigError::NegativeAmount("unspendable_cash"))
        );

        settings.players[1].behaviour.unspendable_cash = 0;
        settings.players[0].behaviour.trade_max_diff_absolute = -1;
        assert_eq!(
            settings.validate(),
            Err(ConfigError::NegativeAmount("trade_max_diff_absolute"))
        );
    }

    #[test]
    fn rejects_rates_outside_zero_to_one() {
        let mut settings = Settings::default();
        settings.game.mortgage_value = 1.5;

        assert_eq!(
            settings.validate(),
            Err(ConfigError::RateOutOfRange("mortgage_value"))
        );
    }
}
