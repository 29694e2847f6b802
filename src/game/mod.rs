mod board;
mod cards;
mod deck;
mod dice;
pub mod globals;
mod improve;
mod log;
mod payment;
mod player;
mod state;
mod trade;
mod turn;

pub use board::Board;
pub use cards::{CardOutcome, RentModifier};
pub use deck::Deck;
pub use dice::Dice;
pub use log::{EventLog, LogFile, LogLine};
pub use payment::Payee;
pub use player::Player;
pub use state::State;
pub use turn::TurnResult;

use tracing::debug;

use crate::config::Settings;

#[derive(Clone, Debug, PartialEq)]
/// How one player finished a game.
pub struct PlayerResult {
    pub name: String,
    /// Cash at the end of the game (0 for bankrupt players).
    pub money: i64,
    pub net_worth: i64,
    /// The turn the player went bankrupt on, or `None` if they didn't.
    pub bankrupt_turn: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
/// The outcome of one game.
pub struct GameResult {
    pub game_number: usize,
    /// The seed the game's dice were created with.
    pub seed: u64,
    /// The number of turns that were played before the game ended.
    pub turns_played: u32,
    /// Players in the order they took turns.
    pub players: Vec<PlayerResult>,
}

impl GameResult {
    /// The number of players that didn't go bankrupt.
    pub fn survivors(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.bankrupt_turn.is_none())
            .count()
    }

    /// The turn the game was decided on, if only one player is left.
    pub fn length(&self) -> Option<u32> {
        if self.survivors() > 1 {
            return None;
        }

        self.players.iter().filter_map(|p| p.bankrupt_turn).max()
    }
}

/// One game of Monopoly, from setting up the board to the last turn.
pub struct Game {
    /// The board, the players and everything else that changes during the game.
    pub state: State,
    game_number: usize,
    seed: u64,
    /// The maximum number of turns to play.
    n_moves: u32,
    /// End the game when every player left has more cash than this.
    never_bankrupt_cash: Option<i64>,
}

impl Game {
    /*********        INITIALISATION INTERFACES        *********/

    /// Set up a new game: the board, the dice seeded with `seed` and the players
    /// with their starting money and properties. `settings` must be valid.
    pub fn new(settings: &Settings, game_number: usize, seed: u64) -> Game {
        let mut log = if settings.simulation.keep_game_log {
            EventLog::new()
        } else {
            EventLog::disabled()
        };
        log.add(
            0,
            format!(
                "= GAME {} of {} (seed = {}) =",
                game_number, settings.simulation.n_games, seed
            ),
        );

        let rules = settings.game.clone();
        let mut dice = Dice::new(seed, rules.dice_count, rules.dice_sides);

        let mut entries = settings.players.clone();
        if rules.shuffle_players {
            dice.shuffle(&mut entries);
        }

        let players = entries
            .iter()
            .map(|entry| {
                let money = entry.starting_money.unwrap_or(rules.starting_money);
                Player::new(&entry.name, entry.behaviour.clone(), money)
            })
            .collect();

        let mut state = State::new(rules, players, dice, log);
        for (index, entry) in entries.iter().enumerate() {
            for &position in &entry.starting_properties {
                state.assign_property(index, position);
            }
        }

        Game {
            state,
            game_number,
            seed,
            n_moves: settings.simulation.n_moves,
            never_bankrupt_cash: settings.simulation.never_bankrupt_cash,
        }
    }

    /*********        PUBLIC INTERFACES        *********/

    /// Play the game until one player is left, everyone left is rich enough
    /// to never go bankrupt, or the turn limit is reached.
    pub fn play(&mut self) -> GameResult {
        debug!(game = self.game_number, seed = self.seed, "game started");

        let n_players = self.state.players.len();
        let mut bankrupt_turns: Vec<Option<u32>> = vec![None; n_players];
        let mut turns_played = 0;

        for turn in 1..=self.n_moves {
            self.state
                .log
                .add(0, format!("== GAME {} Turn {} ===", self.game_number, turn));
            self.state.log_players_state();
            self.state
                .board
                .log_board_state(&mut self.state.log, self.state.rules.free_parking_money);

            if self.is_over(turn) {
                break;
            }
            turns_played = turn;

            for me in 0..n_players {
                if self.state.players[me].is_bankrupt {
                    continue;
                }

                // A double means another move in the same turn
                while self.state.make_a_move(me) == TurnResult::RollAgain {}

                // Cards can make other players pay (and go bankrupt) too
                for (index, player) in self.state.players.iter().enumerate() {
                    if player.is_bankrupt && bankrupt_turns[index].is_none() {
                        bankrupt_turns[index] = Some(turn);
                        debug!(
                            game = self.game_number,
                            player = %player,
                            turn,
                            "player went bankrupt"
                        );
                    }
                }
            }
        }

        // The last thing in the log: the final state of the board
        let names = self.state.player_names();
        self.state.board.log_current_map(&mut self.state.log, &names);

        let players = (0..n_players)
            .map(|index| PlayerResult {
                name: self.state.players[index].name.clone(),
                money: self.state.players[index].money,
                net_worth: self.state.net_worth(index),
                bankrupt_turn: bankrupt_turns[index],
            })
            .collect();

        debug!(game = self.game_number, turns_played, "game finished");

        GameResult {
            game_number: self.game_number,
            seed: self.seed,
            turns_played,
            players,
        }
    }

    /// The narration of the game so far.
    pub fn log(&self) -> &EventLog {
        &self.state.log
    }

    /*********        HELPER FUNCTIONS        *********/

    /// Check (and log) whether the game is over before the specified turn.
    fn is_over(&mut self, turn: u32) -> bool {
        let alive: Vec<&Player> = self
            .state
            .players
            .iter()
            .filter(|p| !p.is_bankrupt)
            .collect();

        if alive.len() < 2 {
            let line = format!("Only {} alive player remains, game over", alive.len());
            self.state.log.add(0, line);
            return true;
        }

        if let Some(threshold) = self.never_bankrupt_cash {
            if alive.iter().all(|p| p.money > threshold) {
                let line = format!(
                    "== All Rich ==: GAME {}, Turn {}: all non-bankrupt players have more than ${}, this game will never end",
                    self.game_number, turn, threshold
                );
                self.state.log.add(0, line);
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerEntry;

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.simulation.n_moves = 200;
        settings
    }

    #[test]
    fn same_seed_same_game() {
        let settings = settings();

        let first = Game::new(&settings, 1, 42).play();
        let second = Game::new(&settings, 1, 42).play();

        assert_eq!(first, second);
    }

    #[test]
    fn starting_money_and_properties_are_applied() {
        let mut settings = settings();
        settings.players[0].starting_money = Some(1200);
        settings.players[0].starting_properties = vec![11, 13, 14];
        settings.players[1].starting_properties = vec![31, 32, 34];

        let game = Game::new(&settings, 1, 0);

        assert_eq!(game.state.players[0].money, 1200);
        assert_eq!(game.state.players[1].money, 1500);
        assert_eq!(game.state.board.property(11).monopoly_multiplier, 2);
        assert_eq!(game.state.board.property(34).owner, Some(1));
    }

    #[test]
    fn game_ends_when_one_player_is_left() {
        let mut settings = settings();
        settings.simulation.n_moves = 1000;
        settings.players[1].starting_money = Some(0);
        settings.players[1].behaviour.unspendable_cash = 0;

        let mut game = Game::new(&settings, 1, 7);
        // Hero buys Baltic Avenue, then Alice can't pay the rent there
        game.state.dice.force_rolls(vec![vec![1, 2], vec![1, 2]]);
        let result = game.play();

        assert_eq!(result.players[1].bankrupt_turn, Some(1));
        assert_eq!(result.players[1].money, 0);
        assert_eq!(result.survivors(), 1);
        assert_eq!(result.length(), Some(1));
        assert_eq!(result.turns_played, 1);
        assert!(game.log().contains("Only 1 alive player remains"));
    }

    #[test]
    fn rich_players_end_the_game() {
        let mut settings = settings();
        settings.simulation.never_bankrupt_cash = Some(100);

        let result = Game::new(&settings, 1, 0).play();

        assert_eq!(result.turns_played, 0);
        assert_eq!(result.survivors(), 2);
        assert_eq!(result.length(), None);
    }

    #[test]
    fn disabled_game_log_stays_empty() {
        let mut settings = settings();
        settings.simulation.keep_game_log = false;
        settings.players.push(PlayerEntry::new("Bob"));

        let mut game = Game::new(&settings, 3, 5);
        game.play();

        assert!(game.log().lines().is_empty());
    }
}
