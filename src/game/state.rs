use super::board::Board;
use super::dice::Dice;
use super::globals::*;
use super::log::EventLog;
use super::player::Player;
use crate::config::GameSettings;

/// Everything that changes during one game.
///
/// Players are referred to by their index in `players`, which never
/// changes during a game (bankrupt players stay in the list).
pub struct State {
    pub board: Board,
    /// The players playing the game.
    pub players: Vec<Player>,
    pub dice: Dice,
    /// The narration of the game.
    pub log: EventLog,
    /// The rules the game is played with.
    pub rules: GameSettings,
}

impl State {
    /*********        INITIALISATION INTERFACES        *********/

    /// Create a new game state and shuffle the card decks.
    pub fn new(rules: GameSettings, players: Vec<Player>, mut dice: Dice, log: EventLog) -> State {
        let mut board = Board::new(&rules);
        dice.shuffle(board.chance.cards_mut());
        dice.shuffle(board.community_chest.cards_mut());

        State {
            board,
            players,
            dice,
            log,
            rules,
        }
    }

    /*********        ALIASES (FOR CONVENIENCE)        *********/

    /// A mutable reference to the player at `index`.
    pub fn player(&mut self, index: usize) -> &mut Player {
        &mut self.players[index]
    }

    /// Indexes of the players other than `index` that are still in the game.
    pub fn other_players(&self, index: usize) -> Vec<usize> {
        (0..self.players.len())
            .filter(|&i| i != index && !self.players[i].is_bankrupt)
            .collect()
    }

    /// The names of all the players, in order.
    pub fn player_names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    /// Cash a player gets for mortgaging the property at `position`.
    pub fn mortgage_price(&self, position: usize) -> i64 {
        (self.board.property(position).cost_base as f64 * self.rules.mortgage_value) as i64
    }

    /// The net worth of a player, counting mortgaged properties partially.
    pub fn net_worth(&self, index: usize) -> i64 {
        self.players[index].net_worth(&self.board, self.rules.mortgage_value, false)
    }

    /*********        HELPER FUNCTIONS        *********/

    /// Move a property to a new owner (or back to the bank with `None`),
    /// keeping the players' lists of owned properties and the board's
    /// rent multipliers in sync.
    pub fn transfer_property(&mut self, position: usize, to: Option<usize>) {
        if let Some(from) = self.board.property(position).owner {
            let owned = &mut self.players[from].owned;
            match owned.iter().position(|&p| p == position) {
                Some(i) => {
                    owned.remove(i);
                }
                None => panic!(
                    "State::transfer_property() - {} is not in {}'s list of properties",
                    self.board.name(position),
                    self.players[from].name
                ),
            }
        }

        if let Some(to) = to {
            if self.players[to].owned.contains(&position) {
                panic!(
                    "State::transfer_property() - {} already owns {}",
                    self.players[to].name,
                    self.board.name(position)
                );
            }
            self.players[to].owned.push(position);
        }

        self.board.set_owner(position, to);
    }

    /// Give an unowned property to a player, as at the start of the game.
    pub fn assign_property(&mut self, index: usize, position: usize) {
        if let Some(owner) = self.board.property(position).owner {
            panic!(
                "State::assign_property() - {} is already owned by {}",
                self.board.name(position),
                self.players[owner].name
            );
        }

        self.transfer_property(position, Some(index));
        self.update_all_trade_lists();
    }

    /// Pay the player their salary for passing 'Go'.
    pub fn handle_salary(&mut self, index: usize) {
        let salary = self.rules.salary;
        self.players[index].money += salary;
        self.log.add(2, format!("{} receives salary ${}", self.players[index], salary));
    }

    /// Move a player forward to `position`, paying the salary if 'Go' is passed.
    pub fn advance_to(&mut self, index: usize, position: usize) {
        self.log.add(
            2,
            format!("{} goes to {}", self.players[index], self.board.name(position)),
        );

        if position < self.players[index].position {
            self.handle_salary(index);
        }
        self.players[index].position = position;
    }

    /// Send a player to jail.
    pub fn send_to_jail(&mut self, index: usize, reason: &str) {
        let player = &mut self.players[index];
        self.log.add(2, format!("{} {}, and goes to Jail.", player, reason));

        player.position = JAIL_POSITION;
        player.in_jail = true;
        player.doubles_rolled = 0;
        player.days_in_jail = 0;
    }

    /// Log every player's cash, net worth and position.
    pub fn log_players_state(&mut self) {
        for index in 0..self.players.len() {
            let line = if self.players[index].is_bankrupt {
                format!("- {}: Bankrupt", self.players[index])
            } else {
                let player = &self.players[index];
                format!(
                    "- {}: ${} (net ${}), at position {} ({})",
                    player,
                    player.money,
                    self.net_worth(index),
                    player.position,
                    self.board.name(player.position)
                )
            };

            self.log.add(1, line);
        }
    }
}
