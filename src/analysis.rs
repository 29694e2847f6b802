//! Statistics over the results of many games.

use std::collections::BTreeMap;
use std::fmt;

use crate::game::GameResult;

#[derive(Clone, Debug, PartialEq)]
/// How often one player avoided bankruptcy.
pub struct Survival {
    pub name: String,
    /// Games the player finished without going bankrupt.
    pub survived: usize,
    pub rate: f64,
    /// Half-width of the 95% confidence interval of `rate`.
    pub margin: f64,
}

#[derive(Clone, Debug, PartialEq)]
/// A summary of a whole simulation.
pub struct Summary {
    pub n_games: usize,
    /// The turn limit of each game.
    pub n_moves: u32,
    /// Games where exactly one player was left.
    pub clear_winners: usize,
    /// Number of games by the number of players left at the end.
    pub remaining_players: BTreeMap<usize, usize>,
    /// Median length of the games that were decided.
    pub median_length_finished: Option<u32>,
    /// Median length of all games, undecided ones counting as `n_moves`.
    pub median_length_all: Option<u32>,
    /// The average turn that players went bankrupt on.
    pub average_bankruptcy_turn: Option<f64>,
    /// Survival of each player, in the order they first appear.
    pub survival: Vec<Survival>,
}

impl Summary {
    /// Summarise the results of games played with a limit of `n_moves` turns.
    pub fn from_results(results: &[GameResult], n_moves: u32) -> Summary {
        let n_games = results.len();

        let mut remaining_players = BTreeMap::new();
        for result in results {
            *remaining_players.entry(result.survivors()).or_insert(0) += 1;
        }
        let clear_winners = remaining_players.get(&1).copied().unwrap_or(0);

        let mut finished: Vec<u32> = results.iter().filter_map(GameResult::length).collect();
        finished.sort_unstable();
        let mut all: Vec<u32> = results
            .iter()
            .map(|result| result.length().unwrap_or(n_moves))
            .collect();
        all.sort_unstable();

        let bankruptcy_turns: Vec<u32> = results
            .iter()
            .flat_map(|result| result.players.iter().filter_map(|p| p.bankrupt_turn))
            .collect();
        let average_bankruptcy_turn = if bankruptcy_turns.is_empty() {
            None
        } else {
            let total: u64 = bankruptcy_turns.iter().map(|&t| t as u64).sum();
            Some(total as f64 / bankruptcy_turns.len() as f64)
        };

        // Players may take turns in a different order in every game
        let mut survived: Vec<(String, usize)> = vec![];
        for player in results.iter().flat_map(|result| &result.players) {
            let index = match survived.iter().position(|(name, _)| *name == player.name) {
                Some(i) => i,
                None => {
                    survived.push((player.name.clone(), 0));
                    survived.len() - 1
                }
            };
            if player.bankrupt_turn.is_none() {
                survived[index].1 += 1;
            }
        }

        let survival = survived
            .into_iter()
            .map(|(name, survived)| {
                let rate = survived as f64 / n_games as f64;
                let margin = 1.96 * (rate * (1.0 - rate) / n_games as f64).sqrt();
                Survival {
                    name,
                    survived,
                    rate,
                    margin,
                }
            })
            .collect();

        Summary {
            n_games,
            n_moves,
            clear_winners,
            remaining_players,
            median_length_finished: median(&finished),
            median_length_all: median(&all),
            average_bankruptcy_turn,
            survival,
        }
    }
}

/// The upper median of sorted values.
fn median(sorted: &[u32]) -> Option<u32> {
    sorted.get(sorted.len() / 2).copied()
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Games that had clear winner: {} / {} ({:.1}%)",
            self.clear_winners,
            self.n_games,
            percent(self.clear_winners, self.n_games)
        )?;

        writeln!(f, "Number of remaining players after {} turns:", self.n_moves)?;
        for (remaining, count) in &self.remaining_players {
            writeln!(
                f,
                "  - {}: {} ({:.1}%)",
                remaining,
                count,
                percent(*count, self.n_games)
            )?;
        }

        if let Some(length) = self.median_length_finished {
            writeln!(f, "Median game length (for finished games): {}", length)?;
        }
        if let Some(length) = self.median_length_all {
            writeln!(f, "Median game length (for all games): {}", length)?;
        }
        if let Some(turn) = self.average_bankruptcy_turn {
            writeln!(f, "Average survival time (for bankrupt players): {:.1} turns", turn)?;
        }

        writeln!(f, "Players' survival rate:")?;
        for player in &self.survival {
            writeln!(
                f,
                "  - {}: {} ({:.1} +- {:.1}%)",
                player.name,
                player.survived,
                player.rate * 100.0,
                player.margin * 100.0
            )?;
        }

        Ok(())
    }
}
