use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::info;

use monopoly_sim::analysis::Summary;
use monopoly_sim::config::Settings;
use monopoly_sim::game::{Game, GameResult, LogFile};

/// Simulate many games of Monopoly and report how each player fared.
#[derive(Parser, Debug)]
#[command(name = "monopoly-sim", version)]
struct Cli {
    /// Path to the TOML settings file (defaults are used if it doesn't exist)
    #[arg(long, default_value = "monopoly.toml")]
    config: PathBuf,

    /// Number of games to play (overrides the settings file)
    #[arg(long)]
    games: Option<usize>,

    /// Seed that every game's seed is derived from (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of worker threads (overrides the settings file)
    #[arg(long)]
    threads: Option<usize>,

    /// Don't write the narration of every game
    #[arg(long)]
    no_game_log: bool,

    /// Show debug output
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.debug { "debug" } else { "monopoly_sim=info,warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(cli.debug)
        .init();

    let mut settings = Settings::load_or_default(&cli.config)?;

    // Command line overrides
    if let Some(games) = cli.games {
        settings.simulation.n_games = games;
    }
    if let Some(seed) = cli.seed {
        settings.simulation.seed = seed;
    }
    if let Some(threads) = cli.threads {
        settings.simulation.threads = threads;
    }
    if cli.no_game_log {
        settings.simulation.keep_game_log = false;
    }
    settings.validate().context("invalid settings")?;

    let simulation = &settings.simulation;
    rayon::ThreadPoolBuilder::new()
        .num_threads(simulation.threads)
        .build_global()
        .context("building the thread pool")?;

    let log_file = if simulation.keep_game_log {
        let path = PathBuf::from(&simulation.game_log_file);
        let file = LogFile::create(&path)
            .with_context(|| format!("creating game log '{}'", path.display()))?;
        Some(file)
    } else {
        None
    };

    // Every game gets its own seed up front, so results don't depend on scheduling
    let mut master_rng = ChaCha8Rng::seed_from_u64(simulation.seed);
    let seeds: Vec<u64> = (0..simulation.n_games).map(|_| master_rng.random()).collect();

    info!(
        games = simulation.n_games,
        players = settings.players.len(),
        threads = simulation.threads,
        seed = simulation.seed,
        "starting simulation"
    );
    let start = Instant::now();

    let results = seeds
        .par_iter()
        .enumerate()
        .map(|(index, &seed)| -> anyhow::Result<GameResult> {
            let mut game = Game::new(&settings, index + 1, seed);
            let result = game.play();

            if let Some(file) = &log_file {
                file.append(game.log()).context("writing the game log")?;
            }

            Ok(result)
        })
        .collect::<anyhow::Result<Vec<GameResult>>>()?;

    if let Some(file) = &log_file {
        file.flush().context("writing the game log")?;
    }

    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "simulation finished"
    );

    let summary = Summary::from_results(&results, settings.simulation.n_moves);
    print!("{}", summary);

    Ok(())
}
