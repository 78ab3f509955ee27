//! Hanamikoji simulator CLI.
//!
//! - `simulate`: play many automatic games in parallel and print the tally
//! - `play`: seat a remote player on stdin/stdout against an automatic one

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use hanamikoji::core::{GameConfig, GameRng, PlayerId, PlayerMap};
use hanamikoji::error::Result;
use hanamikoji::nn::LinearScorer;
use hanamikoji::players::{Player, PlayerKind};
use hanamikoji::simulation::{self, SimulationConfig};
use hanamikoji::transport::RemotePlayer;

#[derive(Parser)]
#[command(name = "hanamikoji-sim")]
#[command(about = "Hanamikoji rules engine: batch simulation and remote play")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// JSON file holding a game configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base seed (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// End undecided games as draws after this many rounds
    #[arg(long, global = true)]
    max_rounds: Option<u32>,

    /// JSON weights for `greedy` players
    #[arg(long, global = true)]
    weights: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Show progress and summary logs
    #[arg(long, global = true)]
    show_output: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Play automatic games in parallel
    Simulate {
        /// Number of games to simulate
        #[arg(short, long, default_value = "1000")]
        games: u32,

        /// Player in the first seat
        #[arg(long, default_value = "random")]
        first: PlayerKind,

        /// Player in the second seat
        #[arg(long, default_value = "random")]
        second: PlayerKind,
    },
    /// Play one game against a remote client speaking JSON lines on stdin/stdout
    Play {
        /// Seat taken by the remote client
        #[arg(long, default_value = "first")]
        seat: Seat,

        /// Automatic opponent
        #[arg(long, default_value = "random")]
        opponent: PlayerKind,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Seat {
    First,
    Second,
}

impl From<Seat> for PlayerId {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::First => PlayerId::FIRST,
            Seat::Second => PlayerId::SECOND,
        }
    }
}

/// `--seed` wins over the config file's seed; with neither, pick one at random.
fn resolve_seed(flag: Option<u64>, from_file: Option<&GameConfig>) -> u64 {
    flag.or(from_file.map(|config| config.seed))
        .unwrap_or_else(rand::random)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the remote protocol.
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let from_file: Option<GameConfig> = match &args.config {
        Some(path) => Some(serde_json::from_str(&std::fs::read_to_string(path)?)?),
        None => None,
    };
    let seed = resolve_seed(args.seed, from_file.as_ref());
    let mut game = from_file.unwrap_or_default();
    if let Some(rounds) = args.max_rounds {
        game = game.with_max_rounds(rounds);
    }
    let weights = args
        .weights
        .as_ref()
        .map(|path| LinearScorer::from_json_file(path))
        .transpose()?;

    match args.command {
        Command::Simulate {
            games,
            first,
            second,
        } => {
            let config = SimulationConfig::new()
                .with_games(games)
                .with_seed(seed)
                .with_game(game);
            info!(games, seed, ?first, ?second, "starting simulation");

            let kinds = PlayerMap::from_pair(first, second);
            let start = Instant::now();
            let tally = simulation::evaluate(&config, |game_seed| {
                PlayerMap::new(|p| {
                    let player_seed = GameRng::derive_seed(game_seed, p.index() as u64 + 1);
                    kinds[p].build(player_seed, weights.as_ref()) as Box<dyn Player>
                })
            })?;

            println!("{}", tally);
            info!(elapsed_ms = start.elapsed().as_millis() as u64, "simulation done");
        }
        Command::Play { seat, opponent } => {
            let seat = PlayerId::from(seat);
            let remote: Box<dyn Player> =
                Box::new(RemotePlayer::new(seat, io::stdin().lock(), io::stdout().lock()));
            let automatic: Box<dyn Player> =
                opponent.build(GameRng::derive_seed(seed, 1), weights.as_ref());
            let players = match seat {
                PlayerId::FIRST => PlayerMap::from_pair(remote, automatic),
                _ => PlayerMap::from_pair(automatic, remote),
            };

            let outcome = simulation::play_game(game.with_seed(seed), players)?;
            info!(
                result = ?outcome.result,
                rounds = outcome.rounds,
                moves = outcome.moves,
                "game finished"
            );
        }
    }

    Ok(())
}
