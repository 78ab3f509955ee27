//! Batch simulation.
//!
//! Plays many independent games in parallel and tallies the results. Game
//! `i` is seeded with `GameRng::derive_seed(base, i)`, so a tally depends only
//! on the configuration and the players, not on thread scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{GameConfig, GameRng, PlayerId, PlayerMap};
use crate::error::Result;
use crate::players::Player;
use crate::rules::{Game, GameOutcome, GameResult, Session};

/// Configuration for a batch of games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of games to play.
    pub games: u32,

    /// Base seed; each game derives its own.
    pub seed: u64,

    /// Rules shared by every game. Its seed is replaced per game.
    pub game: GameConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: 1000,
            seed: 0,
            game: GameConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_games(mut self, games: u32) -> Self {
        self.games = games;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Game configuration for the `index`-th game.
    #[must_use]
    pub fn game_config(&self, index: u32) -> GameConfig {
        self.game
            .clone()
            .with_seed(GameRng::derive_seed(self.seed, index as u64))
    }
}

/// Aggregated results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinTally {
    pub games: u32,
    pub wins: PlayerMap<u32>,
    pub draws: u32,
    pub rounds: u64,
    pub moves: u64,
}

impl WinTally {
    pub fn record(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        match outcome.result {
            GameResult::Winner(player) => self.wins[player] += 1,
            GameResult::Draw => self.draws += 1,
        }
        self.rounds += outcome.rounds as u64;
        self.moves += outcome.moves as u64;
    }

    #[must_use]
    pub fn merge(mut self, other: &WinTally) -> Self {
        self.games += other.games;
        for (player, wins) in other.wins.iter() {
            self.wins[player] += wins;
        }
        self.draws += other.draws;
        self.rounds += other.rounds;
        self.moves += other.moves;
        self
    }

    /// Fraction of games won by `player`.
    #[must_use]
    pub fn win_rate(&self, player: PlayerId) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins[player] as f64 / self.games as f64
    }

    #[must_use]
    pub fn mean_rounds(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.rounds as f64 / self.games as f64
    }
}

impl std::fmt::Display for WinTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "games:  {}", self.games)?;
        for player in PlayerId::all() {
            writeln!(
                f,
                "{:<7} {} ({:.1}%)",
                format!("{}:", player),
                self.wins[player],
                100.0 * self.win_rate(player)
            )?;
        }
        writeln!(f, "draws:  {}", self.draws)?;
        write!(f, "rounds: {:.2} per game", self.mean_rounds())
    }
}

/// Play one game to completion.
pub fn play_game<'a>(config: GameConfig, players: PlayerMap<Box<dyn Player + 'a>>) -> Result<GameOutcome> {
    Session::new(Game::new(config), players).run()
}

/// Play `config.games` games in parallel.
///
/// `factory` receives each game's seed and returns fresh players for it.
/// The first error aborts the batch.
pub fn evaluate<F>(config: &SimulationConfig, factory: F) -> Result<WinTally>
where
    F: Fn(u64) -> PlayerMap<Box<dyn Player>> + Sync,
{
    let outcomes = (0..config.games)
        .into_par_iter()
        .map(|index| {
            let game = config.game_config(index);
            let players = factory(game.seed);
            play_game(game, players)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut tally = WinTally::default();
    for outcome in &outcomes {
        tally.record(outcome);
    }

    info!(
        games = tally.games,
        first = tally.wins[PlayerId::FIRST],
        second = tally.wins[PlayerId::SECOND],
        draws = tally.draws,
        "simulation finished"
    );
    Ok(tally)
}
