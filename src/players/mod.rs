//! Decision makers.
//!
//! A `Player` sees the public `GameState` and its own `PrivateInfoSet`, and
//! must answer with one of the infoset's legal moves. The hooks let remote
//! players mirror what the engine reveals to them.

mod greedy;
mod random;

pub use greedy::GreedyPlayer;
pub use random::{FirstMovePlayer, RandomPlayer};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::cards::CardType;
use crate::core::{GameState, Move, PrivateInfoSet};
use crate::error::Result;
use crate::nn::{LinearScorer, UniformScorer};
use crate::rules::{GameResult, RoundSummary};

/// Something that picks moves for one seat.
pub trait Player {
    /// Short label for logs.
    fn name(&self) -> &str;

    /// Choose a move from `info.legal_moves`.
    fn act(&mut self, state: &GameState, info: &PrivateInfoSet) -> Result<Move>;

    /// A card was added to this player's hand from the draw pile.
    fn on_draw(&mut self, _card: CardType) -> Result<()> {
        Ok(())
    }

    /// Stashes were revealed and leaders updated.
    fn on_round_end(&mut self, _summary: &RoundSummary) -> Result<()> {
        Ok(())
    }

    fn on_game_over(&mut self, _result: &GameResult) -> Result<()> {
        Ok(())
    }
}

/// Built-in automatic players.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    /// Uniformly random legal move.
    #[default]
    Random,
    /// Always the first legal move.
    FirstMove,
    /// Highest-scoring move under a linear model (uniform without weights).
    Greedy,
}

impl PlayerKind {
    /// Instantiate a player; `seed` only matters for randomized kinds and
    /// `weights` only for `Greedy`.
    #[must_use]
    pub fn build(self, seed: u64, weights: Option<&LinearScorer>) -> Box<dyn Player + Send> {
        match (self, weights) {
            (PlayerKind::Random, _) => Box::new(RandomPlayer::new(seed)),
            (PlayerKind::FirstMove, _) => Box::new(FirstMovePlayer),
            (PlayerKind::Greedy, Some(scorer)) => Box::new(GreedyPlayer::new(scorer.clone())),
            (PlayerKind::Greedy, None) => Box::new(GreedyPlayer::new(UniformScorer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_kind_names() {
        assert_eq!(PlayerKind::Random.build(1, None).name(), "random");
        assert_eq!(PlayerKind::FirstMove.build(1, None).name(), "first-move");
        assert_eq!(PlayerKind::Greedy.build(1, None).name(), "greedy");
    }

    #[test]
    fn test_player_kind_serde() {
        let kind: PlayerKind = serde_json::from_str("\"first_move\"").unwrap();
        assert_eq!(kind, PlayerKind::FirstMove);
    }
}
