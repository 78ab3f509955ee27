//! Error types for the engine and its collaborators.

use thiserror::Error;

use crate::cards::CardType;
use crate::core::{Move, PlayerId};

#[derive(Error, Debug)]
pub enum EngineError {
    /// A move outside the acting player's current legal set.
    #[error("illegal move {mv} for {player}")]
    IllegalMove { player: PlayerId, mv: Move },

    #[error("game is already over")]
    GameOver,

    #[error("invalid deal: {0}")]
    InvalidDeal(String),

    /// Card accounting no longer matches the supply table.
    #[error("supply violated for card {card}: expected {expected}, found {found}")]
    SupplyViolation { card: CardType, expected: u8, found: u32 },

    #[error("no legal moves for {0}")]
    NoLegalMoves(PlayerId),

    /// Scorer weights that do not fit the feature layout.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
