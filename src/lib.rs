//! # hanamikoji
//!
//! A rules engine for Hanamikoji, a two-player card game of majorities.
//!
//! ## Design Principles
//!
//! 1. **Closed Legal Sets**: every turn the engine enumerates the acting
//!    player's complete legal-move set, and only moves from that set are
//!    ever applied.
//!
//! 2. **Split Views**: public `GameState` and per-player `PrivateInfoSet`
//!    are separate values; a player is handed only its own infoset.
//!
//! 3. **Conserved Supply**: every card of the 21-card supply is always in
//!    exactly one place (hand, gifts, stash, trash, pending offer, or draw pile).
//!
//! ## Architecture
//!
//! - **Tagged Moves**: each move kind carries only its own cards, normalized
//!   so that equal moves compare equal.
//!
//! - **Persistent History**: the round history lives in an `im` vector, so
//!   cloning a `Game` for look-ahead is cheap.
//!
//! - **Seeded Shuffles**: all randomness flows from `GameRng`, so a seed and
//!   a move sequence reproduce a game exactly.
//!
//! ## Modules
//!
//! - `cards`: card types, supply and point tables, multiset counts
//! - `core`: players, RNG, configuration, moves, game state
//! - `rules`: move generation, scoring, the `Game` state machine, sessions
//! - `players`: the `Player` trait and built-in players
//! - `transport`: JSON-lines protocol for remote players
//! - `nn`: feature encoding and move scoring
//! - `simulation`: parallel batch play

pub mod cards;
pub mod core;
pub mod error;
pub mod nn;
pub mod players;
pub mod rules;
pub mod simulation;
pub mod transport;

// Re-export commonly used types
pub use crate::cards::{CardCounts, CardType, CARD_TYPE_COUNT, DECK_SIZE, POINTS, SUPPLY};

pub use crate::core::{
    ActionCard, ActionFlags, CardPair, GameConfig, GameRng, GameState, Move, MoveRecord, OfferKind,
    PendingOffer, PlayerId, PlayerMap, PrivateInfoSet, PublicMove, MOVES_PER_ROUND,
};

pub use crate::error::{EngineError, Result};

pub use crate::rules::{
    Deal, Game, GameOutcome, GameResult, Leaders, Phase, RoundSummary, Session, Standing,
    StepOutcome,
};

pub use crate::players::{FirstMovePlayer, GreedyPlayer, Player, PlayerKind, RandomPlayer};

pub use crate::simulation::{evaluate, SimulationConfig, WinTally};
