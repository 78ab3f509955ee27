//! Rules of the game.
//!
//! - `movegen`: legal-move enumeration for a hand, flags and pending offer
//! - `scoring`: majority tracking and win conditions
//! - `engine`: the `Game` state machine applying moves
//! - `session`: drives a `Game` between two `Player`s
//!
//! The engine validates every move against the acting player's cached legal
//! set; players never mutate game state directly.

pub mod engine;
pub mod movegen;
pub mod scoring;
pub mod session;

pub use engine::{Deal, Game, GameResult, Phase, RoundSummary, StepOutcome};
pub use scoring::{Leaders, Standing};
pub use session::{GameOutcome, Session};
