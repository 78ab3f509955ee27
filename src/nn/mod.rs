//! Feature encoding and move scoring.
//!
//! ## Overview
//!
//! - **Encoding**: `FeatureEncoder` turns `(GameState, PrivateInfoSet)` into an
//!   `Observation` with one feature row per legal move
//! - **Scoring**: `MoveScorer` ranks those rows; `LinearScorer` applies exported
//!   weights, `UniformScorer` is a baseline
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hanamikoji::nn::{FeatureEncoder, MoveScorer, UniformScorer};
//!
//! let obs = FeatureEncoder::new().encode(game.state(), game.infoset(player))?;
//! let scores = UniformScorer.score(&obs);
//! ```

pub mod encoder;
pub mod traits;

pub use encoder::{
    argmax, move_vector, FeatureEncoder, Observation, HISTORY_ROWS, MOVE_VECTOR_SIZE,
    STATE_FEATURE_SIZE, X_FEATURE_SIZE,
};
pub use traits::{EncodedState, LinearScorer, MoveScorer, UniformScorer};
