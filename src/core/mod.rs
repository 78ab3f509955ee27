//! Core engine types: players, moves, state, RNG, configuration.
//!
//! These are the data model the move generator and the engine operate on.
//! None of them enforce game rules on their own; the `rules` module does.

pub mod player;
pub mod rng;
pub mod config;
pub mod moves;
pub mod state;

pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use config::{GameConfig, MOVES_PER_ROUND, RESPONDER_HAND_SIZE, STARTER_HAND_SIZE};
pub use moves::{ActionCard, ActionFlags, CardPair, Move, MoveRecord, OfferKind, PendingOffer, PublicMove};
pub use state::{GameState, PrivateInfoSet};
