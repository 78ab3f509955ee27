//! Card catalog and card multisets.
//!
//! ## Catalog
//!
//! Seven card types with a fixed supply (`[2, 2, 2, 3, 3, 4, 5]`, 21 cards)
//! and a point value per type.
//!
//! ## Counts
//!
//! Cards of the same type are interchangeable, so every pile is stored as a
//! `CardCounts` multiset rather than a list of card instances.

pub mod catalog;
pub mod counts;

pub use catalog::{full_deck, CardType, CARD_TYPE_COUNT, DECK_SIZE, POINTS, SUPPLY};
pub use counts::CardCounts;
