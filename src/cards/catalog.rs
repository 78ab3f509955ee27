//! Static card catalog: seven card types with fixed supply and point value.
//!
//! The supply table and the point table hold the same numbers, but they
//! answer different questions (how many copies exist vs. what a majority is
//! worth) and are kept as separate tables.

use serde::{Deserialize, Serialize};

/// Number of distinct card types.
pub const CARD_TYPE_COUNT: usize = 7;

/// Copies of each card type in the deck.
pub const SUPPLY: [u8; CARD_TYPE_COUNT] = [2, 2, 2, 3, 3, 4, 5];

/// Points credited to the player leading each card type.
pub const POINTS: [u8; CARD_TYPE_COUNT] = [2, 2, 2, 3, 3, 4, 5];

/// Total number of cards in the deck.
pub const DECK_SIZE: usize = 21;

/// A card type, `0..=6`.
///
/// Ordering follows the index, which is what the move generator relies on to
/// emit unordered pairs and triples exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CardType(u8);

impl CardType {
    /// Create a card type.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 7`. Use `CardType::try_from` for untrusted input.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < CARD_TYPE_COUNT, "Card type must be 0..=6");
        Self(index)
    }

    /// Raw index, usable for table lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Copies of this type in the deck.
    #[must_use]
    pub const fn supply(self) -> u8 {
        SUPPLY[self.0 as usize]
    }

    /// Point value of leading this type.
    #[must_use]
    pub const fn points(self) -> u8 {
        POINTS[self.0 as usize]
    }

    /// Iterate over all card types in index order.
    pub fn all() -> impl Iterator<Item = CardType> + Clone {
        (0..CARD_TYPE_COUNT as u8).map(CardType)
    }
}

impl TryFrom<u8> for CardType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (value as usize) < CARD_TYPE_COUNT {
            Ok(Self(value))
        } else {
            Err(format!("card type {} out of range 0..=6", value))
        }
    }
}

impl From<CardType> for u8 {
    fn from(card: CardType) -> Self {
        card.0
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The full unshuffled deck, grouped by type.
#[must_use]
pub fn full_deck() -> Vec<CardType> {
    CardType::all()
        .flat_map(|card| std::iter::repeat(card).take(card.supply() as usize))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_deck_matches_supply() {
        let deck = full_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        for card in CardType::all() {
            let copies = deck.iter().filter(|&&c| c == card).count();
            assert_eq!(copies, card.supply() as usize);
        }
    }

    #[test]
    fn test_points_sum() {
        let total: u32 = CardType::all().map(|c| c.points() as u32).sum();
        assert_eq!(total, 21);
    }

    #[test]
    fn test_try_from_range() {
        assert_eq!(CardType::try_from(6), Ok(CardType::new(6)));
        assert!(CardType::try_from(7).is_err());
    }

    #[test]
    #[should_panic(expected = "Card type must be 0..=6")]
    fn test_new_out_of_range() {
        let _ = CardType::new(7);
    }

    #[test]
    fn test_serde_as_integer() {
        let json = serde_json::to_string(&CardType::new(4)).unwrap();
        assert_eq!(json, "4");

        let parsed: CardType = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, CardType::new(2));

        assert!(serde_json::from_str::<CardType>("9").is_err());
    }
}
