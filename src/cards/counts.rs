//! Multisets of cards.
//!
//! Every pile in the game (hands, gifts, trash, offers) is a count per card
//! type. `CardCounts` is `Copy` and fixed-size, so state snapshots never
//! allocate for card accounting.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::catalog::{CardType, CARD_TYPE_COUNT, SUPPLY};

/// A multiset of cards: one count per card type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardCounts([u8; CARD_TYPE_COUNT]);

impl CardCounts {
    /// The empty multiset.
    pub const EMPTY: Self = Self([0; CARD_TYPE_COUNT]);

    /// The whole deck.
    pub const SUPPLY: Self = Self(SUPPLY);

    /// Create from raw counts.
    #[must_use]
    pub const fn from_array(counts: [u8; CARD_TYPE_COUNT]) -> Self {
        Self(counts)
    }

    /// Count the cards in an iterator.
    pub fn from_cards(cards: impl IntoIterator<Item = CardType>) -> Self {
        let mut counts = Self::EMPTY;
        for card in cards {
            counts.add(card);
        }
        counts
    }

    /// A multiset holding a single card.
    #[must_use]
    pub fn single(card: CardType) -> Self {
        let mut counts = Self::EMPTY;
        counts.add(card);
        counts
    }

    /// Raw counts.
    #[must_use]
    pub const fn as_array(&self) -> [u8; CARD_TYPE_COUNT] {
        self.0
    }

    /// Count of one type.
    #[must_use]
    pub fn get(&self, card: CardType) -> u8 {
        self.0[card.index()]
    }

    /// Add one card.
    pub fn add(&mut self, card: CardType) {
        self.0[card.index()] += 1;
    }

    /// Remove one card. Returns false (and leaves the set untouched) if
    /// there is none to remove.
    pub fn remove(&mut self, card: CardType) -> bool {
        let slot = &mut self.0[card.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Add every card of `other`.
    pub fn merge(&mut self, other: &CardCounts) {
        for (slot, n) in self.0.iter_mut().zip(other.0) {
            *slot += n;
        }
    }

    /// Remove every card of `other`.
    ///
    /// Returns false (and leaves the set untouched) if `other` is not
    /// contained in `self`.
    pub fn subtract(&mut self, other: &CardCounts) -> bool {
        if !self.contains(other) {
            return false;
        }
        for (slot, n) in self.0.iter_mut().zip(other.0) {
            *slot -= n;
        }
        true
    }

    /// Sum of two multisets.
    #[must_use]
    pub fn plus(mut self, other: &CardCounts) -> Self {
        self.merge(other);
        self
    }

    /// Check that every card of `other` is present in `self`.
    #[must_use]
    pub fn contains(&self, other: &CardCounts) -> bool {
        self.0.iter().zip(other.0).all(|(&have, need)| have >= need)
    }

    /// Total number of cards.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().map(|&n| n as u32).sum()
    }

    /// True if no cards are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Card types with a non-zero count, in index order.
    pub fn distinct(&self) -> impl Iterator<Item = CardType> + '_ {
        CardType::all().filter(move |&card| self.get(card) > 0)
    }

    /// `(type, count)` for every card type, including zeros.
    pub fn iter(&self) -> impl Iterator<Item = (CardType, u8)> + '_ {
        CardType::all().map(move |card| (card, self.get(card)))
    }

    /// Expand into a sorted list of cards.
    #[must_use]
    pub fn to_cards(&self) -> Vec<CardType> {
        self.iter()
            .flat_map(|(card, n)| std::iter::repeat(card).take(n as usize))
            .collect()
    }
}

impl Index<CardType> for CardCounts {
    type Output = u8;

    fn index(&self, card: CardType) -> &Self::Output {
        &self.0[card.index()]
    }
}

impl FromIterator<CardType> for CardCounts {
    fn from_iter<I: IntoIterator<Item = CardType>>(iter: I) -> Self {
        Self::from_cards(iter)
    }
}

impl std::fmt::Display for CardCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(i: u8) -> CardType {
        CardType::new(i)
    }

    #[test]
    fn test_add_remove() {
        let mut counts = CardCounts::EMPTY;
        counts.add(c(3));
        counts.add(c(3));

        assert_eq!(counts[c(3)], 2);
        assert!(counts.remove(c(3)));
        assert!(counts.remove(c(3)));
        assert!(!counts.remove(c(3)));
        assert!(counts.is_empty());
    }

    #[test]
    fn test_subtract_is_all_or_nothing() {
        let mut hand = CardCounts::from_array([2, 0, 1, 0, 0, 0, 0]);
        let too_many = CardCounts::from_array([1, 1, 0, 0, 0, 0, 0]);

        assert!(!hand.subtract(&too_many));
        assert_eq!(hand, CardCounts::from_array([2, 0, 1, 0, 0, 0, 0]));

        assert!(hand.subtract(&CardCounts::from_array([2, 0, 0, 0, 0, 0, 0])));
        assert_eq!(hand, CardCounts::from_array([0, 0, 1, 0, 0, 0, 0]));
    }

    #[test]
    fn test_from_cards_and_back() {
        let counts: CardCounts = [c(0), c(0), c(1)].into_iter().collect();
        assert_eq!(counts.as_array(), [2, 1, 0, 0, 0, 0, 0]);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.to_cards(), vec![c(0), c(0), c(1)]);
        assert_eq!(counts.distinct().collect::<Vec<_>>(), vec![c(0), c(1)]);
    }

    #[test]
    fn test_supply_total() {
        assert_eq!(CardCounts::SUPPLY.total(), 21);
    }
}
