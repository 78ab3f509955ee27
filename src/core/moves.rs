//! Move representation.
//!
//! A move is a tagged variant per kind, each carrying only the card types it
//! needs. Offers and trash are unordered, so the constructors normalize their
//! arguments: two moves that describe the same cards compare equal.
//!
//! - `Stash`, `Trash`, `OfferOneTwo`, `OfferTwoTwo` consume one of the four
//!   per-round action cards.
//! - `ResolveOneTwo`, `ResolveTwoTwo` answer the opponent's pending offer.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::player::PlayerId;
use crate::cards::{CardCounts, CardType};

/// One of the four single-use-per-round actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionCard {
    /// Keep one card hidden until round end.
    Stash,
    /// Discard two cards face-down.
    Trash,
    /// Offer three cards; the opponent keeps one.
    OfferOneTwo,
    /// Offer two pairs; the opponent keeps one pair.
    OfferTwoTwo,
}

impl ActionCard {
    /// All action cards in flag order.
    pub const ALL: [ActionCard; 4] = [
        ActionCard::Stash,
        ActionCard::Trash,
        ActionCard::OfferOneTwo,
        ActionCard::OfferTwoTwo,
    ];

    /// Flag index, `0..4`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Number of hand cards the action consumes.
    #[must_use]
    pub const fn cards_used(self) -> u8 {
        self as u8 + 1
    }
}

/// Availability of the four action cards for one player in one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionFlags([bool; 4]);

impl Default for ActionFlags {
    fn default() -> Self {
        Self::ALL_AVAILABLE
    }
}

impl ActionFlags {
    /// Start-of-round flags.
    pub const ALL_AVAILABLE: Self = Self([true; 4]);

    /// Create from raw flags in `ActionCard::ALL` order.
    #[must_use]
    pub const fn from_array(flags: [bool; 4]) -> Self {
        Self(flags)
    }

    /// Raw flags in `ActionCard::ALL` order.
    #[must_use]
    pub const fn as_array(&self) -> [bool; 4] {
        self.0
    }

    /// Check whether an action card is still usable this round.
    #[must_use]
    pub fn is_available(&self, card: ActionCard) -> bool {
        self.0[card.index()]
    }

    /// Mark an action card used. Returns false if it was already used.
    pub fn consume(&mut self, card: ActionCard) -> bool {
        std::mem::replace(&mut self.0[card.index()], false)
    }

    /// Number of action cards left this round.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.0.iter().filter(|&&f| f).count()
    }
}

/// An unordered pair of cards, stored low-then-high.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardPair {
    low: CardType,
    high: CardType,
}

impl CardPair {
    /// Create a pair; argument order does not matter.
    #[must_use]
    pub fn new(a: CardType, b: CardType) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// Lower card type.
    #[must_use]
    pub fn low(&self) -> CardType {
        self.low
    }

    /// Higher card type.
    #[must_use]
    pub fn high(&self) -> CardType {
        self.high
    }

    /// The pair as a multiset.
    #[must_use]
    pub fn counts(&self) -> CardCounts {
        CardCounts::from_cards([self.low, self.high])
    }
}

impl std::fmt::Display for CardPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{},{}}}", self.low, self.high)
    }
}

/// Which sub-protocol an offer opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferKind {
    OneTwo,
    TwoTwo,
}

/// Cards waiting for the opponent's decision.
///
/// Only one offer can be pending at a time, which `Option<PendingOffer>`
/// in the game state expresses directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PendingOffer {
    /// Three offered cards.
    OneTwo(CardCounts),
    /// Two offered pairs, in the order the offerer listed them.
    TwoTwo(CardCounts, CardCounts),
}

impl PendingOffer {
    /// Sub-protocol of this offer.
    #[must_use]
    pub fn kind(&self) -> OfferKind {
        match self {
            PendingOffer::OneTwo(_) => OfferKind::OneTwo,
            PendingOffer::TwoTwo(_, _) => OfferKind::TwoTwo,
        }
    }

    /// Every card on offer.
    #[must_use]
    pub fn cards(&self) -> CardCounts {
        match self {
            PendingOffer::OneTwo(triple) => *triple,
            PendingOffer::TwoTwo(a, b) => a.plus(b),
        }
    }
}

/// A complete game move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Hide one card until round end.
    Stash(CardType),
    /// Discard two cards (`low <= high`).
    Trash(CardType, CardType),
    /// Offer three cards (sorted ascending).
    OfferOneTwo(CardType, CardType, CardType),
    /// Offer two pairs (first pair `<=` second pair).
    OfferTwoTwo(CardPair, CardPair),
    /// Keep one card of this type from the pending triple.
    ResolveOneTwo(CardType),
    /// `true`: first pair to the resolver, second to the offerer.
    /// `false`: the reverse.
    ResolveTwoTwo(bool),
}

impl Move {
    /// Trash two cards in either order.
    #[must_use]
    pub fn trash(a: CardType, b: CardType) -> Self {
        Move::Trash(a.min(b), a.max(b))
    }

    /// Offer three cards in any order.
    #[must_use]
    pub fn offer_one_two(a: CardType, b: CardType, c: CardType) -> Self {
        let mut cards = [a, b, c];
        cards.sort_unstable();
        Move::OfferOneTwo(cards[0], cards[1], cards[2])
    }

    /// Offer two pairs in any order.
    #[must_use]
    pub fn offer_two_two(a: CardPair, b: CardPair) -> Self {
        Move::OfferTwoTwo(a.min(b), a.max(b))
    }

    /// The action card this move consumes, if any.
    #[must_use]
    pub fn action_card(&self) -> Option<ActionCard> {
        match self {
            Move::Stash(_) => Some(ActionCard::Stash),
            Move::Trash(..) => Some(ActionCard::Trash),
            Move::OfferOneTwo(..) => Some(ActionCard::OfferOneTwo),
            Move::OfferTwoTwo(..) => Some(ActionCard::OfferTwoTwo),
            Move::ResolveOneTwo(_) | Move::ResolveTwoTwo(_) => None,
        }
    }

    /// True for moves answering a pending offer.
    #[must_use]
    pub fn is_resolution(&self) -> bool {
        self.action_card().is_none()
    }

    /// Cards this move takes out of the mover's hand.
    #[must_use]
    pub fn hand_cards(&self) -> SmallVec<[CardType; 4]> {
        match *self {
            Move::Stash(a) => smallvec![a],
            Move::Trash(a, b) => smallvec![a, b],
            Move::OfferOneTwo(a, b, c) => smallvec![a, b, c],
            Move::OfferTwoTwo(p, q) => smallvec![p.low(), p.high(), q.low(), q.high()],
            Move::ResolveOneTwo(_) | Move::ResolveTwoTwo(_) => SmallVec::new(),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Stash(a) => write!(f, "stash({})", a),
            Move::Trash(a, b) => write!(f, "trash({},{})", a, b),
            Move::OfferOneTwo(a, b, c) => write!(f, "offer-1-2({},{},{})", a, b, c),
            Move::OfferTwoTwo(p, q) => write!(f, "offer-2-2({},{})", p, q),
            Move::ResolveOneTwo(kept) => write!(f, "resolve-1-2(keep {})", kept),
            Move::ResolveTwoTwo(true) => write!(f, "resolve-2-2(first pair)"),
            Move::ResolveTwoTwo(false) => write!(f, "resolve-2-2(second pair)"),
        }
    }
}

/// A move as the opponent sees it.
///
/// Stash and trash contents stay hidden; offers and resolutions are public.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublicMove {
    Stash,
    Trash,
    OfferOneTwo(CardCounts),
    OfferTwoTwo(CardCounts, CardCounts),
    Resolve {
        kind: OfferKind,
        /// Cards the resolver kept.
        to_self: CardCounts,
        /// Cards returned to the offerer.
        to_offerer: CardCounts,
    },
}

/// A recorded move with metadata for history tracking.
///
/// Used for:
/// - Move history features for decision models
/// - Replay/debugging
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The player who moved.
    pub player: PlayerId,

    /// Round the move belongs to.
    pub round: u32,

    /// Position within the round, starting at 0.
    pub sequence: u8,

    /// What the opponent is allowed to know about the move.
    pub action: PublicMove,
}
