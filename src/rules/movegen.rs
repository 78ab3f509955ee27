//! Legal-move generation.
//!
//! `generate` maps (hand, action flags, pending offer) to the full set of
//! legal moves. Exactly one branch runs:
//!
//! 1. A pending 1-2 offer: one `ResolveOneTwo` per distinct offered type.
//! 2. A pending 2-2 offer: `ResolveTwoTwo(true)`, plus `ResolveTwoTwo(false)`
//!    unless both pairs are the same multiset.
//! 3. No pending offer: every stash, trash and offer the hand supports, for
//!    each action card still available.
//!
//! Combinations are enumerated over type indices in non-decreasing order and
//! checked against a hand that is decremented as each card is tentatively
//! taken, so a type is never used more often than it is held and no
//! combination is emitted twice.

use rustc_hash::FxHashSet;

use crate::cards::{CardCounts, CardType};
use crate::core::{ActionCard, ActionFlags, CardPair, Move, PendingOffer};

/// Enumerate every legal move.
///
/// The hand must hold valid counts; the result has no stable order
/// guarantee beyond being deterministic for identical inputs.
#[must_use]
pub fn generate(hand: &CardCounts, flags: &ActionFlags, pending: Option<&PendingOffer>) -> Vec<Move> {
    let moves = match pending {
        Some(PendingOffer::OneTwo(triple)) => resolve_one_two(triple),
        Some(PendingOffer::TwoTwo(first, second)) => resolve_two_two(first, second),
        None => actions(hand, flags),
    };

    debug_assert!(is_duplicate_free(&moves), "duplicate moves generated: {:?}", moves);
    moves
}

fn resolve_one_two(triple: &CardCounts) -> Vec<Move> {
    triple.distinct().map(Move::ResolveOneTwo).collect()
}

fn resolve_two_two(first: &CardCounts, second: &CardCounts) -> Vec<Move> {
    let mut moves = vec![Move::ResolveTwoTwo(true)];
    if first != second {
        moves.push(Move::ResolveTwoTwo(false));
    }
    moves
}

fn actions(hand: &CardCounts, flags: &ActionFlags) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut hand = Tentative::new(hand);

    if flags.is_available(ActionCard::Stash) {
        moves.extend(hand.counts.distinct().map(Move::Stash));
    }

    if flags.is_available(ActionCard::Trash) {
        moves.extend(pairs(&mut hand, None).into_iter().map(|p| Move::Trash(p.low(), p.high())));
    }

    if flags.is_available(ActionCard::OfferOneTwo) {
        offers_one_two(&mut hand, &mut moves);
    }

    if flags.is_available(ActionCard::OfferTwoTwo) {
        offers_two_two(&mut hand, &mut moves);
    }

    moves
}

/// Every supportable triple `i <= j <= k`.
fn offers_one_two(hand: &mut Tentative, out: &mut Vec<Move>) {
    for i in CardType::all() {
        if !hand.take(i) {
            continue;
        }
        for j in CardType::all().filter(|&j| j >= i) {
            if !hand.take(j) {
                continue;
            }
            for k in CardType::all().filter(|&k| k >= j) {
                if hand.has(k) {
                    out.push(Move::OfferOneTwo(i, j, k));
                }
            }
            hand.put_back(j);
        }
        hand.put_back(i);
    }
}

/// Every supportable pair of pairs `a <= b`.
///
/// Requiring the second pair to sort at or after the first emits each
/// partition once; when both pairs are equal it is emitted a single time.
fn offers_two_two(hand: &mut Tentative, out: &mut Vec<Move>) {
    for first in pairs(hand, None) {
        hand.take(first.low());
        hand.take(first.high());
        for second in pairs(hand, Some(first)) {
            out.push(Move::OfferTwoTwo(first, second));
        }
        hand.put_back(first.high());
        hand.put_back(first.low());
    }
}

/// Supportable pairs `i <= j`, optionally only those sorting at or after `min`.
fn pairs(hand: &mut Tentative, min: Option<CardPair>) -> Vec<CardPair> {
    let mut out = Vec::new();
    for i in CardType::all() {
        if !hand.take(i) {
            continue;
        }
        for j in CardType::all().filter(|&j| j >= i) {
            let pair = CardPair::new(i, j);
            if hand.has(j) && min.map_or(true, |m| pair >= m) {
                out.push(pair);
            }
        }
        hand.put_back(i);
    }
    out
}

/// A scratch copy of the hand that cards are taken from while enumerating.
struct Tentative {
    counts: CardCounts,
}

impl Tentative {
    fn new(hand: &CardCounts) -> Self {
        Self { counts: *hand }
    }

    fn has(&self, card: CardType) -> bool {
        self.counts[card] > 0
    }

    fn take(&mut self, card: CardType) -> bool {
        self.counts.remove(card)
    }

    fn put_back(&mut self, card: CardType) {
        self.counts.add(card);
    }
}

fn is_duplicate_free(moves: &[Move]) -> bool {
    let mut seen = FxHashSet::default();
    moves.iter().all(|mv| seen.insert(*mv))
}
