//! Line-delimited JSON protocol for remote players.
//!
//! The engine sends one `Request` per line and, for every request except
//! `winner`, reads one `Answer` line back.
//!
//! | request      | answer                      |
//! |--------------|-----------------------------|
//! | `draw_card`  | `{"ans": <card 0..6>}`      |
//! | `move_req`   | `{"ans": [move_type, payload]}` |
//! | `stash_req`  | `{"ans": [7 ints]}`         |
//! | `winner`     | none                        |
//!
//! Moves travel as `[move_type, payload]`:
//!
//! | type | move          | payload                          |
//! |------|---------------|----------------------------------|
//! | 0    | stash         | counts of the stashed card       |
//! | 1    | trash         | counts of the trashed pair       |
//! | 2    | offer 1-2     | counts of the offered triple     |
//! | 3    | offer 2-2     | `[first pair, second pair]`      |
//! | 4    | resolve 1-2   | `[kept card, returned cards]`    |
//! | 5    | resolve 2-2   | `[kept pair, returned pair]`     |

mod remote;

pub use remote::RemotePlayer;

use serde::{Deserialize, Serialize};

use crate::cards::{CardCounts, CardType, CARD_TYPE_COUNT};
use crate::core::{CardPair, Move, PendingOffer};
use crate::error::{EngineError, Result};

pub const STASH: u8 = 0;
pub const TRASH: u8 = 1;
pub const OFFER_ONE_TWO: u8 = 2;
pub const OFFER_TWO_TWO: u8 = 3;
pub const RESOLVE_ONE_TWO: u8 = 4;
pub const RESOLVE_TWO_TWO: u8 = 5;

/// Move body on the wire: one count vector or two of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Counts([u8; CARD_TYPE_COUNT]),
    Split([[u8; CARD_TYPE_COUNT]; 2]),
}

/// `[move_type, payload]`.
pub type WireMove = (u8, Payload);

/// Engine-to-client message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// A card was drawn into the client's hand.
    DrawCard { card: CardType },
    /// The client must pick one of `legal_moves`.
    MoveReq {
        round: u32,
        hand: CardCounts,
        pending_offer: Option<[[u8; CARD_TYPE_COUNT]; 2]>,
        legal_moves: Vec<WireMove>,
    },
    /// Round over; `stashes` is the opponent's revealed stash.
    StashReq { round: u32, stashes: CardCounts },
    /// Game over; no answer expected.
    Winner { desc: String },
}

/// Client-to-engine reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer<T> {
    pub ans: T,
}

/// Encode a move. Resolutions need the offer they answer.
pub fn encode_move(mv: &Move, pending: Option<&PendingOffer>) -> Result<WireMove> {
    let counts = |cards: CardCounts| cards.as_array();
    let wire = match *mv {
        Move::Stash(card) => (STASH, Payload::Counts(counts(CardCounts::single(card)))),
        Move::Trash(..) => (TRASH, Payload::Counts(counts(CardCounts::from_cards(mv.hand_cards())))),
        Move::OfferOneTwo(..) => (
            OFFER_ONE_TWO,
            Payload::Counts(counts(CardCounts::from_cards(mv.hand_cards()))),
        ),
        Move::OfferTwoTwo(first, second) => (
            OFFER_TWO_TWO,
            Payload::Split([counts(first.counts()), counts(second.counts())]),
        ),
        Move::ResolveOneTwo(kept) => {
            let Some(PendingOffer::OneTwo(triple)) = pending else {
                return Err(missing_offer(mv));
            };
            let mut rest = *triple;
            if !rest.remove(kept) {
                return Err(EngineError::Transport(format!("{} keeps a card not on offer", mv)));
            }
            (
                RESOLVE_ONE_TWO,
                Payload::Split([counts(CardCounts::single(kept)), counts(rest)]),
            )
        }
        Move::ResolveTwoTwo(take_first) => {
            let Some(PendingOffer::TwoTwo(first, second)) = pending else {
                return Err(missing_offer(mv));
            };
            let (kept, returned) = if take_first {
                (first, second)
            } else {
                (second, first)
            };
            (RESOLVE_TWO_TWO, Payload::Split([counts(*kept), counts(*returned)]))
        }
    };
    Ok(wire)
}

/// Decode a move sent by a client.
///
/// Resolutions must split the pending offer exactly. Everything else is only
/// checked for shape; legality is the engine's concern.
pub fn decode_move(wire: &WireMove, pending: Option<&PendingOffer>) -> Result<Move> {
    let malformed = || EngineError::Transport(format!("malformed move {:?}", wire));

    match *wire {
        (STASH, Payload::Counts(raw)) => match cards_of(raw, 1)?.as_slice() {
            [card] => Ok(Move::Stash(*card)),
            _ => Err(malformed()),
        },
        (TRASH, Payload::Counts(raw)) => match cards_of(raw, 2)?.as_slice() {
            [a, b] => Ok(Move::trash(*a, *b)),
            _ => Err(malformed()),
        },
        (OFFER_ONE_TWO, Payload::Counts(raw)) => match cards_of(raw, 3)?.as_slice() {
            [a, b, c] => Ok(Move::offer_one_two(*a, *b, *c)),
            _ => Err(malformed()),
        },
        (OFFER_TWO_TWO, Payload::Split([first, second])) => {
            Ok(Move::offer_two_two(pair_of(first)?, pair_of(second)?))
        }
        (RESOLVE_ONE_TWO, Payload::Split([kept, returned])) => {
            let Some(PendingOffer::OneTwo(triple)) = pending else {
                return Err(missing_pending("resolve-1-2"));
            };
            let card = match cards_of(kept, 1)?.as_slice() {
                [card] => *card,
                _ => return Err(malformed()),
            };
            cards_of(returned, 2)?;
            if CardCounts::from_array(kept).plus(&CardCounts::from_array(returned)) != *triple {
                return Err(EngineError::Transport(format!(
                    "split {:?} does not match the offered cards {}",
                    wire.1, triple
                )));
            }
            Ok(Move::ResolveOneTwo(card))
        }
        (RESOLVE_TWO_TWO, Payload::Split([kept, returned])) => {
            let Some(PendingOffer::TwoTwo(first, second)) = pending else {
                return Err(missing_pending("resolve-2-2"));
            };
            let split = (CardCounts::from_array(kept), CardCounts::from_array(returned));
            if split == (*first, *second) {
                Ok(Move::ResolveTwoTwo(true))
            } else if split == (*second, *first) {
                Ok(Move::ResolveTwoTwo(false))
            } else {
                Err(EngineError::Transport(format!(
                    "split {:?} does not match the offered pairs {} and {}",
                    wire.1, first, second
                )))
            }
        }
        _ => Err(malformed()),
    }
}

fn cards_of(raw: [u8; CARD_TYPE_COUNT], expected: u32) -> Result<Vec<CardType>> {
    let counts = CardCounts::from_array(raw);
    if counts.total() != expected {
        return Err(EngineError::Transport(format!(
            "expected {} cards, got {}",
            expected, counts
        )));
    }
    Ok(counts.to_cards())
}

fn pair_of(raw: [u8; CARD_TYPE_COUNT]) -> Result<CardPair> {
    match cards_of(raw, 2)?.as_slice() {
        [a, b] => Ok(CardPair::new(*a, *b)),
        _ => Err(EngineError::Transport("pair must hold two cards".into())),
    }
}

fn missing_pending(kind: &str) -> EngineError {
    EngineError::Transport(format!("{} without a matching pending offer", kind))
}

fn missing_offer(mv: &Move) -> EngineError {
    EngineError::Transport(format!("{} does not answer the pending offer", mv))
}
