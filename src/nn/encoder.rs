//! Feature encoding for learned move evaluation.
//!
//! Transforms a player's view of the game into fixed-width float tensors.
//!
//! ## Layout
//!
//! State features (106 floats, from the perspective of the infoset owner):
//!
//! | offset | width | feature                              |
//! |--------|-------|--------------------------------------|
//! | 0      | 7     | point value per card type            |
//! | 7      | 7     | leader: +1 own, -1 opponent, 0 none  |
//! | 14     | 7     | hand                                 |
//! | 21     | 7     | own stash                            |
//! | 28     | 7     | own trash                            |
//! | 35     | 7     | pending 1-2 offer                    |
//! | 42     | 14    | pending 2-2 offer, both pairs        |
//! | 56     | 4     | own action cards left                |
//! | 60     | 4     | opponent action cards left           |
//! | 64     | 7     | own gifts                            |
//! | 71     | 7     | opponent gifts                       |
//! | 78     | 7     | own gifts plus stash                 |
//! | 85     | 7     | own hand size, one-hot               |
//! | 92     | 7     | opponent hand size, one-hot          |
//! | 99     | 7     | cards not visible to this player     |
//!
//! Each legal move appends a 63-float move vector, giving one 169-float row
//! per move. The move vector has one slot per move type at offsets
//! 0 (stash), 7 (trash), 14 (offer 1-2), 21 (offer 2-2), 35 (resolve 1-2)
//! and 49 (resolve 2-2), filled with the move's wire payload.
//!
//! The history tensor is 12 x 63: the owner's moves of this round
//! right-aligned in rows 0..6, the opponent's right-aligned in rows 6..12.
//! The opponent's stash and trash contents are unknown and encoded as all
//! ones.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCounts, CardType, CARD_TYPE_COUNT, POINTS, SUPPLY};
use crate::core::{ActionFlags, GameState, Move, OfferKind, PendingOffer, PrivateInfoSet, PublicMove};
use crate::error::Result;
use crate::nn::traits::EncodedState;
use crate::transport::{self, Payload};

pub const MOVE_VECTOR_SIZE: usize = 63;
pub const STATE_FEATURE_SIZE: usize = 106;
pub const X_FEATURE_SIZE: usize = STATE_FEATURE_SIZE + MOVE_VECTOR_SIZE;
pub const HISTORY_ROWS: usize = 12;

const OWN_HISTORY_ROWS: usize = HISTORY_ROWS / 2;
const SLOT_OFFSETS: [usize; 6] = [0, 7, 14, 21, 35, 49];

/// Encoded view of one decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// `[legal moves, 169]`, one row per legal move in infoset order.
    pub x_batch: EncodedState,
    /// `[106]`, state features only.
    pub x_no_move: EncodedState,
    /// `[12, 63]`, this round's move history.
    pub history: EncodedState,
}

impl Observation {
    /// Number of encoded moves.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.x_batch.shape.first().copied().unwrap_or(0)
    }

    /// Feature row of the `index`-th legal move.
    #[must_use]
    pub fn row(&self, index: usize) -> &[f32] {
        &self.x_batch.tensor[index * X_FEATURE_SIZE..(index + 1) * X_FEATURE_SIZE]
    }

    /// History repeated once per move: `[legal moves, 12, 63]`.
    #[must_use]
    pub fn history_batch(&self) -> EncodedState {
        let tensor = self.history.tensor.repeat(self.move_count());
        EncodedState::new(tensor, vec![self.move_count(), HISTORY_ROWS, MOVE_VECTOR_SIZE])
    }
}

/// Encodes `(GameState, PrivateInfoSet)` pairs.
#[derive(Clone, Copy, Debug, Default)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Encode the infoset owner's view, with one row per legal move.
    pub fn encode(&self, state: &GameState, info: &PrivateInfoSet) -> Result<Observation> {
        let features = self.state_features(state, info);
        let pending = state.pending_offer.as_ref();

        let mut rows = Vec::with_capacity(info.legal_moves.len() * X_FEATURE_SIZE);
        for mv in &info.legal_moves {
            rows.extend_from_slice(&features);
            rows.extend_from_slice(&move_vector(mv, pending)?);
        }

        Ok(Observation {
            x_batch: EncodedState::new(rows, vec![info.legal_moves.len(), X_FEATURE_SIZE]),
            x_no_move: EncodedState::new(features, vec![STATE_FEATURE_SIZE]),
            history: self.history(state, info),
        })
    }

    /// The 106 state features.
    #[must_use]
    pub fn state_features(&self, state: &GameState, info: &PrivateInfoSet) -> Vec<f32> {
        let me = info.player;
        let opp = me.opponent();

        let (pending_one_two, pending_two_two) = match state.pending_offer {
            Some(PendingOffer::OneTwo(triple)) => (triple, [CardCounts::EMPTY; 2]),
            Some(PendingOffer::TwoTwo(first, second)) => (CardCounts::EMPTY, [first, second]),
            None => (CardCounts::EMPTY, [CardCounts::EMPTY; 2]),
        };
        let own_total = state.gifts[me].plus(&info.stash_counts());

        let mut out = Vec::with_capacity(STATE_FEATURE_SIZE);
        out.extend(POINTS.iter().map(|&p| p as f32));
        out.extend(CardType::all().map(|card| match state.leaders[card.index()] {
            Some(p) if p == me => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        }));
        push_counts(&mut out, &info.hand);
        push_counts(&mut out, &info.stash_counts());
        push_counts(&mut out, &info.trash);
        push_counts(&mut out, &pending_one_two);
        push_counts(&mut out, &pending_two_two[0]);
        push_counts(&mut out, &pending_two_two[1]);
        push_flags(&mut out, &state.action_flags[me]);
        push_flags(&mut out, &state.action_flags[opp]);
        push_counts(&mut out, &state.gifts[me]);
        push_counts(&mut out, &state.gifts[opp]);
        push_counts(&mut out, &own_total);
        push_one_hot(&mut out, state.hand_sizes[me]);
        push_one_hot(&mut out, state.hand_sizes[opp]);

        let seen = info
            .hand
            .plus(&own_total)
            .plus(&info.trash)
            .plus(&state.gifts[opp])
            .plus(&pending_one_two)
            .plus(&pending_two_two[0])
            .plus(&pending_two_two[1]);
        out.extend(SUPPLY.iter().zip(seen.as_array()).map(|(&s, n)| s as f32 - n as f32));

        debug_assert_eq!(out.len(), STATE_FEATURE_SIZE);
        out
    }

    /// This round's history, `[12, 63]`.
    #[must_use]
    pub fn history(&self, state: &GameState, info: &PrivateInfoSet) -> EncodedState {
        let me = info.player;
        let mut z = EncodedState::zeros(vec![HISTORY_ROWS, MOVE_VECTOR_SIZE]);

        // Each player makes at most six moves per round.
        let mut fill = |records: Vec<[f32; MOVE_VECTOR_SIZE]>, end: usize| {
            let start = end - records.len().min(OWN_HISTORY_ROWS);
            let recent = &records[records.len() - (end - start)..];
            for (row, vector) in (start..end).zip(recent) {
                z.tensor[row * MOVE_VECTOR_SIZE..(row + 1) * MOVE_VECTOR_SIZE].copy_from_slice(vector);
            }
        };

        let own = state
            .moves_by(me)
            .map(|r| public_vector(&r.action, Some(info)))
            .collect();
        fill(own, OWN_HISTORY_ROWS);

        let theirs = state
            .moves_by(me.opponent())
            .map(|r| public_vector(&r.action, None))
            .collect();
        fill(theirs, HISTORY_ROWS);

        z
    }
}

fn push_counts(out: &mut Vec<f32>, counts: &CardCounts) {
    out.extend(counts.as_array().iter().map(|&n| n as f32));
}

fn push_flags(out: &mut Vec<f32>, flags: &ActionFlags) {
    out.extend(flags.as_array().iter().map(|&f| if f { 1.0 } else { 0.0 }));
}

fn push_one_hot(out: &mut Vec<f32>, n: u8) {
    out.extend((1..=CARD_TYPE_COUNT as u8).map(|i| if i == n { 1.0 } else { 0.0 }));
}

/// Move vector of a legal move.
pub fn move_vector(mv: &Move, pending: Option<&PendingOffer>) -> Result<[f32; MOVE_VECTOR_SIZE]> {
    let (kind, payload) = transport::encode_move(mv, pending)?;
    Ok(slot_vector(kind, &payload))
}

fn slot_vector(kind: u8, payload: &Payload) -> [f32; MOVE_VECTOR_SIZE] {
    let mut out = [0.0; MOVE_VECTOR_SIZE];
    let offset = SLOT_OFFSETS[kind as usize];
    let values: Vec<u8> = match payload {
        Payload::Counts(counts) => counts.to_vec(),
        Payload::Split([first, second]) => first.iter().chain(second).copied().collect(),
    };
    for (slot, v) in out[offset..].iter_mut().zip(values) {
        *slot = v as f32;
    }
    out
}

/// Move vector of a history entry. `owner` reveals stash and trash contents.
fn public_vector(action: &PublicMove, owner: Option<&PrivateInfoSet>) -> [f32; MOVE_VECTOR_SIZE] {
    let hidden = [1; CARD_TYPE_COUNT];
    let (kind, payload) = match *action {
        PublicMove::Stash => (
            transport::STASH,
            Payload::Counts(owner.map_or(hidden, |info| info.stash_counts().as_array())),
        ),
        PublicMove::Trash => (
            transport::TRASH,
            Payload::Counts(owner.map_or(hidden, |info| info.trash.as_array())),
        ),
        PublicMove::OfferOneTwo(triple) => (transport::OFFER_ONE_TWO, Payload::Counts(triple.as_array())),
        PublicMove::OfferTwoTwo(first, second) => (
            transport::OFFER_TWO_TWO,
            Payload::Split([first.as_array(), second.as_array()]),
        ),
        PublicMove::Resolve {
            kind,
            to_self,
            to_offerer,
        } => (
            match kind {
                OfferKind::OneTwo => transport::RESOLVE_ONE_TWO,
                OfferKind::TwoTwo => transport::RESOLVE_TWO_TWO,
            },
            Payload::Split([to_self.as_array(), to_offerer.as_array()]),
        ),
    };
    slot_vector(kind, &payload)
}

/// Index of the highest score; ties go to the earliest move.
#[must_use]
pub fn argmax(scores: &[f32]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &s)| match best {
            Some((_, b)) if b >= s => best,
            _ => Some((i, s)),
        })
        .map(|(i, _)| i)
}
