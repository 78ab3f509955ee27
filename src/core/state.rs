//! Game state: public and private information.
//!
//! ## GameState
//!
//! Observable by both players:
//! - Round counter, round starter, acting player
//! - Action-card availability per player
//! - Gift piles, pending offer, hand sizes, draw pile size
//! - Leading player per card type (carried across rounds)
//! - Redacted move history of the current round
//!
//! ## PrivateInfoSet
//!
//! Known only to its owner:
//! - Hand
//! - Stashed card (revealed at round end)
//! - Trashed cards
//! - Legal moves for the current turn (empty when not acting)

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::{MOVES_PER_ROUND, RESPONDER_HAND_SIZE, STARTER_HAND_SIZE};
use super::moves::{ActionFlags, Move, MoveRecord, PendingOffer, PublicMove};
use super::player::{PlayerId, PlayerMap};
use crate::cards::{CardCounts, CardType, CARD_TYPE_COUNT, DECK_SIZE};

/// Public game state - observable by both players.
///
/// Uses an `im` vector for the history so snapshots clone in O(1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Player entitled to move.
    pub acting_player: PlayerId,

    /// Round number (starts at 1).
    pub round: u32,

    /// Player who was dealt 7 cards and moves first this round.
    pub round_starter: PlayerId,

    /// Remaining action cards per player.
    pub action_flags: PlayerMap<ActionFlags>,

    /// Cards won this round through offers.
    pub gifts: PlayerMap<CardCounts>,

    /// Offer waiting for the acting player's decision.
    pub pending_offer: Option<PendingOffer>,

    /// Leading player per card type. Survives round resets.
    pub leaders: [Option<PlayerId>; CARD_TYPE_COUNT],

    /// Hand sizes (public knowledge).
    pub hand_sizes: PlayerMap<u8>,

    /// Moves applied so far this round.
    pub moves_this_round: u8,

    /// Cards left in the draw pile.
    pub draw_pile_size: u8,

    /// Moves of the current round, stash and trash contents redacted.
    pub history: Vector<MoveRecord>,
}

impl GameState {
    /// Player starting `round`: `FIRST` on odd rounds, `SECOND` on even ones.
    #[must_use]
    pub fn starter_for_round(round: u32) -> PlayerId {
        if round % 2 == 1 {
            PlayerId::FIRST
        } else {
            PlayerId::SECOND
        }
    }

    /// Fresh state for the start of a round.
    ///
    /// Everything is reset except the leaders, which carry over.
    #[must_use]
    pub fn new_round(round: u32, leaders: [Option<PlayerId>; CARD_TYPE_COUNT]) -> Self {
        let starter = Self::starter_for_round(round);
        let mut hand_sizes = PlayerMap::with_value(RESPONDER_HAND_SIZE);
        hand_sizes[starter] = STARTER_HAND_SIZE;

        Self {
            acting_player: starter,
            round,
            round_starter: starter,
            action_flags: PlayerMap::default(),
            gifts: PlayerMap::default(),
            pending_offer: None,
            leaders,
            hand_sizes,
            moves_this_round: 0,
            draw_pile_size: (DECK_SIZE as u8) - STARTER_HAND_SIZE - RESPONDER_HAND_SIZE,
            history: Vector::new(),
        }
    }

    /// Check whether `player` currently leads `card`.
    #[must_use]
    pub fn is_leading(&self, player: PlayerId, card: CardType) -> bool {
        self.leaders[card.index()] == Some(player)
    }

    /// Card types `player` currently leads.
    pub fn led_types(&self, player: PlayerId) -> impl Iterator<Item = CardType> + '_ {
        CardType::all().filter(move |&card| self.is_leading(player, card))
    }

    /// Moves left in this round.
    #[must_use]
    pub fn moves_remaining(&self) -> u8 {
        MOVES_PER_ROUND - self.moves_this_round
    }

    /// History entries of one player, oldest first.
    pub fn moves_by(&self, player: PlayerId) -> impl Iterator<Item = &MoveRecord> + '_ {
        self.history.iter().filter(move |r| r.player == player)
    }

    /// Append a history entry and advance the move counter.
    pub fn record(&mut self, player: PlayerId, action: PublicMove) {
        self.history.push_back(MoveRecord {
            player,
            round: self.round,
            sequence: self.moves_this_round,
            action,
        });
        self.moves_this_round += 1;
    }
}

/// Private information of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateInfoSet {
    /// Owner of this information.
    pub player: PlayerId,

    /// Cards in hand.
    pub hand: CardCounts,

    /// Stashed card, hidden from the opponent until round end.
    pub stash: Option<CardType>,

    /// Trashed cards (out of play for the round).
    pub trash: CardCounts,

    /// Legal moves for the current turn. Empty unless this player is acting.
    pub legal_moves: Vec<Move>,
}

impl PrivateInfoSet {
    /// Fresh infoset holding a dealt hand.
    #[must_use]
    pub fn new(player: PlayerId, hand: CardCounts) -> Self {
        Self {
            player,
            hand,
            stash: None,
            trash: CardCounts::EMPTY,
            legal_moves: Vec::new(),
        }
    }

    /// The stash as a multiset (empty before the stash action).
    #[must_use]
    pub fn stash_counts(&self) -> CardCounts {
        self.stash.map(CardCounts::single).unwrap_or_default()
    }

    /// Check membership in the cached legal-move list.
    #[must_use]
    pub fn is_legal(&self, mv: &Move) -> bool {
        self.legal_moves.contains(mv)
    }
}
