//! The game state machine.
//!
//! `Game` owns the complete state: the public `GameState`, both players'
//! `PrivateInfoSet`s, the draw pile and the shuffle RNG. Players only ever see
//! the public state plus their own infoset.
//!
//! ## Turn cadence
//!
//! - Stash / trash: the turn passes to the opponent, who draws a card.
//! - Offer: the turn passes to the opponent without a draw; their only legal
//!   moves are resolutions.
//! - Resolution: the resolver keeps the turn, draws a card, and then plays
//!   one of their own action cards.
//!
//! After the 12th move of a round the stashes are revealed, leaders are
//! updated, and either the game ends or the next round is dealt.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::movegen;
use super::scoring::{self, Leaders, Standing};
use crate::cards::{CardCounts, CardType, CARD_TYPE_COUNT};
use crate::core::{
    ActionCard, GameConfig, GameRng, GameState, Move, OfferKind, PendingOffer, PlayerId, PlayerMap,
    PrivateInfoSet, PublicMove, MOVES_PER_ROUND, RESPONDER_HAND_SIZE, STARTER_HAND_SIZE,
};
use crate::error::{EngineError, Result};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Round cap reached without a winner.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The winner, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// What the engine is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The player must use one of their action cards.
    AwaitingMove(PlayerId),
    /// The player must answer the opponent's offer.
    AwaitingResolution(PlayerId, OfferKind),
    /// No more moves are accepted.
    GameOver(GameResult),
}

/// Revealed information at the end of a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    /// Stashed cards, now public.
    pub stashes: PlayerMap<Option<CardType>>,
    /// Gifts plus stash per player.
    pub totals: PlayerMap<CardCounts>,
    /// Leaders after this round.
    pub leaders: Leaders,
    pub standings: PlayerMap<Standing>,
}

/// What happened as a result of one applied move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The round goes on.
    Continue,
    /// The round ended undecided and the next round has been dealt.
    RoundEnded(RoundSummary),
    /// The round ended and the game is over.
    GameOver {
        summary: RoundSummary,
        result: GameResult,
    },
}

/// Hands and draw pile for one round. Cards are drawn from the end of the pile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    pub hands: PlayerMap<CardCounts>,
    pub draw_pile: Vec<CardType>,
}

impl Deal {
    /// Shuffle the full deck and deal 7 cards to the round starter, 6 to the other.
    pub fn shuffled(round: u32, rng: &mut GameRng) -> Self {
        let mut deck = rng.shuffled_deck();

        let dealt = (STARTER_HAND_SIZE + RESPONDER_HAND_SIZE) as usize;
        let draw_pile = deck.split_off(dealt);
        let (starter_cards, responder_cards) = deck.split_at(STARTER_HAND_SIZE as usize);

        let starter = GameState::starter_for_round(round);
        let mut hands = PlayerMap::with_value(CardCounts::EMPTY);
        hands[starter] = starter_cards.iter().copied().collect();
        hands[starter.opponent()] = responder_cards.iter().copied().collect();

        Self { hands, draw_pile }
    }

    /// Check hand sizes for `round` and that the deal uses exactly the supply.
    pub fn validate(&self, round: u32) -> Result<()> {
        let starter = GameState::starter_for_round(round);
        let expected = [
            (starter, STARTER_HAND_SIZE),
            (starter.opponent(), RESPONDER_HAND_SIZE),
        ];
        for (player, size) in expected {
            let held = self.hands[player].total();
            if held != size as u32 {
                return Err(EngineError::InvalidDeal(format!(
                    "{} holds {} cards, expected {}",
                    player, held, size
                )));
            }
        }

        let all = self.hands[PlayerId::FIRST]
            .plus(&self.hands[PlayerId::SECOND])
            .plus(&self.draw_pile.iter().copied().collect());
        if all != CardCounts::SUPPLY {
            return Err(EngineError::InvalidDeal(format!(
                "deal uses {} but the supply is {}",
                all,
                CardCounts::SUPPLY
            )));
        }
        Ok(())
    }
}

/// Complete game: public state, both private infosets, draw pile and RNG.
///
/// `apply` is a pure transition returning the next game; `apply_in_place`
/// mutates. Both reject moves outside the acting player's cached legal set
/// before touching any state. Engine faults found after a move was applied
/// (`NoLegalMoves`, `SupplyViolation`) leave `apply_in_place` mid-transition;
/// `apply` never changes `self`.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    infosets: PlayerMap<PrivateInfoSet>,
    draw_pile: Vec<CardType>,
    rng: GameRng,
    result: Option<GameResult>,
    last_draw: Option<(PlayerId, CardType)>,
}

impl Game {
    /// Start a game, shuffling with `config.seed`.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let mut rng = GameRng::new(config.seed);
        let deal = Deal::shuffled(1, &mut rng);
        Self::with_deal(config, rng, deal)
    }

    /// Start a game from a chosen first-round deal.
    ///
    /// Later rounds are shuffled from `config.seed`.
    pub fn from_deal(config: GameConfig, deal: Deal) -> Result<Self> {
        deal.validate(1)?;
        let rng = GameRng::new(config.seed);
        Ok(Self::with_deal(config, rng, deal))
    }

    fn with_deal(config: GameConfig, rng: GameRng, deal: Deal) -> Self {
        let mut game = Self {
            config,
            state: GameState::new_round(1, [None; CARD_TYPE_COUNT]),
            infosets: PlayerMap::new(|p| PrivateInfoSet::new(p, CardCounts::EMPTY)),
            draw_pile: Vec::new(),
            rng,
            result: None,
            last_draw: None,
        };
        game.start_round(1, deal);
        game
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Public state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// A player's private information.
    #[must_use]
    pub fn infoset(&self, player: PlayerId) -> &PrivateInfoSet {
        &self.infosets[player]
    }

    #[must_use]
    pub fn acting_player(&self) -> PlayerId {
        self.state.acting_player
    }

    /// Legal moves of the acting player.
    #[must_use]
    pub fn legal_moves(&self) -> &[Move] {
        &self.infosets[self.state.acting_player].legal_moves
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    /// The card drawn by the most recent `apply`, if any.
    #[must_use]
    pub fn last_draw(&self) -> Option<(PlayerId, CardType)> {
        self.last_draw
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if let Some(result) = self.result {
            return Phase::GameOver(result);
        }
        let player = self.state.acting_player;
        match &self.state.pending_offer {
            Some(offer) => Phase::AwaitingResolution(player, offer.kind()),
            None => Phase::AwaitingMove(player),
        }
    }

    // === Transitions ===

    /// Pure transition: the game after `mv`, leaving `self` untouched.
    pub fn apply(&self, mv: &Move) -> Result<(Game, StepOutcome)> {
        let mut next = self.clone();
        let outcome = next.apply_in_place(mv)?;
        Ok((next, outcome))
    }

    /// Apply a move of the acting player.
    ///
    /// A rejected move (`GameOver`, `IllegalMove`) leaves the game unchanged.
    /// `NoLegalMoves` and `SupplyViolation` are raised after the move was
    /// applied and mean the game can no longer be trusted.
    pub fn apply_in_place(&mut self, mv: &Move) -> Result<StepOutcome> {
        if self.result.is_some() {
            return Err(EngineError::GameOver);
        }

        let player = self.state.acting_player;
        if !self.infosets[player].is_legal(mv) {
            warn!(%player, %mv, "rejected move outside the legal set");
            return Err(EngineError::IllegalMove { player, mv: *mv });
        }

        // Resolutions need the pending offer; split it before mutating anything.
        let split = match self.state.pending_offer.as_ref() {
            Some(offer) => Some(
                split_offer(offer, mv).ok_or(EngineError::IllegalMove { player, mv: *mv })?,
            ),
            None => None,
        };

        debug!(
            round = self.state.round,
            sequence = self.state.moves_this_round,
            %player,
            %mv,
            "applying move"
        );
        self.last_draw = None;

        let (next_player, draw) = match (mv.action_card(), split) {
            (Some(card), _) => {
                self.play_action(player, mv, card);
                (player.opponent(), !matches!(card, ActionCard::OfferOneTwo | ActionCard::OfferTwoTwo))
            }
            (None, Some((to_self, to_offerer))) => {
                self.resolve_offer(player, to_self, to_offerer);
                (player, true)
            }
            (None, None) => return Err(EngineError::IllegalMove { player, mv: *mv }),
        };

        if self.state.moves_this_round == MOVES_PER_ROUND {
            return Ok(self.finish_round());
        }

        self.state.acting_player = next_player;
        if draw {
            self.draw_card(next_player);
        }
        self.refresh_legal_moves();

        if cfg!(debug_assertions) {
            self.check_supply()?;
        }
        if self.legal_moves().is_empty() {
            return Err(EngineError::NoLegalMoves(next_player));
        }
        Ok(StepOutcome::Continue)
    }

    fn play_action(&mut self, player: PlayerId, mv: &Move, card: ActionCard) {
        let cards: CardCounts = mv.hand_cards().into_iter().collect();
        let info = &mut self.infosets[player];

        let removed = info.hand.subtract(&cards);
        debug_assert!(removed, "legal move {} not covered by hand {}", mv, info.hand);
        self.state.action_flags[player].consume(card);
        self.state.hand_sizes[player] -= card.cards_used();

        let public = match *mv {
            Move::Stash(stashed) => {
                info.stash = Some(stashed);
                PublicMove::Stash
            }
            Move::Trash(..) => {
                info.trash.merge(&cards);
                PublicMove::Trash
            }
            Move::OfferOneTwo(..) => {
                self.state.pending_offer = Some(PendingOffer::OneTwo(cards));
                PublicMove::OfferOneTwo(cards)
            }
            Move::OfferTwoTwo(first, second) => {
                let (first, second) = (first.counts(), second.counts());
                self.state.pending_offer = Some(PendingOffer::TwoTwo(first, second));
                PublicMove::OfferTwoTwo(first, second)
            }
            Move::ResolveOneTwo(_) | Move::ResolveTwoTwo(_) => unreachable!("resolutions carry no action card"),
        };
        self.state.record(player, public);
    }

    fn resolve_offer(&mut self, player: PlayerId, to_self: CardCounts, to_offerer: CardCounts) {
        let kind = self
            .state
            .pending_offer
            .take()
            .map_or(OfferKind::OneTwo, |offer| offer.kind());

        self.state.gifts[player].merge(&to_self);
        self.state.gifts[player.opponent()].merge(&to_offerer);
        self.state.record(
            player,
            PublicMove::Resolve {
                kind,
                to_self,
                to_offerer,
            },
        );
    }

    fn draw_card(&mut self, player: PlayerId) {
        match self.draw_pile.pop() {
            Some(card) => {
                self.infosets[player].hand.add(card);
                self.state.hand_sizes[player] += 1;
                self.state.draw_pile_size -= 1;
                self.last_draw = Some((player, card));
                trace!(%player, %card, "drew card");
            }
            None => trace!(%player, "draw pile empty, skipping draw"),
        }
    }

    fn refresh_legal_moves(&mut self) {
        for (_, info) in self.infosets.iter_mut() {
            info.legal_moves.clear();
        }

        let player = self.state.acting_player;
        let info = &mut self.infosets[player];
        info.legal_moves = movegen::generate(
            &info.hand,
            &self.state.action_flags[player],
            self.state.pending_offer.as_ref(),
        );
    }

    fn finish_round(&mut self) -> StepOutcome {
        debug_assert!(
            self.infosets.iter().all(|(_, info)| info.hand.is_empty()),
            "round ended with cards in hand"
        );

        let round = self.state.round;
        let stashes = self.infosets.map(|_, info| info.stash);
        let totals = PlayerMap::new(|p| self.state.gifts[p].plus(&self.infosets[p].stash_counts()));

        scoring::update_leaders(&mut self.state.leaders, &totals);
        let leaders = self.state.leaders;
        let summary = RoundSummary {
            round,
            stashes,
            totals,
            leaders,
            standings: scoring::standings(&leaders),
        };
        info!(
            round,
            first_points = summary.standings[PlayerId::FIRST].points,
            second_points = summary.standings[PlayerId::SECOND].points,
            "round finished"
        );

        let capped = self.config.max_rounds.is_some_and(|cap| round >= cap);
        let result = scoring::winner(&leaders, &self.config)
            .map(GameResult::Winner)
            .or(capped.then_some(GameResult::Draw));

        if let Some(result) = result {
            self.result = Some(result);
            for (_, info) in self.infosets.iter_mut() {
                info.legal_moves.clear();
            }
            info!(round, ?result, "game over");
            return StepOutcome::GameOver { summary, result };
        }

        let deal = Deal::shuffled(round + 1, &mut self.rng);
        self.start_round(round + 1, deal);
        StepOutcome::RoundEnded(summary)
    }

    fn start_round(&mut self, round: u32, deal: Deal) {
        self.state = GameState::new_round(round, self.state.leaders);
        self.state.draw_pile_size = deal.draw_pile.len() as u8;
        self.infosets = PlayerMap::new(|p| PrivateInfoSet::new(p, deal.hands[p]));
        self.draw_pile = deal.draw_pile;
        self.refresh_legal_moves();
        debug!(round, starter = %self.state.round_starter, "round dealt");
    }

    // === Invariants ===

    /// Verify that every card of the supply is accounted for exactly once.
    pub fn check_supply(&self) -> Result<()> {
        let pending = self
            .state
            .pending_offer
            .map(|offer| offer.cards())
            .unwrap_or_default();
        let pile: CardCounts = self.draw_pile.iter().copied().collect();

        let mut all = pending.plus(&pile);
        for (player, info) in self.infosets.iter() {
            all.merge(&info.hand);
            all.merge(&info.trash);
            all.merge(&info.stash_counts());
            all.merge(&self.state.gifts[player]);
        }

        match CardType::all().find(|&card| all[card] != card.supply()) {
            Some(card) => Err(EngineError::SupplyViolation {
                card,
                expected: card.supply(),
                found: all[card] as u32,
            }),
            None => Ok(()),
        }
    }
}

/// Cards kept by the resolver and cards returned to the offerer.
fn split_offer(offer: &PendingOffer, mv: &Move) -> Option<(CardCounts, CardCounts)> {
    match (offer, mv) {
        (PendingOffer::OneTwo(triple), Move::ResolveOneTwo(kept)) => {
            let mut rest = *triple;
            rest.remove(*kept).then(|| (CardCounts::single(*kept), rest))
        }
        (PendingOffer::TwoTwo(first, second), Move::ResolveTwoTwo(true)) => Some((*first, *second)),
        (PendingOffer::TwoTwo(first, second), Move::ResolveTwoTwo(false)) => Some((*second, *first)),
        _ => None,
    }
}
