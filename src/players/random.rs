use super::Player;
use crate::core::{GameRng, GameState, Move, PrivateInfoSet};
use crate::error::{EngineError, Result};

/// Uniform random player.
///
/// Selects uniformly from legal moves.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn act(&mut self, _state: &GameState, info: &PrivateInfoSet) -> Result<Move> {
        self.rng
            .choose(&info.legal_moves)
            .copied()
            .ok_or(EngineError::NoLegalMoves(info.player))
    }
}

/// Deterministic player taking the first legal move.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstMovePlayer;

impl Player for FirstMovePlayer {
    fn name(&self) -> &str {
        "first-move"
    }

    fn act(&mut self, _state: &GameState, info: &PrivateInfoSet) -> Result<Move> {
        info.legal_moves
            .first()
            .copied()
            .ok_or(EngineError::NoLegalMoves(info.player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCounts, CardType, CARD_TYPE_COUNT};
    use crate::core::PlayerId;

    fn infoset(moves: Vec<Move>) -> PrivateInfoSet {
        let mut info = PrivateInfoSet::new(PlayerId::SECOND, CardCounts::EMPTY);
        info.legal_moves = moves;
        info
    }

    #[test]
    fn test_random_player_picks_legal_move() {
        let state = GameState::new_round(1, [None; CARD_TYPE_COUNT]);
        let moves = vec![Move::Stash(CardType::new(0)), Move::Stash(CardType::new(4))];
        let info = infoset(moves.clone());

        let mut player = RandomPlayer::new(42);
        for _ in 0..20 {
            assert!(moves.contains(&player.act(&state, &info).unwrap()));
        }
    }

    #[test]
    fn test_random_player_same_seed_same_choices() {
        let state = GameState::new_round(1, [None; CARD_TYPE_COUNT]);
        let info = infoset((0..7).map(|i| Move::Stash(CardType::new(i))).collect());

        let mut a = RandomPlayer::new(9);
        let mut b = RandomPlayer::new(9);
        for _ in 0..10 {
            assert_eq!(a.act(&state, &info).unwrap(), b.act(&state, &info).unwrap());
        }
    }

    #[test]
    fn test_empty_legal_set_is_an_error() {
        let state = GameState::new_round(1, [None; CARD_TYPE_COUNT]);
        let info = infoset(Vec::new());

        assert!(matches!(
            RandomPlayer::new(1).act(&state, &info),
            Err(EngineError::NoLegalMoves(p)) if p == PlayerId::SECOND
        ));
        assert!(FirstMovePlayer.act(&state, &info).is_err());
    }
}
