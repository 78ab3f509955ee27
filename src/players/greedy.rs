use super::Player;
use crate::core::{GameState, Move, PrivateInfoSet};
use crate::error::{EngineError, Result};
use crate::nn::{argmax, FeatureEncoder, MoveScorer};

/// Plays the legal move its scorer rates highest.
#[derive(Clone, Debug)]
pub struct GreedyPlayer<S> {
    encoder: FeatureEncoder,
    scorer: S,
}

impl<S: MoveScorer> GreedyPlayer<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            encoder: FeatureEncoder::new(),
            scorer,
        }
    }
}

impl<S: MoveScorer> Player for GreedyPlayer<S> {
    fn name(&self) -> &str {
        "greedy"
    }

    fn act(&mut self, state: &GameState, info: &PrivateInfoSet) -> Result<Move> {
        let obs = self.encoder.encode(state, info)?;
        let scores = self.scorer.score(&obs);
        if scores.len() != info.legal_moves.len() {
            return Err(EngineError::InvalidModel(format!(
                "scored {} of {} moves",
                scores.len(),
                info.legal_moves.len()
            )));
        }
        argmax(&scores)
            .map(|i| info.legal_moves[i])
            .ok_or(EngineError::NoLegalMoves(info.player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;
    use crate::core::{GameConfig, PlayerId};
    use crate::nn::{LinearScorer, Observation, UniformScorer, STATE_FEATURE_SIZE, X_FEATURE_SIZE};
    use crate::rules::Game;

    #[test]
    fn test_uniform_scores_pick_first_move() {
        let game = Game::new(GameConfig::default().with_seed(4));
        let player = game.acting_player();

        let mv = GreedyPlayer::new(UniformScorer)
            .act(game.state(), game.infoset(player))
            .unwrap();
        assert_eq!(mv, game.legal_moves()[0]);
    }

    #[test]
    fn test_weights_steer_choice() {
        // Reward the stash slot for the most valuable card type.
        let mut weights = vec![0.0; X_FEATURE_SIZE];
        weights[STATE_FEATURE_SIZE + 6] = 1.0;
        let scorer = LinearScorer::new(weights, 0.0).unwrap();

        let game = Game::new(GameConfig::default().with_seed(4));
        let info = game.infoset(PlayerId::FIRST);
        let mv = GreedyPlayer::new(scorer).act(game.state(), info).unwrap();

        if info.hand[CardType::new(6)] > 0 {
            assert_eq!(mv, Move::Stash(CardType::new(6)));
        } else {
            assert_eq!(mv, game.legal_moves()[0]);
        }
    }

    struct ShortScorer;

    impl MoveScorer for ShortScorer {
        fn score(&self, _obs: &Observation) -> Vec<f32> {
            vec![1.0]
        }
    }

    #[test]
    fn test_mismatched_score_count_is_an_error() {
        let game = Game::new(GameConfig::default().with_seed(4));
        let info = game.infoset(PlayerId::FIRST);
        assert!(matches!(
            GreedyPlayer::new(ShortScorer).act(game.state(), info),
            Err(EngineError::InvalidModel(_))
        ));
    }
}
