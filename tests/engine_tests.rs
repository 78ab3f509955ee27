//! Integration tests for the game state machine.

use hanamikoji::cards::{CardCounts, CardType};
use hanamikoji::core::{
    ActionCard, CardPair, GameConfig, GameRng, GameState, Move, OfferKind, PendingOffer, PlayerId,
    PlayerMap, PublicMove, MOVES_PER_ROUND,
};
use hanamikoji::error::EngineError;
use hanamikoji::rules::{scoring, Deal, Game, GameResult, Phase, StepOutcome};

const P0: PlayerId = PlayerId::FIRST;
const P1: PlayerId = PlayerId::SECOND;

fn c(i: u8) -> CardType {
    CardType::new(i)
}

fn pair(a: u8, b: u8) -> CardPair {
    CardPair::new(c(a), c(b))
}

/// Deal with explicit hands; the draw pile holds the rest in `pile` order
/// (drawn from the end).
fn deal(first: [u8; 7], second: [u8; 7], pile: &[u8]) -> Deal {
    Deal {
        hands: PlayerMap::from_pair(CardCounts::from_array(first), CardCounts::from_array(second)),
        draw_pile: pile.iter().map(|&i| c(i)).collect(),
    }
}

fn offer_deal() -> Deal {
    deal([2, 1, 0, 1, 1, 1, 1], [0, 1, 2, 1, 1, 1, 0], &[3, 4, 5, 5, 6, 6, 6, 6])
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_trash_pair_disables_flag() {
    let mut game = Game::from_deal(
        GameConfig::default(),
        deal([2, 0, 0, 1, 1, 1, 2], [0, 2, 2, 1, 1, 0, 0], &[3, 4, 5, 5, 5, 6, 6, 6]),
    )
    .unwrap();

    assert!(game.legal_moves().contains(&Move::Trash(c(0), c(0))));
    game.apply_in_place(&Move::trash(c(0), c(0))).unwrap();

    let first = game.infoset(P0);
    assert_eq!(first.hand[c(0)], 0);
    assert_eq!(first.trash, CardCounts::from_array([2, 0, 0, 0, 0, 0, 0]));
    assert!(!game.state().action_flags[P0].is_available(ActionCard::Trash));
    assert_eq!(game.state().action_flags[P0].remaining(), 3);
}

#[test]
fn test_offer_one_two_pending_and_resolutions() {
    let mut game = Game::from_deal(GameConfig::default(), offer_deal()).unwrap();

    game.apply_in_place(&Move::offer_one_two(c(0), c(0), c(1))).unwrap();

    let pending = game.state().pending_offer.expect("offer pending");
    assert_eq!(pending, PendingOffer::OneTwo(CardCounts::from_array([2, 1, 0, 0, 0, 0, 0])));
    assert_eq!(game.phase(), Phase::AwaitingResolution(P1, OfferKind::OneTwo));

    let mut moves = game.legal_moves().to_vec();
    moves.sort();
    assert_eq!(moves, vec![Move::ResolveOneTwo(c(0)), Move::ResolveOneTwo(c(1))]);
}

#[test]
fn test_resolver_draws_and_keeps_turn() {
    let mut game = Game::from_deal(GameConfig::default(), offer_deal()).unwrap();
    game.apply_in_place(&Move::offer_one_two(c(0), c(0), c(1))).unwrap();
    let pile_before = game.draw_pile_len();

    game.apply_in_place(&Move::ResolveOneTwo(c(0))).unwrap();

    assert_eq!(game.acting_player(), P1);
    assert_eq!(game.draw_pile_len(), pile_before - 1);
    assert_eq!(game.last_draw(), Some((P1, c(6))));
    assert_eq!(game.state().gifts[P1], CardCounts::single(c(0)));
    assert_eq!(game.state().gifts[P0], CardCounts::from_array([1, 1, 0, 0, 0, 0, 0]));

    let record = game.state().history.back().copied().unwrap();
    assert_eq!(record.player, P1);
    assert_eq!(
        record.action,
        PublicMove::Resolve {
            kind: OfferKind::OneTwo,
            to_self: CardCounts::single(c(0)),
            to_offerer: CardCounts::from_array([1, 1, 0, 0, 0, 0, 0]),
        }
    );
}

#[test]
fn test_two_two_identical_pairs_single_resolution() {
    let mut game = Game::from_deal(
        GameConfig::default(),
        deal([2, 2, 0, 1, 1, 1, 0], [0, 0, 2, 1, 1, 1, 1], &[3, 4, 5, 5, 6, 6, 6, 6]),
    )
    .unwrap();

    game.apply_in_place(&Move::offer_two_two(pair(0, 1), pair(0, 1))).unwrap();
    assert_eq!(game.legal_moves(), &[Move::ResolveTwoTwo(true)]);

    game.apply_in_place(&Move::ResolveTwoTwo(true)).unwrap();
    assert_eq!(game.state().gifts[P0], game.state().gifts[P1]);
}

#[test]
fn test_illegal_moves_leave_game_untouched() {
    let mut game = Game::from_deal(GameConfig::default(), offer_deal()).unwrap();
    let before = game.clone();

    // Not enough cards of type 2, then a resolution with nothing pending.
    for mv in [Move::Stash(c(2)), Move::offer_one_two(c(0), c(0), c(0)), Move::ResolveOneTwo(c(0))] {
        let err = game.apply_in_place(&mv).unwrap_err();
        assert!(matches!(err, EngineError::IllegalMove { .. }), "{:?}", err);
    }

    assert_eq!(game.state(), before.state());
    assert_eq!(game.infoset(P0), before.infoset(P0));
    assert_eq!(game.infoset(P1), before.infoset(P1));
    assert_eq!(game.draw_pile_len(), before.draw_pile_len());
}

#[test]
fn test_used_action_card_is_not_offered_again() {
    let mut game = Game::from_deal(GameConfig::default(), offer_deal()).unwrap();
    game.apply_in_place(&Move::Stash(c(6))).unwrap();
    game.apply_in_place(&Move::Stash(c(1))).unwrap();

    assert_eq!(game.acting_player(), P0);
    assert!(game
        .legal_moves()
        .iter()
        .all(|mv| mv.action_card() != Some(ActionCard::Stash)));
}

/// Scripted round in which FIRST ends up leading types 0, 1, 3 and 5.
#[test]
fn test_eleven_points_win_after_first_round() {
    let mut game = Game::from_deal(
        GameConfig::default(),
        deal(
            [2, 2, 0, 1, 0, 2, 0],
            [0, 0, 2, 0, 2, 0, 2],
            &[3, 6, 6, 5, 6, 5, 4, 3],
        ),
    )
    .unwrap();

    let script = [
        Move::Stash(c(3)),
        Move::trash(c(2), c(2)),
        Move::offer_one_two(c(0), c(0), c(4)),
        Move::ResolveOneTwo(c(4)),
        Move::offer_one_two(c(3), c(4), c(4)),
        Move::ResolveOneTwo(c(3)),
        Move::trash(c(5), c(5)),
        Move::offer_two_two(pair(5, 5), pair(6, 6)),
        Move::ResolveTwoTwo(true),
        Move::offer_two_two(pair(1, 1), pair(6, 6)),
        Move::ResolveTwoTwo(false),
        Move::Stash(c(6)),
    ];

    let (final_move, opening) = script.split_last().unwrap();
    for (i, mv) in opening.iter().enumerate() {
        let outcome = game
            .apply_in_place(mv)
            .unwrap_or_else(|e| panic!("move {} ({}): {}", i, mv, e));
        assert_eq!(outcome, StepOutcome::Continue);
        game.check_supply().unwrap();
    }
    let last = game.apply_in_place(final_move).unwrap();

    let StepOutcome::GameOver { summary, result } = last else {
        panic!("final stash should end the game");
    };
    assert_eq!(result, GameResult::Winner(P0));
    assert_eq!(summary.totals[P0], CardCounts::from_array([2, 2, 0, 2, 0, 2, 0]));
    assert_eq!(summary.stashes, PlayerMap::from_pair(Some(c(3)), Some(c(6))));
    assert_eq!(summary.standings[P0].points, 11);
    assert_eq!(summary.leaders[2], None);
    assert_eq!(summary.leaders[6], Some(P1));

    assert!(game.is_over());
    assert_eq!(game.phase(), Phase::GameOver(GameResult::Winner(P0)));
    assert!(game.legal_moves().is_empty());
    assert!(matches!(game.apply_in_place(&Move::Stash(c(0))), Err(EngineError::GameOver)));
}

// =============================================================================
// Random play
// =============================================================================

/// Play random legal moves, checking invariants after every step.
fn play_random(seed: u64, config: GameConfig) -> (Game, GameResult) {
    let mut game = Game::new(config.with_seed(seed));
    let mut rng = GameRng::new(seed ^ 0xABCD);
    let mut moves_in_round = 0u8;

    loop {
        let mv = *rng.choose(game.legal_moves()).expect("acting player has moves");
        let round = game.state().round;
        let outcome = game.apply_in_place(&mv).unwrap();
        moves_in_round += 1;

        game.check_supply().unwrap();
        for player in PlayerId::all() {
            assert_eq!(game.state().hand_sizes[player] as u32, game.infoset(player).hand.total());
        }
        assert_eq!(game.state().draw_pile_size as usize, game.draw_pile_len());

        match outcome {
            StepOutcome::Continue => assert!(moves_in_round < MOVES_PER_ROUND),
            StepOutcome::RoundEnded(summary) => {
                assert_eq!(moves_in_round, MOVES_PER_ROUND);
                assert_eq!(summary.round, round);
                assert_eq!(scoring::winner(&summary.leaders, game.config()), None);

                // Leaders carry over; everything else is dealt afresh.
                assert_eq!(game.state().leaders, summary.leaders);
                assert_eq!(game.state().round, round + 1);
                assert_eq!(game.state().round_starter, GameState::starter_for_round(round + 1));
                assert!(game.state().gifts.iter().all(|(_, g)| g.is_empty()));
                assert!(game.state().history.is_empty());
                moves_in_round = 0;
            }
            StepOutcome::GameOver { summary, result } => {
                assert_eq!(moves_in_round, MOVES_PER_ROUND);
                if let GameResult::Winner(winner) = result {
                    let standing = summary.standings[winner];
                    assert!(standing.points >= 11 || standing.majorities >= 4);
                }
                return (game, result);
            }
        }
    }
}

#[test]
fn test_random_games_hold_invariants() {
    for seed in 0..40 {
        let (game, result) = play_random(seed, GameConfig::default());
        assert_eq!(game.result(), Some(result));
    }
}

#[test]
fn test_round_cap_ends_game() {
    for seed in 0..10 {
        let (game, result) = play_random(seed, GameConfig::default().with_max_rounds(1));
        assert_eq!(game.state().round, 1);
        if result == GameResult::Draw {
            assert_eq!(scoring::winner(&game.state().leaders, game.config()), None);
        }
    }
}

#[test]
fn test_same_seed_same_game() {
    let (a, ra) = play_random(17, GameConfig::default());
    let (b, rb) = play_random(17, GameConfig::default());
    assert_eq!(ra, rb);
    assert_eq!(a.state(), b.state());
}
