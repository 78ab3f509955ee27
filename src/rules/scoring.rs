//! Majority scoring and termination.
//!
//! At round end each player's gifts plus stash are compared per card type.
//! A strict majority hands the type to that player; a tie leaves the previous
//! leader (possibly nobody) in place.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCounts, CardType, CARD_TYPE_COUNT};
use crate::core::{GameConfig, PlayerId, PlayerMap};

/// Leading player per card type.
pub type Leaders = [Option<PlayerId>; CARD_TYPE_COUNT];

/// What a player has secured through led card types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Sum of point values of led types.
    pub points: u32,
    /// Number of led types.
    pub majorities: usize,
}

/// Recompute leaders from round totals. Ties keep the previous owner.
pub fn update_leaders(leaders: &mut Leaders, totals: &PlayerMap<CardCounts>) {
    for card in CardType::all() {
        let first = totals[PlayerId::FIRST][card];
        let second = totals[PlayerId::SECOND][card];
        if first > second {
            leaders[card.index()] = Some(PlayerId::FIRST);
        } else if second > first {
            leaders[card.index()] = Some(PlayerId::SECOND);
        }
    }
}

/// Points and majority count per player.
#[must_use]
pub fn standings(leaders: &Leaders) -> PlayerMap<Standing> {
    let mut standings = PlayerMap::<Standing>::default();
    for card in CardType::all() {
        if let Some(owner) = leaders[card.index()] {
            standings[owner].points += card.points() as u32;
            standings[owner].majorities += 1;
        }
    }
    standings
}

/// The winner, if any threshold is met.
///
/// Thresholds are checked in a fixed order: `FIRST` points, `SECOND` points,
/// `FIRST` majorities, `SECOND` majorities.
#[must_use]
pub fn winner(leaders: &Leaders, config: &GameConfig) -> Option<PlayerId> {
    let standings = standings(leaders);

    PlayerId::all()
        .find(|&p| standings[p].points >= config.winning_points)
        .or_else(|| PlayerId::all().find(|&p| standings[p].majorities >= config.winning_majorities))
}

#[cfg(test)]
mod tests {
    use super::*;

    const P0: PlayerId = PlayerId::FIRST;
    const P1: PlayerId = PlayerId::SECOND;

    fn totals(first: [u8; 7], second: [u8; 7]) -> PlayerMap<CardCounts> {
        PlayerMap::from_pair(CardCounts::from_array(first), CardCounts::from_array(second))
    }

    #[test]
    fn test_strict_majority_flips() {
        let mut leaders: Leaders = [Some(P1); 7];
        update_leaders(&mut leaders, &totals([2, 0, 0, 0, 0, 0, 0], [1, 0, 0, 0, 0, 0, 0]));

        assert_eq!(leaders[0], Some(P0));
        assert_eq!(leaders[1], Some(P1));
    }

    #[test]
    fn test_tie_retains_previous_leader() {
        let mut leaders: Leaders = [None; 7];
        leaders[3] = Some(P0);

        update_leaders(&mut leaders, &totals([0, 0, 0, 1, 1, 0, 0], [0, 0, 0, 1, 1, 0, 0]));

        assert_eq!(leaders[3], Some(P0));
        assert_eq!(leaders[4], None);
    }

    #[test]
    fn test_eleven_points_wins() {
        // Types worth 2 + 2 + 3 + 4 = 11.
        let mut leaders: Leaders = [None; 7];
        for i in [0, 1, 3, 5] {
            leaders[i] = Some(P1);
        }

        let standings = standings(&leaders);
        assert_eq!(standings[P1].points, 11);
        assert_eq!(winner(&leaders, &GameConfig::default()), Some(P1));
    }

    #[test]
    fn test_four_majorities_wins() {
        // 2 + 2 + 2 + 3 = 9 points, but four types.
        let mut leaders: Leaders = [None; 7];
        for i in [0, 1, 2, 3] {
            leaders[i] = Some(P0);
        }
        assert_eq!(winner(&leaders, &GameConfig::default()), Some(P0));
    }

    #[test]
    fn test_points_take_precedence_over_majorities() {
        // FIRST leads four cheap types (9 points); SECOND leads 3 + 4 + 5 = 12.
        let leaders: Leaders = [Some(P0), Some(P0), Some(P0), Some(P0), Some(P1), Some(P1), Some(P1)];
        assert_eq!(winner(&leaders, &GameConfig::default()), Some(P1));
    }

    #[test]
    fn test_no_winner_below_thresholds() {
        let leaders: Leaders = [Some(P0), Some(P1), Some(P0), Some(P1), None, None, Some(P0)];
        assert_eq!(winner(&leaders, &GameConfig::default()), None);
    }
}
