//! Game configuration.
//!
//! The card catalog and the round structure are fixed by the rules; what a
//! session may tune is the seed, the winning thresholds, and an optional
//! round cap for batch runs.

use serde::{Deserialize, Serialize};

/// Moves applied in every complete round: 4 actions and 2 resolutions per player.
pub const MOVES_PER_ROUND: u8 = 12;

/// Hand size of the player starting a round.
pub const STARTER_HAND_SIZE: u8 = 7;

/// Hand size of the other player.
pub const RESPONDER_HAND_SIZE: u8 = 6;

/// Configuration for one game.
///
/// ```
/// use hanamikoji::core::GameConfig;
///
/// let config = GameConfig::default().with_seed(7).with_max_rounds(20);
/// assert_eq!(config.winning_points, 11);
/// assert_eq!(config.max_rounds, Some(20));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for every shuffle in the game.
    pub seed: u64,

    /// Led point value that ends the game.
    pub winning_points: u32,

    /// Number of led card types that ends the game.
    pub winning_majorities: usize,

    /// End the game as a draw after this many rounds. `None` for unlimited.
    pub max_rounds: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            winning_points: 11,
            winning_majorities: 4,
            max_rounds: None,
        }
    }
}

impl GameConfig {
    /// Create a config with the standard thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the round cap.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Set the winning point threshold.
    #[must_use]
    pub fn with_winning_points(mut self, points: u32) -> Self {
        self.winning_points = points;
        self
    }

    /// Set the winning majority-count threshold.
    #[must_use]
    pub fn with_winning_majorities(mut self, majorities: usize) -> Self {
        self.winning_majorities = majorities;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_structure() {
        // 7 + 6 dealt, 7 drawn: each player spends 1 + 2 + 3 + 4 cards.
        let dealt = STARTER_HAND_SIZE as u32 + RESPONDER_HAND_SIZE as u32;
        assert_eq!(dealt + 7, 2 * 10);
        assert_eq!(MOVES_PER_ROUND, 2 * (4 + 2));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"seed": 99}"#).unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.winning_points, 11);
        assert_eq!(config.winning_majorities, 4);
        assert_eq!(config.max_rounds, None);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = GameConfig::new().with_seed(3).with_max_rounds(5);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
