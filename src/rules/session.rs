//! Two-player game loop.
//!
//! A `Session` asks the acting player for a move, applies it, and forwards
//! draws, round summaries and the final result to the players' hooks.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::engine::{Game, GameResult, StepOutcome};
use super::scoring::Standing;
use crate::core::{PlayerId, PlayerMap};
use crate::error::Result;
use crate::players::Player;

/// Summary of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub result: GameResult,
    /// Rounds played, including the last one.
    pub rounds: u32,
    /// Moves applied over the whole game.
    pub moves: u32,
    pub standings: PlayerMap<Standing>,
}

/// A game plus the two players taking part in it.
pub struct Session<'a> {
    game: Game,
    players: PlayerMap<Box<dyn Player + 'a>>,
    moves: u32,
}

impl<'a> Session<'a> {
    pub fn new(game: Game, players: PlayerMap<Box<dyn Player + 'a>>) -> Self {
        Self {
            game,
            players,
            moves: 0,
        }
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Moves applied so far.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Ask the acting player for one move and apply it.
    pub fn step(&mut self) -> Result<StepOutcome> {
        let actor = self.game.acting_player();
        let mv = self.players[actor].act(self.game.state(), self.game.infoset(actor))?;
        let outcome = self.game.apply_in_place(&mv)?;
        self.moves += 1;

        if let Some((player, card)) = self.game.last_draw() {
            self.players[player].on_draw(card)?;
        }

        match &outcome {
            StepOutcome::Continue => {}
            StepOutcome::RoundEnded(summary) => {
                for (_, player) in self.players.iter_mut() {
                    player.on_round_end(summary)?;
                }
            }
            StepOutcome::GameOver { summary, result } => {
                for (_, player) in self.players.iter_mut() {
                    player.on_round_end(summary)?;
                    player.on_game_over(result)?;
                }
            }
        }
        Ok(outcome)
    }

    /// Play until the game ends.
    pub fn run(mut self) -> Result<GameOutcome> {
        debug!(
            first = self.players[PlayerId::FIRST].name(),
            second = self.players[PlayerId::SECOND].name(),
            "session started"
        );
        loop {
            if let StepOutcome::GameOver { summary, result } = self.step()? {
                return Ok(GameOutcome {
                    result,
                    rounds: summary.round,
                    moves: self.moves,
                    standings: summary.standings,
                });
            }
        }
    }
}
