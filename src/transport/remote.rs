use std::io::{BufRead, Write};

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use super::{decode_move, encode_move, Answer, Request, WireMove};
use crate::cards::{CardCounts, CardType, CARD_TYPE_COUNT};
use crate::core::{GameState, Move, PendingOffer, PlayerId, PrivateInfoSet};
use crate::error::{EngineError, Result};
use crate::players::Player;
use crate::rules::{GameResult, RoundSummary};

/// A player on the other end of a line-delimited JSON stream.
pub struct RemotePlayer<R, W> {
    seat: PlayerId,
    reader: R,
    writer: W,
    line: String,
}

impl<R: BufRead, W: Write> RemotePlayer<R, W> {
    pub fn new(seat: PlayerId, reader: R, writer: W) -> Self {
        Self {
            seat,
            reader,
            writer,
            line: String::new(),
        }
    }

    #[must_use]
    pub fn seat(&self) -> PlayerId {
        self.seat
    }

    /// Give back the underlying stream halves.
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn send(&mut self, request: &Request) -> Result<()> {
        serde_json::to_writer(&mut self.writer, request)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        trace!(seat = %self.seat, ?request, "sent request");
        Ok(())
    }

    fn receive<T: DeserializeOwned>(&mut self) -> Result<T> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Err(EngineError::Transport("connection closed".into()));
        }
        let answer: Answer<T> = serde_json::from_str(self.line.trim())?;
        Ok(answer.ans)
    }

    fn acknowledge<T>(&mut self, request: &Request, expected: T) -> Result<()>
    where
        T: DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        self.send(request)?;
        let echoed: T = self.receive()?;
        if echoed != expected {
            return Err(EngineError::Transport(format!(
                "acknowledgement mismatch: expected {:?}, got {:?}",
                expected, echoed
            )));
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Player for RemotePlayer<R, W> {
    fn name(&self) -> &str {
        "remote"
    }

    fn act(&mut self, state: &GameState, info: &PrivateInfoSet) -> Result<Move> {
        let pending = state.pending_offer.as_ref();
        let legal_moves = info
            .legal_moves
            .iter()
            .map(|mv| encode_move(mv, pending))
            .collect::<Result<Vec<WireMove>>>()?;
        let request = Request::MoveReq {
            round: state.round,
            hand: info.hand,
            pending_offer: pending.map(|offer| match offer {
                PendingOffer::OneTwo(triple) => [triple.as_array(), [0; CARD_TYPE_COUNT]],
                PendingOffer::TwoTwo(first, second) => [first.as_array(), second.as_array()],
            }),
            legal_moves,
        };

        self.send(&request)?;
        let wire: WireMove = self.receive()?;
        let mv = decode_move(&wire, pending)?;
        debug!(seat = %self.seat, %mv, "remote move");
        Ok(mv)
    }

    fn on_draw(&mut self, card: CardType) -> Result<()> {
        self.acknowledge(&Request::DrawCard { card }, card.index() as u8)
    }

    fn on_round_end(&mut self, summary: &RoundSummary) -> Result<()> {
        let stashes = summary.stashes[self.seat.opponent()]
            .map(CardCounts::single)
            .unwrap_or_default();
        let request = Request::StashReq {
            round: summary.round,
            stashes,
        };
        self.acknowledge(&request, stashes.as_array())
    }

    fn on_game_over(&mut self, result: &GameResult) -> Result<()> {
        let desc = match result {
            GameResult::Winner(player) => player.name().to_string(),
            GameResult::Draw => "draw".to_string(),
        };
        self.send(&Request::Winner { desc })
    }
}
