//! Game models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{GameId, UserId};

/// FEN of the standard starting position.
pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => f.write_str("white"),
            Side::Black => f.write_str("black"),
        }
    }
}

/// One half-move in UCI notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub player: Side,
    #[serde(rename = "move")]
    pub uci: String,
}

/// A game as listed in the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    pub game_id: GameId,
    #[serde(with = "super::time")]
    pub start_time: DateTime<Utc>,
    #[serde(default, with = "super::time::option")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub moves: Vec<Move>,
}

impl GameSummary {
    /// Whether the game has a result.
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }
}

/// Full game record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub game_id: GameId,
    pub user_id: UserId,
    #[serde(with = "super::time")]
    pub start_time: DateTime<Utc>,
    #[serde(default, with = "super::time::option")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub moves: Vec<Move>,
    #[serde(default)]
    pub fen_positions: Vec<String>,
}

impl Game {
    /// Latest position, or the starting one for an empty record.
    pub fn current_fen(&self) -> &str {
        self.fen_positions
            .last()
            .map(String::as_str)
            .unwrap_or(INITIAL_FEN)
    }
}

/// Reply to starting a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGame {
    #[serde(default)]
    pub message: String,
    pub game_id: GameId,
    pub fen: String,
}

/// Reply to a move.
///
/// When the player's own move ends the game the backend sends only
/// `message` and `result`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveOutcome {
    #[serde(default)]
    pub ai_move: Option<String>,
    #[serde(default)]
    pub fen: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
}

impl MoveOutcome {
    /// Whether the game ended with this exchange.
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }
}

/// Reply to a board reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetReply {
    pub fen: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryReply {
    #[serde(default)]
    pub games: Vec<GameSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GameReply {
    pub game: Game,
}
