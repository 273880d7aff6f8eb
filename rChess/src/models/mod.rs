//! Data models for the chess backend.

mod account;
mod game;
mod ids;
pub(crate) mod time;

pub use account::{Credentials, LoginReply, MessageReply, TokenStatus};
pub use game::{Game, GameSummary, Move, MoveOutcome, NewGame, ResetReply, Side, INITIAL_FEN};
pub(crate) use game::{GameReply, HistoryReply};
pub use ids::{GameId, UserId};
pub use time::parse_timestamp;
