//! Rust client library for a web chess service: session storage, an HTTP
//! client that manages bearer tokens, a guarded router and app bootstrap.

pub mod api;
pub mod app;
pub mod board;
pub mod client;
pub mod error;
pub mod models;
pub mod router;
pub mod session;

// Re-export main types
pub use app::{App, AppBuilder, View, ViewContext};
pub use client::{AuthInterceptor, ChessClient, ChessClientBuilder, HttpConfig};
pub use error::{Error, Result};
pub use router::{
    GuardOutcome, Location, Navigation, NavigationGuard, Navigator, RouteRecord, Router, ViewId,
};
pub use session::{FileStore, KeyValueStore, MemoryStore, Session};

// Re-export commonly used models
pub use models::{
    Game, GameId, GameSummary, Move, MoveOutcome, NewGame, Side, TokenStatus, UserId, INITIAL_FEN,
};

// Re-export board types
pub use board::{BoardRenderer, BoardStyle, Position, TextBoard};

// Re-export API types
pub use api::{AuthApi, GameApi};
