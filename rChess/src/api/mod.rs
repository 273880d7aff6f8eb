//! API modules.

mod account;
mod game;

pub use account::AuthApi;
pub use game::GameApi;
