//! Shared handlers for commands and views.

pub mod account;
pub mod game;
