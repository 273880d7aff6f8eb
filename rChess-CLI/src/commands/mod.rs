//! Subcommands.

pub mod auth;
pub mod game;
