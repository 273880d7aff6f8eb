//! Game commands.

use anyhow::Result;
use clap::Subcommand;
use rchess::TextBoard;
use std::sync::Arc;
use rust_i18n::t;

use crate::config::{build_app_with, load_config};
use crate::handlers::game as handlers;
use crate::output::{print_board, print_hint, print_item, print_table, OutputFormat};

#[derive(Subcommand)]
pub enum GameAction {
    /// Start a game against the engine
    New,

    /// Play a move in UCI notation (e2e4, e7e8q)
    #[command(alias = "mv")]
    Move {
        /// Game ID
        game_id: String,
        /// Move in UCI notation
        uci: String,
    },

    /// Reset the engine board
    Reset,

    /// List your games
    #[command(alias = "ls")]
    History,

    /// Show one game
    Show {
        /// Game ID
        game_id: String,
    },
}

pub async fn handle(action: GameAction, format: OutputFormat) -> Result<()> {
    let config = load_config()?;
    let board = Arc::new(TextBoard::new(config.board_style));
    let app = build_app_with(&config, board.clone(), format)?;
    let client = app.client();

    match action {
        GameAction::New => {
            let game = handlers::start(client, &*board).await?;
            print_item(&game, format);
            print_hint(t!("next_move_hint", id = &game.id));
        }
        GameAction::Move { game_id, uci } => {
            let report = handlers::play(client, &*board, &game_id, &uci).await?;
            print_item(&report, format);
        }
        GameAction::Reset => {
            let rendered = handlers::reset(client, &*board).await?;
            print_board(&rendered);
        }
        GameAction::History => {
            let games = handlers::history(client).await?;
            print_table(games, format);
        }
        GameAction::Show { game_id } => {
            let game = handlers::show(client, &*board, &game_id).await?;
            print_item(&game, format);
        }
    }

    Ok(())
}
