//! Game pages.

use async_trait::async_trait;
use rchess::{BoardRenderer, Error, View, ViewContext};
use rust_i18n::t;
use std::sync::Arc;

use crate::handlers::game::{GameRow, GameView};
use crate::output::{print_hint, print_item, print_table, OutputFormat};

/// Starts a game against the engine and shows the board.
pub struct AiChessView {
    pub board: Arc<dyn BoardRenderer>,
    pub format: OutputFormat,
}

#[async_trait]
impl View for AiChessView {
    async fn render(&self, ctx: &ViewContext<'_>) -> rchess::Result<()> {
        let game = ctx.client().games().start().await?;
        let view = GameView::from_new_game(&game, self.board.as_ref())?;

        print_item(&view, self.format);
        print_hint(t!("next_move_hint", id = &view.id));
        Ok(())
    }
}

/// Lists past games.
pub struct GameHistoryView {
    pub format: OutputFormat,
}

#[async_trait]
impl View for GameHistoryView {
    async fn render(&self, ctx: &ViewContext<'_>) -> rchess::Result<()> {
        let games = ctx.client().games().history().await?;
        let rows: Vec<GameRow> = games.iter().map(GameRow::from).collect();
        let first = rows.first().map(|r| r.id.clone());

        print_table(rows, self.format);
        if let Some(id) = first {
            print_hint(t!("open_game_hint", id = id));
        }
        Ok(())
    }
}

/// Shows one game at its final position.
pub struct GameDetailView {
    pub board: Arc<dyn BoardRenderer>,
    pub format: OutputFormat,
}

#[async_trait]
impl View for GameDetailView {
    async fn render(&self, ctx: &ViewContext<'_>) -> rchess::Result<()> {
        let game_id = ctx
            .param("game_id")
            .ok_or_else(|| Error::invalid("missing game id"))?;

        let game = ctx.client().games().get(game_id).await?;
        let view = GameView::from_game(&game, self.board.as_ref())?;

        print_item(&view, self.format);
        Ok(())
    }
}
