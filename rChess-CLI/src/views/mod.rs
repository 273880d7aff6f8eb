//! Terminal pages, one per route.

mod account;
mod game;

use rchess::{AppBuilder, BoardRenderer, ViewId};
use std::sync::Arc;

use crate::output::OutputFormat;

pub use account::{HomeView, LoginView, RegisterView};
pub use game::{AiChessView, GameDetailView, GameHistoryView};

/// Register every page. Pages that draw boards get `board`.
pub fn register(
    builder: AppBuilder,
    board: Arc<dyn BoardRenderer>,
    format: OutputFormat,
) -> AppBuilder {
    builder
        .view(ViewId::Home, HomeView { format })
        .view(ViewId::Register, RegisterView)
        .view(ViewId::Login, LoginView)
        .view(
            ViewId::AiChess,
            AiChessView {
                board: board.clone(),
                format,
            },
        )
        .view(ViewId::GameHistory, GameHistoryView { format })
        .view(ViewId::GameDetail, GameDetailView { board, format })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rchess::{App, BoardStyle, TextBoard};

    #[test]
    fn test_every_route_has_a_page() {
        let board = Arc::new(TextBoard::new(BoardStyle::Ascii));
        let app = register(App::builder(), board, OutputFormat::Plain).build();
        assert!(app.is_ok());
    }

    #[tokio::test]
    async fn test_protected_page_without_login_shows_login() {
        let board = Arc::new(TextBoard::new(BoardStyle::Ascii));
        let app = register(App::builder(), board, OutputFormat::Plain)
            .build()
            .unwrap();

        let navigation = app.open("/game-history").await.unwrap();
        assert_eq!(navigation.location.view(), ViewId::Login);
        assert_eq!(app.router().history(), vec!["/login"]);
    }
}
