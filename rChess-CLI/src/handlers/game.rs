//! Game handlers.

use anyhow::Result;
use colored::Colorize;
use rchess::{BoardRenderer, ChessClient, Game, GameSummary, Move, MoveOutcome, NewGame, Side};
use rust_i18n::t;
use serde::Serialize;

use crate::output::{format_duration, format_time, print_board, print_hint, PlainPrint, TableRow};

/// Row in the game history.
#[derive(Debug, Clone, Serialize)]
pub struct GameRow {
    pub id: String,
    pub started: String,
    pub duration: String,
    pub moves: usize,
    pub result: String,
}

impl From<&GameSummary> for GameRow {
    fn from(g: &GameSummary) -> Self {
        Self {
            id: g.game_id.to_string(),
            started: format_time(Some(&g.start_time)),
            duration: format_duration(&g.start_time, g.end_time.as_ref()),
            moves: g.moves.len(),
            result: g.result.clone().unwrap_or_else(|| "*".to_string()),
        }
    }
}

impl TableRow for GameRow {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Started", "Duration", "Moves", "Result"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.started.clone(),
            self.duration.clone(),
            self.moves.to_string(),
            self.result.clone(),
        ]
    }
}

impl PlainPrint for GameRow {
    fn plain_print(&self) {
        let result = if self.result == "*" {
            t!("in_progress").to_string().yellow()
        } else {
            self.result.bold()
        };
        println!("[{}] {}", self.id.cyan(), result);
        println!(
            "   {} | {} | {}",
            self.started.dimmed(),
            t!("moves_count", count = self.moves),
            self.duration
        );
    }
}

/// A game with its board drawn.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub id: String,
    pub fen: String,
    pub result: Option<String>,
    pub moves: Vec<Move>,
    #[serde(skip)]
    pub board: String,
}

impl GameView {
    /// Render the latest position of a stored game.
    pub fn from_game(game: &Game, board: &dyn BoardRenderer) -> rchess::Result<Self> {
        Ok(Self {
            id: game.game_id.to_string(),
            fen: game.current_fen().to_string(),
            result: game.result.clone(),
            moves: game.moves.clone(),
            board: board.render_fen(game.current_fen())?,
        })
    }

    /// Render a freshly started game.
    pub fn from_new_game(game: &NewGame, board: &dyn BoardRenderer) -> rchess::Result<Self> {
        Ok(Self {
            id: game.game_id.to_string(),
            fen: game.fen.clone(),
            result: None,
            moves: Vec::new(),
            board: board.render_fen(&game.fen)?,
        })
    }
}

impl PlainPrint for GameView {
    fn plain_print(&self) {
        println!("{}", t!("game_label", id = self.id.cyan()));
        print_board(&self.board);
        if !self.moves.is_empty() {
            println!("{}", format_moves(&self.moves));
        }
        if let Some(result) = &self.result {
            println!("{}", t!("game_over", result = result.bold()));
        }
    }
}

/// Reply to one of the player's moves.
#[derive(Debug, Clone, Serialize)]
pub struct MoveReport {
    pub game_id: String,
    pub player_move: String,
    pub ai_move: Option<String>,
    pub fen: Option<String>,
    pub result: Option<String>,
    #[serde(skip)]
    pub board: Option<String>,
}

impl PlainPrint for MoveReport {
    fn plain_print(&self) {
        print!("{}", t!("you_played", uci = self.player_move.green()));
        match &self.ai_move {
            Some(ai) => println!("  {}", t!("engine_played", uci = ai.red())),
            None => println!(),
        }
        if let Some(board) = &self.board {
            print_board(board);
        }
        match &self.result {
            Some(result) => println!("{}", t!("game_over", result = result.bold())),
            None => print_hint(t!("next_move_hint", id = &self.game_id)),
        }
    }
}

/// Pair moves into numbered lines: `1. e2e4 e7e5`.
pub fn format_moves(moves: &[Move]) -> String {
    let mut out = String::new();
    let mut number = 0;
    for m in moves {
        match m.player {
            Side::White => {
                number += 1;
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&format!("{}. {}", number, m.uci));
            }
            Side::Black => {
                if number == 0 {
                    number = 1;
                    out.push_str("1. ...");
                }
                out.push(' ');
                out.push_str(&m.uci);
            }
        }
    }
    out
}

/// Start a new game.
pub async fn start(client: &ChessClient, board: &dyn BoardRenderer) -> Result<GameView> {
    let game = client.games().start().await?;
    Ok(GameView::from_new_game(&game, board)?)
}

/// Play a move and collect the engine's reply.
pub async fn play(
    client: &ChessClient,
    board: &dyn BoardRenderer,
    game_id: &str,
    uci: &str,
) -> Result<MoveReport> {
    let outcome: MoveOutcome = client.games().make_move(game_id, uci).await?;
    let rendered = match &outcome.fen {
        Some(fen) => Some(board.render_fen(fen)?),
        None => None,
    };

    Ok(MoveReport {
        game_id: game_id.to_string(),
        player_move: uci.trim().to_string(),
        ai_move: outcome.ai_move,
        fen: outcome.fen,
        result: outcome.result,
        board: rendered,
    })
}

/// Reset the engine board.
pub async fn reset(client: &ChessClient, board: &dyn BoardRenderer) -> Result<String> {
    let reply = client.games().reset().await?;
    Ok(board.render_fen(&reply.fen)?)
}

/// List the user's games.
pub async fn history(client: &ChessClient) -> Result<Vec<GameRow>> {
    let games = client.games().history().await?;
    Ok(games.iter().map(GameRow::from).collect())
}

/// Fetch one game.
pub async fn show(client: &ChessClient, board: &dyn BoardRenderer, game_id: &str) -> Result<GameView> {
    let game = client.games().get(game_id).await?;
    Ok(GameView::from_game(&game, board)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rchess::{BoardStyle, TextBoard, INITIAL_FEN};

    fn mv(player: Side, uci: &str) -> Move {
        Move {
            player,
            uci: uci.to_string(),
        }
    }

    #[test]
    fn test_format_moves() {
        let moves = vec![
            mv(Side::White, "e2e4"),
            mv(Side::Black, "e7e5"),
            mv(Side::White, "g1f3"),
        ];
        assert_eq!(format_moves(&moves), "1. e2e4 e7e5 2. g1f3");
        assert_eq!(format_moves(&[]), "");
        assert_eq!(format_moves(&[mv(Side::Black, "e7e5")]), "1. ... e7e5");
    }

    #[test]
    fn test_new_game_view() {
        let game: NewGame = serde_json::from_str(&format!(
            r#"{{"message": "游戏已创建", "game_id": "665f1c", "fen": "{}"}}"#,
            INITIAL_FEN
        ))
        .unwrap();
        let board = TextBoard::new(BoardStyle::Ascii);

        let view = GameView::from_new_game(&game, &board).unwrap();
        assert_eq!(view.id, "665f1c");
        assert!(view.board.starts_with("8 r n b q k b n r"));
        assert!(view.result.is_none());
    }
}
