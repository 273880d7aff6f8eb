//! Board rendering.

mod position;
mod text;

pub use position::{Piece, Position};
pub use text::{BoardStyle, TextBoard};

use crate::error::Result;

/// Component that draws a chess position.
///
/// Views that show a board receive one explicitly when they are built.
pub trait BoardRenderer: Send + Sync {
    /// Draw a parsed position.
    fn render(&self, position: &Position) -> String;

    /// Parse a FEN string and draw it.
    fn render_fen(&self, fen: &str) -> Result<String> {
        Ok(self.render(&Position::from_fen(fen)?))
    }
}
