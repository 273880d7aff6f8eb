//! Plain-text board renderer.

use serde::{Deserialize, Serialize};

use super::{BoardRenderer, Position};
use crate::models::Side;

/// How pieces are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardStyle {
    /// Chess figurines (♔ ♟).
    #[default]
    Unicode,
    /// FEN letters (K p).
    Ascii,
}

/// Renders a position as an 8x8 text grid with coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextBoard {
    style: BoardStyle,
    flipped: bool,
}

impl TextBoard {
    /// Create a renderer with the given piece style, white at the bottom.
    pub fn new(style: BoardStyle) -> Self {
        Self {
            style,
            flipped: false,
        }
    }

    /// Draw from `side`'s point of view.
    pub fn orientation(mut self, side: Side) -> Self {
        self.flipped = side == Side::Black;
        self
    }

    fn square(&self, position: &Position, file: usize, rank: usize) -> char {
        match position.piece_at(file, rank) {
            Some(piece) => match self.style {
                BoardStyle::Unicode => piece.figurine(),
                BoardStyle::Ascii => piece.letter(),
            },
            None if (file + rank) % 2 == 0 => '.',
            None => ' ',
        }
    }
}

impl BoardRenderer for TextBoard {
    fn render(&self, position: &Position) -> String {
        let ranks: Vec<usize> = if self.flipped {
            (0..8).collect()
        } else {
            (0..8).rev().collect()
        };
        let files: Vec<usize> = if self.flipped {
            (0..8).rev().collect()
        } else {
            (0..8).collect()
        };

        let footer: String = files
            .iter()
            .map(|f| format!(" {}", (b'a' + *f as u8) as char))
            .collect();

        let mut out = String::new();
        for rank in ranks {
            out.push_str(&format!("{} ", rank + 1));
            for &file in &files {
                out.push(self.square(position, file, rank));
                out.push(' ');
            }
            out.truncate(out.trim_end_matches(' ').len());
            out.push('\n');
        }
        out.push(' ');
        out.push_str(&footer);
        out
    }
}
