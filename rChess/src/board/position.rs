//! Piece placement parsed from FEN.

use std::fmt;

use crate::error::{Error, Result};
use crate::models::Side;

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub side: Side,
    /// Lowercase piece letter: `k q r b n p`.
    pub kind: char,
}

impl Piece {
    fn from_fen_char(c: char) -> Option<Self> {
        let kind = c.to_ascii_lowercase();
        if !matches!(kind, 'k' | 'q' | 'r' | 'b' | 'n' | 'p') {
            return None;
        }
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        Some(Self { side, kind })
    }

    /// FEN letter (uppercase for white).
    pub fn letter(&self) -> char {
        match self.side {
            Side::White => self.kind.to_ascii_uppercase(),
            Side::Black => self.kind,
        }
    }

    /// Unicode chess figurine.
    pub fn figurine(&self) -> char {
        match (self.side, self.kind) {
            (Side::White, 'k') => '♔',
            (Side::White, 'q') => '♕',
            (Side::White, 'r') => '♖',
            (Side::White, 'b') => '♗',
            (Side::White, 'n') => '♘',
            (Side::White, _) => '♙',
            (Side::Black, 'k') => '♚',
            (Side::Black, 'q') => '♛',
            (Side::Black, 'r') => '♜',
            (Side::Black, 'b') => '♝',
            (Side::Black, 'n') => '♞',
            (Side::Black, _) => '♟',
        }
    }
}

/// Piece placement and side to move. No legality checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Rank 8 first, file a first.
    squares: [[Option<Piece>; 8]; 8],
    pub side_to_move: Side,
    pub fullmove: u32,
}

impl Position {
    /// Parse the placement, active color and fullmove fields of a FEN.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or_else(|| Error::parse("empty FEN"))?;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(Error::parse(format!("FEN needs 8 ranks, got {}", ranks.len())));
        }

        let mut squares = [[None; 8]; 8];
        for (row, rank) in ranks.iter().enumerate() {
            let bad_rank = || Error::parse(format!("rank '{}' does not cover 8 files", rank));
            let mut file = 0usize;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let piece = Piece::from_fen_char(c)
                        .ok_or_else(|| Error::parse(format!("bad piece '{}' in FEN", c)))?;
                    if file >= 8 {
                        return Err(bad_rank());
                    }
                    squares[row][file] = Some(piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(bad_rank());
                }
            }
            if file != 8 {
                return Err(bad_rank());
            }
        }

        let side_to_move = match fields.next() {
            None | Some("w") => Side::White,
            Some("b") => Side::Black,
            Some(other) => return Err(Error::parse(format!("bad active color '{}'", other))),
        };

        let fullmove = fields.nth(3).and_then(|s| s.parse().ok()).unwrap_or(1);

        Ok(Self {
            squares,
            side_to_move,
            fullmove,
        })
    }

    /// Piece at `file` (0 = a) and `rank` (0 = rank 1).
    pub fn piece_at(&self, file: usize, rank: usize) -> Option<Piece> {
        if file >= 8 || rank >= 8 {
            return None;
        }
        self.squares[7 - rank][file]
    }

    /// Piece on a square named like `e4`.
    pub fn piece_on(&self, square: &str) -> Option<Piece> {
        let mut chars = square.chars();
        let file = chars.next()?;
        let rank = chars.next()?.to_digit(10)?;
        if !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
            return None;
        }
        self.piece_at(file as usize - 'a' as usize, rank as usize - 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.squares.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            let mut empty = 0;
            for square in row {
                match square {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.letter())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
        }
        let side = match self.side_to_move {
            Side::White => 'w',
            Side::Black => 'b',
        };
        write!(f, " {}", side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::INITIAL_FEN;

    #[test]
    fn test_initial_position() {
        let pos = Position::from_fen(INITIAL_FEN).unwrap();
        assert_eq!(pos.side_to_move, Side::White);
        assert_eq!(pos.fullmove, 1);
        assert_eq!(pos.piece_on("e1").map(|p| p.letter()), Some('K'));
        assert_eq!(pos.piece_on("d8").map(|p| p.letter()), Some('q'));
        assert_eq!(pos.piece_on("e4"), None);
        assert_eq!(pos.to_string(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
    }

    #[test]
    fn test_after_moves() {
        let pos =
            Position::from_fen("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2")
                .unwrap();
        assert_eq!(pos.fullmove, 2);
        assert_eq!(pos.piece_on("e4").map(|p| p.side), Some(Side::White));
        assert_eq!(pos.piece_on("e5").map(|p| p.side), Some(Side::Black));
        assert_eq!(pos.piece_on("e2"), None);
    }

    #[test]
    fn test_bad_fen() {
        assert!(Position::from_fen("").is_err());
        assert!(Position::from_fen("8/8/8 w").is_err());
        assert!(Position::from_fen("9/8/8/8/8/8/8/8 w").is_err());
        assert!(Position::from_fen("rnbqkbnx/8/8/8/8/8/8/8 w").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8/8 x").is_err());
        assert!(Position::from_fen("ppppppppp/8/8/8/8/8/8/8 w").is_err());
    }

    #[test]
    fn test_piece_on_bounds() {
        let pos = Position::from_fen(INITIAL_FEN).unwrap();
        assert_eq!(pos.piece_on("i1"), None);
        assert_eq!(pos.piece_on("a9"), None);
        assert_eq!(pos.piece_on("a"), None);
    }
}
