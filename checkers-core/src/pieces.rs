//! Piece colours and cell contents

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{DIAGONALS, DOWN, UP};
use crate::layout::LayoutError;

/// Side colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Row on which this colour's men are crowned
    pub fn back_rank(self) -> i8 {
        match self {
            Color::Red => 0,
            Color::Black => 7,
        }
    }

    /// Forward diagonals for a man of this colour
    pub fn forward(self) -> &'static [(i8, i8)] {
        match self {
            Color::Red => UP,
            Color::Black => DOWN,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

impl FromStr for Color {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Color::Red),
            "b" | "black" => Ok(Color::Black),
            other => Err(LayoutError::BadColor(other.to_string())),
        }
    }
}

/// Contents of one grid cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    RedMan,
    RedKing,
    BlackMan,
    BlackKing,
}

impl Cell {
    /// Man of the given colour
    pub fn man(color: Color) -> Self {
        match color {
            Color::Red => Cell::RedMan,
            Color::Black => Cell::BlackMan,
        }
    }

    /// King of the given colour
    pub fn king(color: Color) -> Self {
        match color {
            Color::Red => Cell::RedKing,
            Color::Black => Cell::BlackKing,
        }
    }

    /// Owning colour, `None` for an empty cell
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::RedMan | Cell::RedKing => Some(Color::Red),
            Cell::BlackMan | Cell::BlackKing => Some(Color::Black),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn is_king(self) -> bool {
        matches!(self, Cell::RedKing | Cell::BlackKing)
    }

    pub fn is_man(self) -> bool {
        matches!(self, Cell::RedMan | Cell::BlackMan)
    }

    /// King form of this piece; kings and empty cells are unchanged
    pub fn crowned(self) -> Self {
        match self {
            Cell::RedMan => Cell::RedKing,
            Cell::BlackMan => Cell::BlackKing,
            other => other,
        }
    }

    /// Legal diagonals for this piece
    pub fn directions(self) -> &'static [(i8, i8)] {
        match self {
            Cell::Empty => &[],
            Cell::RedMan => Color::Red.forward(),
            Cell::BlackMan => Color::Black.forward(),
            Cell::RedKing | Cell::BlackKing => &DIAGONALS,
        }
    }

    /// Single-character glyph used by the text layout
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::RedMan => 'r',
            Cell::RedKing => 'R',
            Cell::BlackMan => 'b',
            Cell::BlackKing => 'B',
        }
    }

    /// Parse a glyph; both `.` and space denote an empty cell
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' | ' ' => Some(Cell::Empty),
            'r' => Some(Cell::RedMan),
            'R' => Some(Cell::RedKing),
            'b' => Some(Cell::BlackMan),
            'B' => Some(Cell::BlackKing),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
