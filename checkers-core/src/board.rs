//! Square geometry on the 8x8 grid

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::LayoutError;

/// Board size (rows and columns)
pub const BOARD_SIZE: i8 = 8;

/// Grid coordinates, row 0 at the top (black's home side)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if this square is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Square `steps` away along a direction; may be off the board
    pub fn offset(&self, (dr, dc): (i8, i8), steps: i8) -> Square {
        Square::new(self.row + dr * steps, self.col + dc * steps)
    }

    /// Playable squares carry pieces in the standard layout
    pub fn is_playable(&self) -> bool {
        (self.row + self.col) % 2 == 0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Square {
    type Err = LayoutError;

    /// Parse `"row,col"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || LayoutError::BadSquare(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(bad)?;
        let row: i8 = row.trim().parse().map_err(|_| bad())?;
        let col: i8 = col.trim().parse().map_err(|_| bad())?;
        let square = Square::new(row, col);
        if !square.is_valid() {
            return Err(bad());
        }
        Ok(square)
    }
}

/// Diagonal direction vectors (drow, dcol)
/// Index: 0=up-left, 1=up-right, 2=down-left, 3=down-right
pub const DIAGONALS: [(i8, i8); 4] = [
    (-1, -1), // up-left
    (-1, 1),  // up-right
    (1, -1),  // down-left
    (1, 1),   // down-right
];

/// Diagonals pointing towards row 0 (red's forward)
pub const UP: &[(i8, i8)] = &[DIAGONALS[0], DIAGONALS[1]];

/// Diagonals pointing towards row 7 (black's forward)
pub const DOWN: &[(i8, i8)] = &[DIAGONALS[2], DIAGONALS[3]];
