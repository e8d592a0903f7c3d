//! Position files - starting layouts for games and tests

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::game::Board;
use crate::pieces::Color;

/// Errors from parsing a textual layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),

    #[error("row {row}: expected 8 cells, found {found}")]
    ColumnCount { row: usize, found: usize },

    #[error("row {row}, col {col}: unknown glyph {glyph:?}")]
    UnknownGlyph { row: usize, col: usize, glyph: char },

    #[error("unknown colour: {0:?}")]
    BadColor(String),

    #[error("invalid square {0:?}, expected \"row,col\" within 0..8")]
    BadSquare(String),

    #[error("move path needs at least 2 squares, found {0}")]
    ShortPath(usize),
}

/// Board layout plus side to move, as stored on disk
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub to_move: Color,
    /// Eight rows of eight glyphs (`r R b B .`), row 0 first
    pub rows: Vec<String>,
}

impl Position {
    /// Snapshot a board
    pub fn from_board(name: Option<&str>, board: &Board) -> Self {
        let rows = board
            .rows()
            .map(|row| row.iter().map(|cell| cell.glyph()).collect::<String>())
            .collect();
        Self {
            name: name.map(str::to_string),
            to_move: board.side_to_move(),
            rows,
        }
    }

    /// Build the board this position describes
    pub fn to_board(&self) -> Result<Board, LayoutError> {
        Board::from_rows(&self.rows, self.to_move)
    }

    /// Load from JSON file; the layout is checked before returning
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read position: {}", path.display()))?;
        let position: Position = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse position: {}", path.display()))?;
        position
            .to_board()
            .with_context(|| format!("Invalid layout in {}", path.display()))?;
        Ok(position)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::from_board(Some("standard"), &Board::new())
    }
}
