//! Board state, moves, and the move generator / applier

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Square, BOARD_SIZE};
use crate::layout::LayoutError;
use crate::movegen::{jump_moves, simple_moves};
use crate::pieces::{Cell, Color};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Sequence of squares; most moves fit inline
pub type Path = SmallVec<[Square; 4]>;

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    RedWins,
    BlackWins,
}

impl GameResult {
    /// Win for the given colour
    pub fn win_for(color: Color) -> Self {
        match color {
            Color::Red => GameResult::RedWins,
            Color::Black => GameResult::BlackWins,
        }
    }
}

/// A legal move: the squares visited plus the opponent pieces jumped.
///
/// Equality and hashing only look at `path`; `captured` follows from the
/// path and the board the move was generated on.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawMove")]
pub struct Move {
    path: Path,
    captured: Path,
}

/// Unchecked wire form of a move
#[derive(Deserialize)]
struct RawMove {
    path: Path,
    #[serde(default)]
    captured: Path,
}

impl TryFrom<RawMove> for Move {
    type Error = LayoutError;

    fn try_from(raw: RawMove) -> Result<Self, Self::Error> {
        if raw.path.len() < 2 {
            return Err(LayoutError::ShortPath(raw.path.len()));
        }
        Ok(Self::from_parts(raw.path, raw.captured))
    }
}

/// Stand-in endpoint for a path too short to have one; never on the board
const NOWHERE: Square = Square::new(-1, -1);

impl Move {
    /// Build a move from its path and captured squares.
    ///
    /// Paths shorter than two squares are accepted but name no board squares
    /// beyond their single entry; applying one only passes the turn.
    pub fn new(path: &[Square], captured: &[Square]) -> Self {
        Self::from_parts(Path::from_slice(path), Path::from_slice(captured))
    }

    pub(crate) fn from_parts(path: Path, captured: Path) -> Self {
        Self { path, captured }
    }

    /// One-step move without captures
    pub fn simple(from: Square, to: Square) -> Self {
        Self::new(&[from, to], &[])
    }

    /// Origin square; off the board if the path is empty
    pub fn from(&self) -> Square {
        self.path.first().copied().unwrap_or(NOWHERE)
    }

    /// Destination square; off the board if the path is empty
    pub fn to(&self) -> Square {
        self.path.last().copied().unwrap_or(NOWHERE)
    }

    pub fn path(&self) -> &[Square] {
        &self.path
    }

    /// Jumped squares in traversal order
    pub fn captured(&self) -> &[Square] {
        &self.captured
    }

    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl fmt::Display for Move {
    /// `5,1-4,0` for a step, `6,1x4,3x2,5` for a capture chain
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { "x" } else { "-" };
        for (i, sq) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(sep)?;
            }
            write!(f, "{}", sq)?;
        }
        Ok(())
    }
}

// ============================================================================
// BOARD STATE
// ============================================================================

/// Cell grid, indexed `[row][col]`
pub type Grid = [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize];

/// Board state: the grid plus whose turn it is
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid: Grid,
    side_to_move: Color,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Standard starting layout, red to move
    pub fn new() -> Self {
        let mut grid = Grid::default();
        for row in 0..BOARD_SIZE {
            let cell = match row {
                0..=2 => Cell::man(Color::Black),
                5..=7 => Cell::man(Color::Red),
                _ => continue,
            };
            for col in 0..BOARD_SIZE {
                if Square::new(row, col).is_playable() {
                    grid[row as usize][col as usize] = cell;
                }
            }
        }
        Self {
            grid,
            side_to_move: Color::Red,
        }
    }

    /// Board with no pieces
    pub fn empty(side_to_move: Color) -> Self {
        Self {
            grid: Grid::default(),
            side_to_move,
        }
    }

    /// Board from a caller-supplied grid; the layout is trusted as given
    pub fn from_grid(grid: Grid, side_to_move: Color) -> Self {
        Self { grid, side_to_move }
    }

    /// Board from glyph rows (`r R b B .`, whitespace ignored)
    pub fn from_rows<S: AsRef<str>>(rows: &[S], side_to_move: Color) -> Result<Self, LayoutError> {
        if rows.len() != BOARD_SIZE as usize {
            return Err(LayoutError::RowCount(rows.len()));
        }

        let mut grid = Grid::default();
        for (r, line) in rows.iter().enumerate() {
            let glyphs: Vec<char> = line.as_ref().chars().filter(|c| !c.is_whitespace()).collect();
            if glyphs.len() != BOARD_SIZE as usize {
                return Err(LayoutError::ColumnCount { row: r, found: glyphs.len() });
            }
            for (c, &glyph) in glyphs.iter().enumerate() {
                grid[r][c] = Cell::from_glyph(glyph)
                    .ok_or(LayoutError::UnknownGlyph { row: r, col: c, glyph })?;
            }
        }

        Ok(Self { grid, side_to_move })
    }

    /// Place a piece while building a layout
    pub fn with_piece(mut self, sq: Square, cell: Cell) -> Self {
        self.set(sq, cell);
        self
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Cell at a square, `None` when off the board
    pub fn get(&self, sq: Square) -> Option<Cell> {
        if sq.is_valid() {
            Some(self.grid[sq.row as usize][sq.col as usize])
        } else {
            None
        }
    }

    /// Rows of the grid, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.grid.iter().map(|row| row.as_slice())
    }

    /// Occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Cell)> + '_ {
        self.grid.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| !cell.is_empty())
                .map(move |(c, &cell)| (Square::new(r as i8, c as i8), cell))
        })
    }

    /// Number of pieces of a colour
    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, cell)| cell.color() == Some(color)).count()
    }

    fn own_pieces(&self) -> impl Iterator<Item = Square> + '_ {
        let side = self.side_to_move;
        self.pieces()
            .filter(move |(_, cell)| cell.color() == Some(side))
            .map(|(sq, _)| sq)
    }

    fn set(&mut self, sq: Square, cell: Cell) {
        if sq.is_valid() {
            self.grid[sq.row as usize][sq.col as usize] = cell;
        }
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// All legal moves for the side to move.
    ///
    /// Captures anywhere on the board make every non-capturing move illegal.
    /// An empty result means the side to move has lost.
    pub fn all_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for sq in self.own_pieces() {
            jump_moves(self, sq, &mut moves);
        }
        if !moves.is_empty() {
            return moves;
        }

        for sq in self.own_pieces() {
            simple_moves(self, sq, &mut moves);
        }
        moves
    }

    /// Moves for one piece of the side to move.
    ///
    /// Only this piece's captures are considered when deciding whether a
    /// capture is forced; use [`Board::legal_moves_from`] for the globally
    /// enforced set.
    pub fn moves_for_piece(&self, from: Square) -> Vec<Move> {
        match self.get(from).and_then(Cell::color) {
            Some(color) if color == self.side_to_move => {}
            _ => return Vec::new(),
        }

        let mut moves = Vec::new();
        jump_moves(self, from, &mut moves);
        if moves.is_empty() {
            simple_moves(self, from, &mut moves);
        }
        moves
    }

    /// Subset of [`Board::all_moves`] starting at `from`
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        self.all_moves().into_iter().filter(|mv| mv.from() == from).collect()
    }

    /// Ongoing while the side to move has a move, otherwise the opponent wins
    pub fn result(&self) -> GameResult {
        if self.all_moves().is_empty() {
            GameResult::win_for(self.side_to_move.opponent())
        } else {
            GameResult::Ongoing
        }
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply a move generated from this exact board state.
    ///
    /// The move is not re-validated. A man is crowned only if the move ends on
    /// its far rank; touching that rank mid-chain does not count. Squares
    /// outside the board are ignored.
    pub fn apply_move(&mut self, mv: &Move) {
        for &sq in mv.captured() {
            self.set(sq, Cell::Empty);
        }

        let from = mv.from();
        let to = mv.to();
        let piece = self.get(from).unwrap_or_default();
        self.set(from, Cell::Empty);

        let crowned = match piece.color() {
            Some(color) if piece.is_man() && to.row == color.back_rank() => piece.crowned(),
            _ => piece,
        };
        self.set(to, crowned);

        tracing::debug!(
            side = %self.side_to_move,
            mv = %mv,
            captured = mv.captured().len(),
            crowned = crowned != piece,
            "applied move"
        );

        self.side_to_move = self.side_to_move.opponent();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Row-major, space separated, one row per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.grid.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = LayoutError;

    /// Parse the rendered grid; red moves first
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().filter(|line| !line.trim().is_empty()).collect();
        Board::from_rows(&rows, Color::Red)
    }
}

// ============================================================================
// TESTS
// ============================================================================
