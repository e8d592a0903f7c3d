//! Checkers Core - Rules engine for 8x8 checkers
//!
//! This crate provides the game rules:
//! - Board geometry (row/col squares, diagonals)
//! - Cell contents and piece directions
//! - Board state, move generation with forced captures and jump chains
//! - Move application with promotion
//! - Material evaluation and position files

pub mod board;
pub mod pieces;
pub mod game;
mod movegen;
pub mod eval;
pub mod layout;

// Re-exports for convenient access
pub use board::{Square, BOARD_SIZE, DIAGONALS};
pub use pieces::{Cell, Color};
pub use game::{Board, GameResult, Grid, Move, Path};
pub use eval::{evaluate, evaluate_for_side, Heuristics};
pub use layout::{LayoutError, Position};
