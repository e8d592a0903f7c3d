//! Show / moves commands - inspect a position

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use checkers_core::{evaluate, Board, Heuristics, Move, Square};

#[derive(Args)]
pub struct MovesArgs {
    /// Position JSON file (standard layout if omitted)
    #[arg(long, value_name = "FILE")]
    pub position: Option<PathBuf>,

    /// Only moves of the piece on ROW,COL
    #[arg(long, value_name = "ROW,COL")]
    pub piece: Option<Square>,

    /// Output moves as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run moves command
pub fn run(args: MovesArgs) -> Result<()> {
    let board = crate::load_board(args.position.as_deref())?;
    let moves = collect_moves(&board, args.piece);

    tracing::info!("{} legal moves for {}", moves.len(), board.side_to_move());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&moves)?);
    } else {
        print_moves(&moves);
    }
    Ok(())
}

/// Print board, side to move and material
pub fn show(board: &Board) {
    println!("{}", board);
    println!("To move:  {}", board.side_to_move());
    println!("Material: {}", evaluate(board, &Heuristics::default()));
}

fn collect_moves(board: &Board, piece: Option<Square>) -> Vec<Move> {
    match piece {
        Some(sq) => board.moves_for_piece(sq),
        None => board.all_moves(),
    }
}

fn print_moves(moves: &[Move]) {
    if moves.is_empty() {
        println!("No legal moves");
        return;
    }
    for mv in moves {
        if mv.is_capture() {
            let captured: Vec<String> = mv.captured().iter().map(Square::to_string).collect();
            println!("{}  (captures {})", mv, captured.join(" "));
        } else {
            println!("{}", mv);
        }
    }
}
