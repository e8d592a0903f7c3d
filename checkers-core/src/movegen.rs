//! Per-piece move generation: one-step moves and jump-chain search
//!
//! Jump chains are explored depth-first over an explicit stack of frames.
//! The board is only read; captured pieces stay on it until the chosen move
//! is applied, so each frame carries the squares it has already jumped.

use smallvec::SmallVec;

use crate::board::Square;
use crate::game::{Board, Move, Path};
use crate::pieces::Cell;

/// One node of the chain search
struct Frame {
    path: Path,
    captured: Path,
    /// Crowned during this chain (or a king from the start)
    is_king: bool,
}

/// Push every maximal capture chain of the piece on `from` into `moves`.
///
/// Chains are emitted in depth-first order, directions tried in the order
/// of [`Cell::directions`]. Nothing is emitted for an empty square.
pub(crate) fn jump_moves(board: &Board, from: Square, moves: &mut Vec<Move>) {
    let piece = match board.get(from) {
        Some(cell) if !cell.is_empty() => cell,
        _ => return,
    };
    let Some(color) = piece.color() else { return };
    let back_rank = color.back_rank();

    let mut stack = vec![Frame {
        path: smallvec::smallvec![from],
        captured: Path::new(),
        is_king: piece.is_king(),
    }];

    while let Some(frame) = stack.pop() {
        let Some(&pos) = frame.path.last() else { continue };
        let effective = if frame.is_king { piece.crowned() } else { piece };

        let mut hops: SmallVec<[Frame; 4]> = SmallVec::new();
        for &dir in effective.directions() {
            let over = pos.offset(dir, 1);
            let land = pos.offset(dir, 2);

            if frame.captured.contains(&over) {
                continue;
            }
            let (Some(victim), Some(Cell::Empty)) = (board.get(over), board.get(land)) else {
                continue;
            };
            if victim.color() != Some(color.opponent()) {
                continue;
            }

            let mut path = frame.path.clone();
            path.push(land);
            let mut captured = frame.captured.clone();
            captured.push(over);

            hops.push(Frame {
                path,
                captured,
                is_king: frame.is_king || land.row == back_rank,
            });
        }

        if hops.is_empty() {
            // A chain only ends where no hop is left
            if frame.path.len() > 1 {
                let mv = Move::from_parts(frame.path, frame.captured);
                tracing::trace!(mv = %mv, "jump chain");
                moves.push(mv);
            }
        } else {
            // Reversed so the first direction is explored first
            stack.extend(hops.into_iter().rev());
        }
    }
}

/// Push the one-step moves of the piece on `from` into `moves`
pub(crate) fn simple_moves(board: &Board, from: Square, moves: &mut Vec<Move>) {
    let Some(piece) = board.get(from) else { return };

    for &dir in piece.directions() {
        let to = from.offset(dir, 1);
        if board.get(to) == Some(Cell::Empty) {
            moves.push(Move::simple(from, to));
        }
    }
}
