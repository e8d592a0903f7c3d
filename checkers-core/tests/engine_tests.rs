//! Integration tests for the checkers rules engine
//!
//! Covers move generation (forced captures, jump chains, promotion) and
//! move application over hand-built layouts, plus random playouts.

use std::collections::HashSet;

use checkers_core::{Board, Cell, Color, GameResult, Move, Square};
use proptest::prelude::*;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col)
}

fn board(rows: [&str; 8], to_move: Color) -> Board {
    Board::from_rows(&rows, to_move).unwrap()
}

fn mv(path: &[(i8, i8)], captured: &[(i8, i8)]) -> Move {
    let path: Vec<Square> = path.iter().map(|&(r, c)| sq(r, c)).collect();
    let captured: Vec<Square> = captured.iter().map(|&(r, c)| sq(r, c)).collect();
    Move::new(&path, &captured)
}

/// Compare move sets ignoring order; captured lists must match too
fn assert_moves_eq(found: &[Move], expected: &[Move]) {
    let found_set: HashSet<_> = found.iter().collect();
    let expected_set: HashSet<_> = expected.iter().collect();
    assert_eq!(found.len(), expected.len(), "found {:?}", found);
    assert_eq!(found_set, expected_set);

    for e in expected {
        let f = found.iter().find(|f| *f == e).unwrap();
        assert_eq!(f.captured(), e.captured(), "captured mismatch for {}", e);
    }
}

fn chain_layout() -> Board {
    board(
        [
            "........",
            "......b.",
            "........",
            "....b...",
            "........",
            "..b.....",
            ".r......",
            "........",
        ],
        Color::Red,
    )
}

// ============================================================================
// MOVE GENERATION
// ============================================================================

#[test]
fn test_initial_moves() {
    let moves = Board::new().all_moves();
    let expected = vec![
        mv(&[(5, 1), (4, 0)], &[]),
        mv(&[(5, 1), (4, 2)], &[]),
        mv(&[(5, 3), (4, 2)], &[]),
        mv(&[(5, 3), (4, 4)], &[]),
        mv(&[(5, 5), (4, 4)], &[]),
        mv(&[(5, 5), (4, 6)], &[]),
        mv(&[(5, 7), (4, 6)], &[]),
    ];
    assert_moves_eq(&moves, &expected);
}

#[test]
fn test_initial_moves_black() {
    let mut b = Board::new();
    b.apply_move(&mv(&[(5, 1), (4, 0)], &[]));
    let moves = b.all_moves();
    assert_eq!(moves.len(), 7);
    assert!(moves.iter().all(|m| m.from().row == 2 && m.to().row == 3));
}

#[test]
fn test_forced_capture() {
    let b = board(
        [
            "........",
            "........",
            "........",
            "........",
            "...b....",
            "r.r.....",
            "........",
            "........",
        ],
        Color::Red,
    );
    let moves = b.all_moves();
    assert_moves_eq(&moves, &[mv(&[(5, 2), (3, 4)], &[(4, 3)])]);
}

#[test]
fn test_chain_jump_single_branch() {
    let moves = chain_layout().all_moves();
    let expected = vec![mv(
        &[(6, 1), (4, 3), (2, 5), (0, 7)],
        &[(5, 2), (3, 4), (1, 6)],
    )];
    assert_moves_eq(&moves, &expected);
}

#[test]
fn test_chain_jump_multiple_branches() {
    let b = board(
        [
            "........",
            "........",
            "........",
            "..b.b...",
            "........",
            "..b.....",
            ".r......",
            "........",
        ],
        Color::Red,
    );
    let expected = vec![
        mv(&[(6, 1), (4, 3), (2, 1)], &[(5, 2), (3, 2)]),
        mv(&[(6, 1), (4, 3), (2, 5)], &[(5, 2), (3, 4)]),
    ];
    assert_moves_eq(&b.all_moves(), &expected);
}

#[test]
fn test_kinging_mid_chain_jump() {
    let b = board(
        [
            "........",
            "..b.b...",
            ".r......",
            "........",
            "........",
            "........",
            "........",
            "........",
        ],
        Color::Red,
    );
    let expected = vec![mv(&[(2, 1), (0, 3), (2, 5)], &[(1, 2), (1, 4)])];
    assert_moves_eq(&b.all_moves(), &expected);
}

#[test]
fn test_black_kinging_mid_chain_jump() {
    let b = board(
        [
            "........",
            "........",
            "........",
            "........",
            "........",
            "......b.",
            "...r.r..",
            "........",
        ],
        Color::Black,
    );
    let expected = vec![mv(&[(5, 6), (7, 4), (5, 2)], &[(6, 5), (6, 3)])];
    assert_moves_eq(&b.all_moves(), &expected);
}

#[test]
fn test_king_captures() {
    let b = board(
        [
            "........",
            "........",
            "..bb....",
            "...R....",
            "..brb.b.",
            ".b......",
            "........",
            ".......r",
        ],
        Color::Red,
    );
    let expected = vec![
        mv(&[(3, 3), (1, 1)], &[(2, 2)]),
        mv(&[(3, 3), (5, 5), (3, 7)], &[(4, 4), (4, 6)]),
    ];
    assert_moves_eq(&b.all_moves(), &expected);
}

#[test]
fn test_king_cannot_land_on_origin() {
    // A closed loop of four pieces; the fourth jump would land on 4,2
    let b = board(
        [
            "........",
            "........",
            "........",
            "...b.b..",
            "..R.....",
            "...b.b..",
            "........",
            "........",
        ],
        Color::Red,
    );
    let moves = b.all_moves();
    let expected = vec![
        mv(&[(4, 2), (2, 4), (4, 6), (6, 4)], &[(3, 3), (3, 5), (5, 5)]),
        mv(&[(4, 2), (6, 4), (4, 6), (2, 4)], &[(5, 3), (5, 5), (3, 5)]),
    ];
    assert_moves_eq(&moves, &expected);
    assert!(moves.iter().all(|m| m.to() != sq(4, 2)));
}

#[test]
fn test_no_moves_is_loss() {
    let b = board(
        [
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "b.......",
            ".r......",
        ],
        Color::Black,
    );
    // Black man on (6,0) is boxed in: (7,1) is occupied and not jumpable
    assert!(b.all_moves().is_empty());
    assert_eq!(b.result(), GameResult::RedWins);
}

// ============================================================================
// PER-PIECE QUERIES
// ============================================================================

#[test]
fn test_moves_for_piece_is_local() {
    let b = board(
        [
            "........",
            "........",
            "........",
            "........",
            "...b....",
            "r.r.....",
            "........",
            "........",
        ],
        Color::Red,
    );
    // (5,0) has no capture of its own, so its steps are reported
    assert_moves_eq(&b.moves_for_piece(sq(5, 0)), &[mv(&[(5, 0), (4, 1)], &[])]);
    // but a capture elsewhere makes them illegal
    assert!(b.legal_moves_from(sq(5, 0)).is_empty());
    assert_moves_eq(&b.legal_moves_from(sq(5, 2)), &[mv(&[(5, 2), (3, 4)], &[(4, 3)])]);
}

#[test]
fn test_moves_for_piece_prefers_captures() {
    let moves = chain_layout().moves_for_piece(sq(6, 1));
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].captured().len(), 3);
}

#[test]
fn test_moves_for_opponent_piece_empty() {
    let b = chain_layout();
    assert!(b.moves_for_piece(sq(5, 2)).is_empty());
    assert!(b.moves_for_piece(sq(0, 0)).is_empty());
}

// ============================================================================
// MOVE APPLICATION
// ============================================================================

#[test]
fn test_apply_chain_capture() {
    let mut b = chain_layout();
    let moves = b.all_moves();
    b.apply_move(&moves[0]);

    assert_eq!(b.side_to_move(), Color::Black);
    assert_eq!(b.count(Color::Black), 0);
    assert_eq!(b.count(Color::Red), 1);
    assert_eq!(b.get(sq(6, 1)), Some(Cell::Empty));
    assert_eq!(b.get(sq(0, 7)), Some(Cell::RedKing));
    assert_eq!(b.result(), GameResult::RedWins);
}

#[test]
fn test_apply_crowns_by_destination_row() {
    // The man is a king for the second hop but the chain ends on row 2
    let mut b = board(
        [
            "........",
            "..b.b...",
            ".r......",
            "........",
            "........",
            "........",
            "........",
            "........",
        ],
        Color::Red,
    );
    let moves = b.all_moves();
    assert_eq!(moves, vec![mv(&[(2, 1), (0, 3), (2, 5)], &[(1, 2), (1, 4)])]);

    b.apply_move(&moves[0]);
    assert_eq!(b.get(sq(2, 5)), Some(Cell::RedMan));
    assert_eq!(b.get(sq(2, 1)), Some(Cell::Empty));
    assert_eq!(b.get(sq(0, 3)), Some(Cell::Empty));
    assert_eq!(b.get(sq(1, 2)), Some(Cell::Empty));
    assert_eq!(b.get(sq(1, 4)), Some(Cell::Empty));
}

#[test]
fn test_apply_king_stays_king() {
    let mut b = board(
        [
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "B.......",
        ],
        Color::Black,
    );
    b.apply_move(&mv(&[(7, 0), (6, 1)], &[]));
    assert_eq!(b.get(sq(6, 1)), Some(Cell::BlackKing));
}

#[test]
fn test_alternating_applies_stay_consistent() {
    let mut b = Board::new();
    b.apply_move(&mv(&[(5, 3), (4, 4)], &[]));
    b.apply_move(&mv(&[(2, 2), (3, 3)], &[]));
    assert_eq!(b.side_to_move(), Color::Red);

    // Red must take on (3,3)
    let moves = b.all_moves();
    assert_moves_eq(&moves, &[mv(&[(4, 4), (2, 2)], &[(3, 3)])]);

    b.apply_move(&moves[0]);
    assert_eq!(b.count(Color::Red), 12);
    assert_eq!(b.count(Color::Black), 11);

    // Black recaptures from either side
    let replies = b.all_moves();
    assert!(!replies.is_empty());
    assert!(replies.iter().all(Move::is_capture));
    b.apply_move(&replies[0]);
    assert_eq!(b.count(Color::Red), 11);
    assert_eq!(b.count(Color::Black), 11);
}

// ============================================================================
// RANDOM PLAYOUTS
// ============================================================================

/// Check one ply; returns false once the game is over
fn check_ply(b: &mut Board, choice: usize) -> bool {
    let moves = b.all_moves();
    if moves.is_empty() {
        assert_ne!(b.result(), GameResult::Ongoing);
        return false;
    }

    // Forced capture is all-or-nothing
    let captures = moves.iter().filter(|m| m.is_capture()).count();
    assert!(captures == 0 || captures == moves.len());

    // Distinct paths, none a prefix of another (chains are maximal)
    let paths: HashSet<&[Square]> = moves.iter().map(|m| m.path()).collect();
    assert_eq!(paths.len(), moves.len());
    for a in &moves {
        for other in &moves {
            if a != other {
                assert!(!other.path().starts_with(a.path()), "{} is a prefix of {}", a, other);
            }
        }
    }

    let side = b.side_to_move();
    let chosen = &moves[choice % moves.len()];
    let own_before = b.count(side);
    let opp_before = b.count(side.opponent());
    let mover = b.get(chosen.from()).unwrap_or_default();

    if chosen.is_capture() {
        assert_eq!(chosen.path().len(), chosen.captured().len() + 1);
        for &cap in chosen.captured() {
            assert_eq!(b.get(cap).and_then(Cell::color), Some(side.opponent()));
        }
    }

    b.apply_move(chosen);

    assert_eq!(b.side_to_move(), side.opponent());
    assert_eq!(b.count(side), own_before);
    assert_eq!(b.count(side.opponent()), opp_before - chosen.captured().len());
    assert_eq!(b.get(chosen.from()), Some(Cell::Empty));
    assert_eq!(b.get(chosen.to()).and_then(Cell::color), Some(side));

    // Crowned only by the landing row; kings stay kings
    let landed = b.get(chosen.to()).unwrap_or_default();
    let on_back_rank = chosen.to().row == side.back_rank();
    assert_eq!(landed.is_king(), mover.is_king() || on_back_rank);
    for &cap in chosen.captured() {
        assert_eq!(b.get(cap), Some(Cell::Empty));
    }
    true
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_random_playouts_stay_consistent(choices in prop::collection::vec(any::<usize>(), 1..300)) {
        let mut b = Board::new();
        for &choice in &choices {
            if !check_ply(&mut b, choice) {
                break;
            }
        }
        prop_assert!(b.count(Color::Red) + b.count(Color::Black) <= 24);
    }
}
