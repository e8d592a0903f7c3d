//! Play command - run a game loop from a position
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_game(), report_result()
//! - Level 3: select_move()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use checkers_core::{evaluate, Board, GameResult, Heuristics, Move};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// How the next move is picked from the legal set
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// First generated move
    First,
    /// Last generated move
    Last,
    /// Uniformly random move
    Random,
}

#[derive(Args)]
pub struct PlayArgs {
    /// Position JSON file (standard layout if omitted)
    #[arg(long, value_name = "FILE")]
    pub position: Option<PathBuf>,

    /// Move selection policy
    #[arg(long, value_enum, default_value_t = Policy::Last)]
    pub policy: Policy,

    /// Random seed for the random policy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many plies (game counts as undecided)
    #[arg(long, default_value = "200")]
    pub max_plies: usize,

    /// Output the game record as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not print the board after every ply
    #[arg(long)]
    pub quiet: bool,
}

/// Finished (or cut off) game
#[derive(Clone, Debug)]
struct GameRecord {
    result: GameResult,
    moves: Vec<Move>,
    final_board: Board,
    material: i32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let board = crate::load_board(args.position.as_deref())?;

    tracing::info!(
        "Starting game: policy={:?}, max_plies={}, {} to move",
        args.policy,
        args.max_plies,
        board.side_to_move()
    );

    let mut rng = create_rng(args.seed);
    let show_plies = !args.quiet && !args.json;
    let record = play_game(board, args.policy, args.max_plies, &mut rng, show_plies);

    report_result(&record, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Generate, select, apply until a side runs out of moves or the ply limit
fn play_game(
    mut board: Board,
    policy: Policy,
    max_plies: usize,
    rng: &mut ChaCha8Rng,
    show_plies: bool,
) -> GameRecord {
    let heuristics = Heuristics::default();
    let mut moves = Vec::new();
    let mut result = GameResult::Ongoing;

    while moves.len() < max_plies {
        let legal = board.all_moves();
        let Some(mv) = select_move(&legal, policy, rng) else {
            result = GameResult::win_for(board.side_to_move().opponent());
            break;
        };
        let mv = mv.clone();

        let side = board.side_to_move();
        board.apply_move(&mv);
        moves.push(mv);

        let material = evaluate(&board, &heuristics);
        tracing::info!(
            "Ply {}: {} plays {} (material {})",
            moves.len(),
            side,
            moves[moves.len() - 1],
            material
        );
        if show_plies {
            println!("\n{}\n", board);
        }
    }

    if result == GameResult::Ongoing {
        result = board.result();
    }
    if result == GameResult::Ongoing {
        tracing::warn!("Ply limit {} reached without a result", max_plies);
    }

    let material = evaluate(&board, &heuristics);
    GameRecord {
        result,
        moves,
        final_board: board,
        material,
    }
}

/// Print the record in the requested format
fn report_result(record: &GameRecord, json: bool) -> Result<()> {
    if json {
        print_json_result(record)
    } else {
        print_text_result(record);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Pick one move; `None` when there is nothing to play
fn select_move<'a>(moves: &'a [Move], policy: Policy, rng: &mut ChaCha8Rng) -> Option<&'a Move> {
    match policy {
        Policy::First => moves.first(),
        Policy::Last => moves.last(),
        Policy::Random => {
            if moves.is_empty() {
                None
            } else {
                moves.get(rng.gen_range(0..moves.len()))
            }
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Print result as JSON
fn print_json_result(record: &GameRecord) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        result: GameResult,
        plies: usize,
        material: i32,
        moves: Vec<String>,
        final_board: &'a Board,
    }

    let output = JsonOutput {
        result: record.result,
        plies: record.moves.len(),
        material: record.material,
        moves: record.moves.iter().map(Move::to_string).collect(),
        final_board: &record.final_board,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print result as text
fn print_text_result(record: &GameRecord) {
    println!("=== Game Over ===");
    println!("{}", record.final_board);
    println!("Result:   {:?}", record.result);
    println!("Plies:    {}", record.moves.len());
    println!("Material: {}", record.material);
}

// ============================================================================
// TESTS
// ============================================================================
