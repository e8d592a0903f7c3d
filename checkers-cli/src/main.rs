//! Checkers CLI - Command-line interface
//!
//! Commands:
//! - show: Print a position and its material balance
//! - moves: List legal moves for a position or a single piece
//! - play: Run a game loop with a simple move-selection policy

mod moves_cmd;
mod play_cmd;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use checkers_core::{Board, Position};

#[derive(Parser)]
#[command(name = "checkers")]
#[command(about = "8x8 checkers rules engine")]
struct Cli {
    /// Log engine internals (debug level) unless RUST_LOG is set
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a position and its material balance
    Show {
        /// Position JSON file (standard layout if omitted)
        #[arg(long, value_name = "FILE")]
        position: Option<PathBuf>,
    },
    /// List legal moves
    Moves(moves_cmd::MovesArgs),
    /// Play a game from a position
    Play(play_cmd::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Show { position } => {
            let board = load_board(position.as_deref())?;
            moves_cmd::show(&board);
            Ok(())
        }
        Commands::Moves(args) => moves_cmd::run(args),
        Commands::Play(args) => play_cmd::run(args),
    }
}

/// Install the fmt subscriber; RUST_LOG wins over --verbose
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Board from a position file, or the standard layout
pub(crate) fn load_board(path: Option<&Path>) -> Result<Board> {
    match path {
        Some(path) => {
            let position = Position::load(path)?;
            tracing::info!(
                "Loaded position {} from {}",
                position.name.as_deref().unwrap_or("unnamed"),
                path.display()
            );
            position
                .to_board()
                .with_context(|| format!("Invalid layout in {}", path.display()))
        }
        None => Ok(Board::new()),
    }
}
