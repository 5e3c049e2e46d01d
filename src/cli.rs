//! Command-line interface for tictactoe_arena.

use clap::Parser;

/// Tictactoe Arena - best-of-N tic-tac-toe with accounts and replays
#[derive(Parser, Debug)]
#[command(name = "tictactoe_arena")]
#[command(about = "Play tic-tac-toe series against a friend or the AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the database file (created if it doesn't exist)
    #[arg(long, default_value = "tictactoe_arena.db")]
    pub db_path: String,

    /// Path to the log file (the TUI owns the terminal, so logs go to disk)
    #[arg(long, default_value = "tictactoe_arena.log")]
    pub log_file: String,
}
