//! Tictactoe Arena - terminal entry point.

use anyhow::Result;
use clap::Parser;
use tictactoe_arena::auth::AuthService;
use tictactoe_arena::db::ArenaRepository;
use tictactoe_arena::service::MatchService;
use tictactoe_arena::ui::{Services, run_ui};
use tracing::info;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging goes to a file so it never fights the TUI for the terminal.
    let log_file = std::fs::File::create(&cli.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    info!(db_path = %cli.db_path, "Starting Tictactoe Arena");

    let repository = ArenaRepository::new(cli.db_path);
    repository.run_migrations()?;

    let services = Services {
        auth: AuthService::new(repository.clone()),
        matches: MatchService::new(repository),
    };

    run_ui(services).await
}
