//! Waypoint CLI - Personal finance engine
//!
//! Usage:
//!   waypoint init                                   Initialize database
//!   waypoint import --file CSV --user EMAIL         Import transactions
//!   waypoint report dashboard --user EMAIL          Print a report as JSON
//!   waypoint serve --port 3000                      Start the API server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Import { file, user } => {
            commands::cmd_import(&cli.db, &file, &user, cli.no_encrypt)
        }
        Commands::Report { kind, user, extra } => {
            commands::cmd_report(&cli.db, kind, &user, extra, cli.no_encrypt)
        }
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(&cli.db, &host, port, no_auth, cli.no_encrypt).await,
    }
}
