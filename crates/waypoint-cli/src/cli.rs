//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Waypoint - Know where your money stands
#[derive(Parser)]
#[command(name = "waypoint")]
#[command(about = "Self-hosted personal finance engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "waypoint.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set WAYPOINT_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Import transactions from CSV (headers: type, category, amount, date, description)
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,

        /// Owner of the imported transactions
        #[arg(short, long)]
        user: String,
    },

    /// Print a report as JSON
    Report {
        /// Which report to build
        #[arg(value_enum)]
        kind: ReportKind,

        /// Owner to report on
        #[arg(short, long)]
        user: String,

        /// Extra monthly payment for the debt plan
        #[arg(long)]
        extra: Option<f64>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        #[arg(long)]
        no_auth: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Monthly summary, history, and insights
    Dashboard,
    /// Assets minus debts
    Networth,
    /// Progress toward financial independence
    Fire,
    /// Debt payoff plan
    Debts,
    /// Investment advice
    Advice,
}
