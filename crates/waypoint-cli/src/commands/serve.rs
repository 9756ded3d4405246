//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use waypoint_server::{ServerConfig, API_KEYS_ENV, USER_HEADER};

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
) -> Result<()> {
    println!("Starting Waypoint API server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);

    let config = ServerConfig::from_env(!no_auth);

    if no_auth {
        println!();
        println!("   Authentication DISABLED - do not expose to network!");
    } else {
        println!("   Authentication: {} header from a trusted proxy", USER_HEADER);
        if !config.api_keys.is_empty() {
            println!(
                "   API keys: {} configured ({})",
                config.api_keys.len(),
                API_KEYS_ENV
            );
        }
    }
    if !config.allowed_origins.is_empty() {
        println!("   CORS origins: {}", config.allowed_origins.join(", "));
    }
    println!(
        "   Advisor monthly-expense reference: {:.2}",
        config.advisor.monthly_expenses
    );
    println!();

    let db = open_db(db_path, no_encrypt)?;

    waypoint_server::serve(db, host, port, config)
        .await
        .context("Server error")?;

    Ok(())
}
