//! CSV import command

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use waypoint_core::db::Database;
use waypoint_core::import::{import_csv, ImportReport};

use super::open_db;

/// Import a CSV file for `user`
pub fn import_file(db: &Database, file: &Path, user: &str) -> Result<ImportReport> {
    let owner = db
        .resolve_owner(user)
        .with_context(|| format!("Invalid user: {}", user))?;
    let reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;

    import_csv(db, owner, reader).context("Import failed")
}

pub fn cmd_import(db_path: &Path, file: &Path, user: &str, no_encrypt: bool) -> Result<()> {
    println!("Importing {} for {}...", file.display(), user);

    let db = open_db(db_path, no_encrypt)?;
    let report = import_file(&db, file, user)?;

    println!("   Imported: {}", report.success_count);
    if report.error_count > 0 {
        println!("   Rejected: {}", report.error_count);
        for err in &report.errors {
            println!("     - {} ({})", err.message, err.row);
        }
    }

    Ok(())
}
