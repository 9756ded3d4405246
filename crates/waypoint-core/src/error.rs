//! Error types for Waypoint

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or out-of-domain input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing record, or a record owned by someone else
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn not_found(what: &str, id: i64) -> Self {
        Self::NotFound(format!("{} {}", what, id))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
