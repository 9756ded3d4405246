//! SQLite store with connection pooling and migrations
//!
//! This module is organized by entity:
//! - `transactions` - Transaction CRUD and filtered lookups
//! - `debts` - Debts and status updates
//! - `assets` - Assets and value updates
//! - `goals` - Savings goals
//! - `bills` - Recurring bill templates
//! - `consumption` - Amortized consumption items
//!
//! Every table carries an `owner_id`; each query is scoped by it.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::OwnerId;

mod assets;
mod bills;
mod consumption;
mod debts;
mod goals;
mod transactions;

#[cfg(test)]
mod tests;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Environment variable for database encryption key
pub const DB_KEY_ENV: &str = "WAYPOINT_DB_KEY";

/// Derive an encryption key from a passphrase using Argon2
///
/// A fixed application salt means the same passphrase always opens the same
/// database regardless of its path.
fn derive_key(passphrase: &str) -> Result<String> {
    use argon2::{password_hash::SaltString, Argon2, PasswordHasher};

    // Changing this invalidates every existing encrypted database
    const APP_SALT: &[u8; 16] = b"waypoint-salt-v1";

    let salt = SaltString::encode_b64(APP_SALT)
        .map_err(|e| Error::Encryption(format!("Failed to create salt: {}", e)))?;

    let hash = Argon2::default()
        .hash_password(passphrase.as_bytes(), &salt)
        .map_err(|e| Error::Encryption(format!("Failed to derive key: {}", e)))?;

    let output = hash
        .hash
        .ok_or_else(|| Error::Encryption("No hash output".to_string()))?;
    Ok(hex::encode(output.as_bytes()))
}

/// Parse a SQLite datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

fn conversion_error(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, msg.into())
}

/// Read a `YYYY-MM-DD` column
pub(crate) fn get_date(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let s: String = row.get(idx)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map_err(|e| conversion_error(idx, format!("bad date {:?}: {}", s, e)))
}

/// Read a nullable `YYYY-MM-DD` column
pub(crate) fn get_opt_date(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    let s: Option<String> = row.get(idx)?;
    s.map(|s| {
        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|e| conversion_error(idx, format!("bad date {:?}: {}", s, e)))
    })
    .transpose()
}

/// Read a text column holding one of the model enums
pub(crate) fn get_enum<T: FromStr<Err = String>>(
    row: &rusqlite::Row,
    idx: usize,
) -> rusqlite::Result<T> {
    let s: String = row.get(idx)?;
    s.parse().map_err(|e| conversion_error(idx, e))
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    db_path: String,
}

impl Database {
    /// Open an encrypted database
    ///
    /// Requires `WAYPOINT_DB_KEY`. Use `new_unencrypted()` for development
    /// without encryption.
    pub fn new(path: &str) -> Result<Self> {
        match std::env::var(DB_KEY_ENV).ok() {
            Some(key) => Self::new_with_key(path, Some(&key)),
            None => Err(Error::Encryption(format!(
                "Database encryption required. Set {} environment variable with your passphrase, \
                or use --no-encrypt for unencrypted databases (not recommended for production).",
                DB_KEY_ENV
            ))),
        }
    }

    /// Open an unencrypted database (development and tests only)
    pub fn new_unencrypted(path: &str) -> Result<Self> {
        Self::new_with_key(path, None)
    }

    /// Open a database with an explicit encryption passphrase
    pub fn new_with_key(path: &str, passphrase: Option<&str>) -> Result<Self> {
        let key_pragma = passphrase
            .map(derive_key)
            .transpose()?
            .map(|key| format!("PRAGMA key = 'x\"{}\"';", key));

        // The key and pragmas must be set on every new connection
        let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
            if let Some(pragma) = &key_pragma {
                conn.execute_batch(pragma)?;
            }
            conn.execute_batch("PRAGMA foreign_keys = ON;")
        });
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        info!(path, encrypted = passphrase.is_some(), "Database ready");
        Ok(db)
    }

    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Uses a temporary file rather than `:memory:` because SQLCipher has
    /// issues with in-memory databases in the connection pool.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "waypoint_test_{}_{}.db",
            std::process::id(),
            id
        ));
        let path = path.to_string_lossy().into_owned();

        let _ = std::fs::remove_file(&path);

        Self::new_unencrypted(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Look up (or register) the owner id for an authenticated identity
    pub fn resolve_owner(&self, email: &str) -> Result<OwnerId> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(Error::validation("identity must not be empty"));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT OR IGNORE INTO users (email) VALUES (?)",
            params![email],
        )?;
        let id: i64 = conn.query_row(
            "SELECT id FROM users WHERE email = ?",
            params![email],
            |row| row.get(0),
        )?;

        debug!(owner = id, "Resolved owner");
        Ok(id)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block writers
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;

            -- Owners, keyed by the identity presented at the API boundary
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY,
                owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                type TEXT NOT NULL,                        -- INCOME, EXPENSE, DEBT_PAYMENT
                category TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount > 0),
                description TEXT NOT NULL DEFAULT '',
                is_recurring BOOLEAN NOT NULL DEFAULT 0,
                is_locked BOOLEAN NOT NULL DEFAULT 0,
                recurrence TEXT NOT NULL DEFAULT 'NONE',   -- NONE, MONTHLY, YEARLY
                date DATE NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                CHECK (is_locked = 0 OR type = 'EXPENSE')
            );

            CREATE INDEX IF NOT EXISTS idx_transactions_owner_date ON transactions(owner_id, date);
            CREATE INDEX IF NOT EXISTS idx_transactions_owner_type ON transactions(owner_id, type);

            CREATE TABLE IF NOT EXISTS debts (
                id INTEGER PRIMARY KEY,
                owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                total_amount REAL NOT NULL,
                current_amount REAL NOT NULL,
                interest_rate REAL NOT NULL DEFAULT 0,     -- annual %
                minimum_payment REAL NOT NULL DEFAULT 0,
                due_date INTEGER,                          -- day of month
                status TEXT NOT NULL DEFAULT 'ACTIVE',     -- ACTIVE, PAID_OFF
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_debts_owner_status ON debts(owner_id, status);

            CREATE TABLE IF NOT EXISTS assets (
                id INTEGER PRIMARY KEY,
                owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                type TEXT NOT NULL,
                value REAL NOT NULL,
                is_liquid BOOLEAN NOT NULL DEFAULT 0,
                last_updated DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_assets_owner ON assets(owner_id);

            CREATE TABLE IF NOT EXISTS goals (
                id INTEGER PRIMARY KEY,
                owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                target_amount REAL NOT NULL,
                saved_amount REAL NOT NULL DEFAULT 0,
                deadline DATE,
                priority TEXT NOT NULL DEFAULT 'MEDIUM',
                status TEXT NOT NULL DEFAULT 'ACTIVE',
                completed_date DATE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_goals_owner ON goals(owner_id);

            CREATE TABLE IF NOT EXISTS bills (
                id INTEGER PRIMARY KEY,
                owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                amount REAL NOT NULL,
                due_day INTEGER NOT NULL,
                category TEXT NOT NULL DEFAULT 'Bills',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_bills_owner ON bills(owner_id);

            CREATE TABLE IF NOT EXISTS consumption_items (
                id INTEGER PRIMARY KEY,
                owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                cost REAL NOT NULL,
                months INTEGER NOT NULL CHECK (months >= 1),
                monthly_cost REAL NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_consumption_items_owner ON consumption_items(owner_id);
            "#,
        )?;

        Ok(())
    }
}
