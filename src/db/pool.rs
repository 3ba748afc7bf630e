//! SQLite connection wrapper (one connection per process, CLI-sized).

use rusqlite::{Connection, Result, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

/// Default wait when another writer holds the database lock.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        Self::open(path, DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// Open the database with foreign keys enforced (cascade deletes rely on it).
    pub fn open(path: &str, busy_timeout_ms: u64) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    /// Start a write transaction. IMMEDIATE takes the write lock up front so
    /// two writers never both read-then-write the same rows.
    pub fn write_tx(&mut self) -> Result<Transaction<'_>> {
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
    }
}
