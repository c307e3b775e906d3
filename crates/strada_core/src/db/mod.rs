//! SQLite storage bootstrap, schema migrations and the shared connection handle.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the Strada core.
//! - Apply schema migrations in deterministic order.
//! - Hand out one lock-guarded connection shared by every store.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Stores never touch application data before migrations succeed.
//! - Each store operation holds the connection lock for its whole duration.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A thread panicked while holding the connection lock.
    LockPoisoned,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::LockPoisoned => write!(f, "database connection lock is poisoned"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::LockPoisoned => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Cloneable handle to one migrated connection.
///
/// All stores built from clones of the same handle observe the same
/// collections. Calls are serialized through the inner mutex.
#[derive(Debug, Clone)]
pub struct SharedDb {
    conn: Arc<Mutex<Connection>>,
}

impl SharedDb {
    /// Wraps a connection returned by [`open_db`] or [`open_db_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Opens a fresh in-memory database and wraps it.
    pub fn in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::new)
    }

    /// Acquires exclusive access to the connection.
    pub fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }
}
