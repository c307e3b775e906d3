//! Repository layer: one generic SQLite store plus entity-specific lookups.
//!
//! # Responsibility
//! - Define the CRUD contract shared by every entity (`Repository<R>`).
//! - Isolate SQL details from service/business orchestration.
//! - Translate SQLite constraint failures into semantic errors.
//!
//! # Invariants
//! - Missing records are reported as `None`/`false`/no-op, never as errors.
//! - Stores never enforce cross-entity business rules; the schema only
//!   backs them with a unique index and a foreign key.

use crate::db::DbError;
use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod employment_store;
pub mod store;
pub mod user_store;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying storage failure.
    Db(DbError),
    /// A unique constraint rejected the write (duplicate email).
    Conflict(String),
    /// A foreign key rejected the write (dangling `user_id`).
    InvalidReference(String),
    /// Persisted row could not be mapped back into a record (column type or
    /// integer range mismatch).
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Conflict(details) => write!(f, "conflicting record: {details}"),
            Self::InvalidReference(details) => write!(f, "invalid reference: {details}"),
            Self::InvalidData(details) => write!(f, "invalid persisted data: {details}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Conflict(_) | Self::InvalidReference(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match &value {
            rusqlite::Error::SqliteFailure(failure, message) => {
                let details = message.clone().unwrap_or_else(|| failure.to_string());
                match failure.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        return Self::Conflict(details);
                    }
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return Self::InvalidReference(details),
                    _ => {}
                }
            }
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::IntegralValueOutOfRange(..) => {
                return Self::InvalidData(value.to_string());
            }
            _ => {}
        }
        Self::Db(DbError::Sqlite(value))
    }
}
