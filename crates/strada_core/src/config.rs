//! Process configuration for the core.
//!
//! # Responsibility
//! - Read storage and logging settings from the environment.
//! - Turn them into ready-to-use storage and logging targets.
//!
//! # Invariants
//! - Missing variables fall back to an in-memory database and stderr logging
//!   at the build's default level.
//! - A configured log directory must be absolute.

use crate::db::{open_db, open_db_in_memory, DbResult, SharedDb};
use crate::logging::{LogLevel, LogTarget};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "STRADA_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "STRADA_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "STRADA_LOG_DIR";

const IN_MEMORY_MARKER: &str = ":memory:";

/// Backing storage for the stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    /// Lost when the process exits.
    InMemory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub storage: StorageLocation,
    pub log_level: LogLevel,
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage: StorageLocation::InMemory,
            log_level: LogLevel::default_for_build(),
            log_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(value) => write!(
                f,
                "unsupported {LOG_LEVEL_ENV} `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeLogDir(path) => write!(
                f,
                "{LOG_DIR_ENV} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

impl CoreConfig {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let storage = match read(DB_PATH_ENV) {
            None => StorageLocation::InMemory,
            Some(value) if value == IN_MEMORY_MARKER => StorageLocation::InMemory,
            Some(value) => StorageLocation::File(PathBuf::from(value)),
        };

        let log_level = match read(LOG_LEVEL_ENV) {
            None => LogLevel::default_for_build(),
            Some(value) => LogLevel::parse(&value).ok_or(ConfigError::InvalidLogLevel(value))?,
        };

        let log_dir = read(LOG_DIR_ENV).map(PathBuf::from);
        if let Some(dir) = &log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }

        Ok(Self {
            storage,
            log_level,
            log_dir,
        })
    }

    pub fn log_target(&self) -> LogTarget {
        self.log_dir
            .clone()
            .map_or(LogTarget::Stderr, LogTarget::Directory)
    }

    /// Opens and migrates the configured storage.
    pub fn open_storage(&self) -> DbResult<SharedDb> {
        let conn = match &self.storage {
            StorageLocation::InMemory => open_db_in_memory()?,
            StorageLocation::File(path) => open_db(path)?,
        };
        Ok(SharedDb::new(conn))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, StorageLocation, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::{LogLevel, LogTarget};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn load(pairs: &[(&str, &str)]) -> Result<CoreConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.log_target(), LogTarget::Stderr);
    }

    #[test]
    fn reads_every_variable() {
        let config = load(&[
            (DB_PATH_ENV, "/var/lib/strada/strada.db"),
            (LOG_LEVEL_ENV, "WARN"),
            (LOG_DIR_ENV, "/var/log/strada"),
        ])
        .unwrap();

        assert_eq!(
            config.storage,
            StorageLocation::File(PathBuf::from("/var/lib/strada/strada.db"))
        );
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(
            config.log_target(),
            LogTarget::Directory(PathBuf::from("/var/log/strada"))
        );
    }

    #[test]
    fn memory_marker_and_blank_path_mean_in_memory() {
        assert_eq!(load(&[(DB_PATH_ENV, ":memory:")]).unwrap().storage, StorageLocation::InMemory);
        assert_eq!(load(&[(DB_PATH_ENV, "  ")]).unwrap().storage, StorageLocation::InMemory);
    }

    #[test]
    fn rejects_bad_level_and_relative_log_dir() {
        assert_eq!(
            load(&[(LOG_LEVEL_ENV, "loud")]).unwrap_err(),
            ConfigError::InvalidLogLevel("loud".to_string())
        );
        assert_eq!(
            load(&[(LOG_DIR_ENV, "logs")]).unwrap_err(),
            ConfigError::RelativeLogDir(PathBuf::from("logs"))
        );
    }

    #[test]
    fn open_storage_returns_migrated_in_memory_db() {
        let db = CoreConfig::default().open_storage().unwrap();
        let conn = db.lock().unwrap();
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, crate::db::migrations::latest_version());
    }
}
