//! Core logging bootstrap.
//!
//! # Responsibility
//! - Start the `flexi_logger` backend exactly once per process.
//! - Parse log levels and targets coming from configuration.
//!
//! # Invariants
//! - Init is idempotent for the same level and target.
//! - Re-initialization with a different level or target is rejected.
//! - Initialization never panics.
//!
//! Core code logs through the `log` facade as
//! `event=<name> module=<module> status=<status> key=value...`.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, WriteMode,
};
use log::info;
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "strada";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: LogLevel,
    target: LogTarget,
    _handle: LoggerHandle,
}

/// Verbosity accepted by [`init_logging`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parses `trace|debug|info|warn|warning|error`, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// `debug` for debug builds, `info` for release builds.
    pub fn default_for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Info
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Size-rotated files inside an absolute directory.
    Directory(PathBuf),
}

impl Display for LogTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stderr => f.write_str("stderr"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

#[derive(Debug)]
pub enum LoggingError {
    /// Logging is already running with another level or target.
    AlreadyInitialized {
        active_level: LogLevel,
        active_target: LogTarget,
    },
    RelativeDirectory(PathBuf),
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyInitialized {
                active_level,
                active_target,
            } => write!(
                f,
                "logging already initialized with level `{active_level}` at `{active_target}`; refusing to switch"
            ),
            Self::RelativeDirectory(path) => {
                write!(f, "log directory must be absolute, got `{}`", path.display())
            }
            Self::CreateDirectory { path, source } => write!(
                f,
                "failed to create log directory `{}`: {source}",
                path.display()
            ),
            Self::Backend(err) => write!(f, "failed to start logger: {err}"),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDirectory { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            Self::AlreadyInitialized { .. } | Self::RelativeDirectory(_) => None,
        }
    }
}

impl From<FlexiLoggerError> for LoggingError {
    fn from(value: FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

/// Initializes core logging.
///
/// # Errors
/// - `RelativeDirectory` / `CreateDirectory` for unusable file targets.
/// - `AlreadyInitialized` when called again with a different configuration.
/// - `Backend` when `flexi_logger` fails to start.
pub fn init_logging(level: LogLevel, target: &LogTarget) -> Result<(), LoggingError> {
    if let LogTarget::Directory(dir) = target {
        if !dir.is_absolute() {
            return Err(LoggingError::RelativeDirectory(dir.clone()));
        }
    }

    let state = LOGGING_STATE.get_or_try_init(|| start_backend(level, target))?;
    if state.level != level || &state.target != target {
        return Err(LoggingError::AlreadyInitialized {
            active_level: state.level,
            active_target: state.target.clone(),
        });
    }
    Ok(())
}

/// Returns the active `(level, target)`, or `None` before initialization.
pub fn logging_status() -> Option<(LogLevel, LogTarget)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.target.clone()))
}

fn start_backend(level: LogLevel, target: &LogTarget) -> Result<LoggingState, LoggingError> {
    let logger = Logger::try_with_str(level.as_str())?;
    let handle = match target {
        LogTarget::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::detailed_format)
            .start()?,
        LogTarget::Directory(dir) => {
            create_log_dir(dir)?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()?
        }
    };

    info!(
        "event=core_init module=logging status=ok level={level} target={target} version={}",
        env!("CARGO_PKG_VERSION")
    );

    Ok(LoggingState {
        level,
        target: target.clone(),
        _handle: handle,
    })
}

fn create_log_dir(dir: &Path) -> Result<(), LoggingError> {
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })
}
