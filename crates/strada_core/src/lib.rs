//! Core domain logic for Strada: users, their employments, and the
//! integrity rules that keep both consistent.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use config::{ConfigError, CoreConfig, StorageLocation};
pub use db::{DbError, SharedDb};
pub use logging::{init_logging, logging_status, LogLevel, LogTarget, LoggingError};
pub use model::employment::{Employment, EmploymentId};
pub use model::user::{Address, User, UserId};
pub use model::{RecordId, UNSET_ID};
pub use repo::employment_store::{EmploymentRepository, EmploymentStore};
pub use repo::store::{Record, Repository, Store};
pub use repo::user_store::{UserRepository, UserStore};
pub use repo::{RepoError, RepoResult};
pub use service::employment_service::EmploymentService;
pub use service::integrity_service::{IntegrityError, IntegrityResult, IntegrityService};
pub use service::user_service::UserService;
pub use validation::{
    validate_employments, validate_owned_employments, validate_user, ValidationReport,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
