//! User use-case service.
//!
//! # Responsibility
//! - Provide user CRUD entry points for core callers.
//! - Expose email-identity and employment-validation checks that callers
//!   run before mutating.
//!
//! # Invariants
//! - Persistence methods are pass-throughs; they do not re-run checks.
//! - Service layer remains storage-agnostic.

use crate::model::employment::Employment;
use crate::model::user::{User, UserId};
use crate::repo::employment_store::EmploymentRepository;
use crate::repo::user_store::UserRepository;
use crate::repo::RepoResult;
use crate::validation::{validate_employments, ValidationReport};
use log::info;

/// Use-case service wrapper for user operations.
pub struct UserService<U, E> {
    users: U,
    employments: E,
}

impl<U: UserRepository, E: EmploymentRepository> UserService<U, E> {
    /// Creates a service over the provided user and employment stores.
    pub fn new(users: U, employments: E) -> Self {
        Self { users, employments }
    }

    /// Gets one user, with employments, by id.
    pub fn get(&self, id: UserId) -> RepoResult<Option<User>> {
        self.users.get(id)
    }

    /// Lists all users in creation order.
    pub fn get_all(&self) -> RepoResult<Vec<User>> {
        self.users.get_all()
    }

    /// Returns whether `email` is used by a user other than `exclude_id`.
    ///
    /// Passing the id of the user being updated lets it keep its own email.
    pub fn is_existing(&self, email: &str, exclude_id: Option<UserId>) -> RepoResult<bool> {
        self.users.is_existing(email, exclude_id)
    }

    /// Persists a new user and its employments.
    ///
    /// Callers are expected to have checked `employments_are_valid` and
    /// `is_existing` first.
    pub fn create(&self, user: &User) -> RepoResult<User> {
        let created = self.users.add(user)?;
        info!(
            "event=user_create module=service status=ok user_id={} employments={}",
            created.id,
            created.employments.len()
        );
        Ok(created)
    }

    /// Overwrites the user at `id`. Returns `false` when it does not exist.
    pub fn update(&self, id: UserId, user: &User) -> RepoResult<bool> {
        self.users.update(id, user)
    }

    /// Deletes the user at `id` together with its employments.
    ///
    /// Missing ids are ignored.
    pub fn delete(&self, id: UserId) -> RepoResult<()> {
        self.users.remove(id)?;
        info!("event=user_delete module=service status=ok user_id={id}");
        Ok(())
    }

    /// Runs standalone employment validation.
    pub fn employments_are_valid(&self, employments: &[Employment]) -> ValidationReport {
        validate_employments(employments)
    }

    /// Lists the employments owned by `user_id`.
    pub fn employments_of(&self, user_id: UserId) -> RepoResult<Vec<Employment>> {
        self.employments.list_by_user(user_id)
    }
}
