//! Employment use-case service.
//!
//! Thin persistence delegate: callers validate employments and confirm the
//! owning user exists before calling `create`/`update`.

use crate::model::employment::{Employment, EmploymentId};
use crate::model::user::UserId;
use crate::repo::employment_store::EmploymentRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case service wrapper for employment operations.
pub struct EmploymentService<E> {
    employments: E,
}

impl<E: EmploymentRepository> EmploymentService<E> {
    pub fn new(employments: E) -> Self {
        Self { employments }
    }

    pub fn get(&self, id: EmploymentId) -> RepoResult<Option<Employment>> {
        self.employments.get(id)
    }

    pub fn list_for_user(&self, user_id: UserId) -> RepoResult<Vec<Employment>> {
        self.employments.list_by_user(user_id)
    }

    /// Persists a new employment.
    ///
    /// A `user_id` without a stored user fails with `RepoError::InvalidReference`.
    pub fn create(&self, employment: &Employment) -> RepoResult<Employment> {
        let created = self.employments.add(employment)?;
        info!(
            "event=employment_create module=service status=ok employment_id={} user_id={}",
            created.id, created.user_id
        );
        Ok(created)
    }

    /// Overwrites the employment at `id`. Returns `false` when it does not exist.
    pub fn update(&self, id: EmploymentId, employment: &Employment) -> RepoResult<bool> {
        self.employments.update(id, employment)
    }

    /// Deletes the employment at `id`; missing ids are ignored.
    pub fn delete(&self, id: EmploymentId) -> RepoResult<()> {
        self.employments.remove(id)
    }
}
