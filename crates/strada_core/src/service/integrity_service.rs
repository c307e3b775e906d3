//! Pre-checked mutations across users and employments.
//!
//! # Responsibility
//! - Run validation, email-uniqueness and user-existence checks before
//!   delegating to the user/employment services.
//! - Report every rejection as a tagged `IntegrityError`.
//!
//! # Invariants
//! - Nothing is persisted when a check fails.
//! - Checks and writes are separate store calls (check-then-act). A
//!   concurrent writer can slip between them; the storage unique index and
//!   foreign key then reject the write and the error is mapped onto the
//!   same tag the pre-check would have produced.

use crate::model::employment::{Employment, EmploymentId};
use crate::model::user::{User, UserId};
use crate::repo::employment_store::EmploymentRepository;
use crate::repo::user_store::UserRepository;
use crate::repo::RepoError;
use crate::service::employment_service::EmploymentService;
use crate::service::user_service::UserService;
use crate::validation::{validate_user, ValidationReport};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reasons for pre-checked mutations.
#[derive(Debug)]
pub enum IntegrityError {
    /// Field validation failed; messages are in input order.
    Invalid(Vec<String>),
    /// Another user already uses this email.
    EmailTaken(String),
    /// Target user of an update does not exist.
    UserNotFound(UserId),
    /// Target employment of an update does not exist.
    EmploymentNotFound(EmploymentId),
    /// Employment references a user that does not exist.
    UnknownUser(UserId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for IntegrityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(errors) => write!(f, "{}", errors.join(", ")),
            Self::EmailTaken(email) => write!(f, "a user with email {email} already exists"),
            Self::UserNotFound(id) => write!(f, "user with id of {id} does not exist"),
            Self::EmploymentNotFound(id) => write!(f, "employment with id of {id} does not exist"),
            Self::UnknownUser(id) => write!(f, "user with id of {id} does not exist"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IntegrityError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for IntegrityError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type IntegrityResult<T> = Result<T, IntegrityError>;

/// Entry points that enforce cross-entity invariants before writing.
pub struct IntegrityService<U, E> {
    users: UserService<U, E>,
    employments: EmploymentService<E>,
}

impl<U, E> IntegrityService<U, E>
where
    U: UserRepository,
    E: EmploymentRepository + Clone,
{
    /// Builds both services over the given stores.
    pub fn new(users: U, employments: E) -> Self {
        Self {
            users: UserService::new(users, employments.clone()),
            employments: EmploymentService::new(employments),
        }
    }

    /// Underlying user service, for reads and unchecked calls.
    pub fn users(&self) -> &UserService<U, E> {
        &self.users
    }

    /// Underlying employment service, for reads and unchecked calls.
    pub fn employments(&self) -> &EmploymentService<E> {
        &self.employments
    }

    /// Validates `user`, rejects a taken email, then creates it.
    ///
    /// Embedded employments are checked with new-owner rules: their
    /// `user_id` is ignored, whether `0` or another user's id, and every
    /// stored employment is stamped with the created user's id. Use
    /// `create_employment` to attach an employment to an existing user.
    pub fn create_user(&self, user: &User) -> IntegrityResult<User> {
        ensure_valid("user_create", validate_user(user, None))?;

        if self.users.is_existing(&user.email, None)? {
            return Err(reject("user_create", IntegrityError::EmailTaken(user.email.clone())));
        }

        self.users
            .create(user)
            .map_err(|err| email_conflict("user_create", err, &user.email))
    }

    /// Validates `user`, rejects an email used by another user, then
    /// overwrites the user at `id`.
    pub fn update_user(&self, id: UserId, user: &User) -> IntegrityResult<()> {
        ensure_valid("user_update", validate_user(user, Some(id)))?;

        if self.users.is_existing(&user.email, Some(id))? {
            return Err(reject("user_update", IntegrityError::EmailTaken(user.email.clone())));
        }

        let updated = self
            .users
            .update(id, user)
            .map_err(|err| email_conflict("user_update", err, &user.email))?;
        if !updated {
            return Err(reject("user_update", IntegrityError::UserNotFound(id)));
        }

        info!("event=user_update module=service status=ok user_id={id}");
        Ok(())
    }

    /// Deletes the user at `id` and, through the cascade, its employments.
    pub fn delete_user(&self, id: UserId) -> IntegrityResult<()> {
        Ok(self.users.delete(id)?)
    }

    /// Validates `employment`, checks that its user exists, then creates it.
    pub fn create_employment(&self, employment: &Employment) -> IntegrityResult<Employment> {
        self.check_employment("employment_create", employment)?;

        self.employments
            .create(employment)
            .map_err(|err| dangling_owner("employment_create", err, employment.user_id))
    }

    /// Validates `employment`, checks that its user exists, then overwrites
    /// the employment at `id`.
    pub fn update_employment(
        &self,
        id: EmploymentId,
        employment: &Employment,
    ) -> IntegrityResult<()> {
        self.check_employment("employment_update", employment)?;

        let updated = self
            .employments
            .update(id, employment)
            .map_err(|err| dangling_owner("employment_update", err, employment.user_id))?;
        if !updated {
            return Err(reject(
                "employment_update",
                IntegrityError::EmploymentNotFound(id),
            ));
        }

        info!("event=employment_update module=service status=ok employment_id={id}");
        Ok(())
    }

    /// Deletes the employment at `id`; missing ids are ignored.
    pub fn delete_employment(&self, id: EmploymentId) -> IntegrityResult<()> {
        Ok(self.employments.delete(id)?)
    }

    fn check_employment(&self, event: &str, employment: &Employment) -> IntegrityResult<()> {
        let report = self
            .users
            .employments_are_valid(std::slice::from_ref(employment));
        ensure_valid(event, report)?;

        if self.users.get(employment.user_id)?.is_none() {
            return Err(reject(event, IntegrityError::UnknownUser(employment.user_id)));
        }
        Ok(())
    }
}

fn ensure_valid(event: &str, report: ValidationReport) -> IntegrityResult<()> {
    if report.is_valid() {
        return Ok(());
    }
    Err(reject(event, IntegrityError::Invalid(report.errors)))
}

fn reject(event: &str, err: IntegrityError) -> IntegrityError {
    warn!("event={event} module=service status=rejected reason={err}");
    err
}

/// Maps a unique-index rejection of a user write onto `EmailTaken`.
fn email_conflict(event: &str, err: RepoError, email: &str) -> IntegrityError {
    match err {
        RepoError::Conflict(_) => reject(event, IntegrityError::EmailTaken(email.to_string())),
        other => IntegrityError::Repo(other),
    }
}

fn dangling_owner(event: &str, err: RepoError, user_id: UserId) -> IntegrityError {
    match err {
        RepoError::InvalidReference(_) => reject(event, IntegrityError::UnknownUser(user_id)),
        other => IntegrityError::Repo(other),
    }
}
