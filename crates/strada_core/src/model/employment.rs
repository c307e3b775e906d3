//! Employment domain model.
//!
//! # Invariants
//! - `user_id` references an existing user once persisted.
//! - `end_date` should not be earlier than `start_date` when both are set.

use super::{RecordId, UNSET_ID};
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

pub type EmploymentId = RecordId;

/// One employment record owned by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employment {
    #[serde(default)]
    pub id: EmploymentId,
    /// Owning user. Stamped by the user store for embedded employments.
    #[serde(default)]
    pub user_id: UserId,
    pub company: String,
    #[serde(default)]
    pub months_of_experience: u32,
    #[serde(default)]
    pub salary: u32,
    /// Unix epoch milliseconds.
    pub start_date: Option<i64>,
    /// Unix epoch milliseconds. Open-ended when `None`.
    #[serde(default)]
    pub end_date: Option<i64>,
}

impl Employment {
    /// Creates an unsaved employment for `user_id` starting at `start_date`.
    pub fn new(user_id: UserId, company: impl Into<String>, start_date: i64) -> Self {
        Self {
            id: UNSET_ID,
            user_id,
            company: company.into(),
            months_of_experience: 0,
            salary: 0,
            start_date: Some(start_date),
            end_date: None,
        }
    }

    /// Returns whether the employment has no end date.
    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }
}
