//! User domain model.
//!
//! # Invariants
//! - `email` is unique across all users (case-sensitive exact match).
//! - `employments` are owned by this user and ordered by employment id.

use super::{RecordId, UNSET_ID};
use crate::model::employment::Employment;
use serde::{Deserialize, Serialize};

pub type UserId = RecordId;

/// Postal address attached to a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub post_code: String,
}

/// A person tracked by the system together with their employments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub employments: Vec<Employment>,
}

impl User {
    /// Creates an unsaved user without address or employments.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: UNSET_ID,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            address: None,
            employments: Vec::new(),
        }
    }

    /// Builder-style helper appending one employment.
    pub fn with_employment(mut self, employment: Employment) -> Self {
        self.employments.push(employment);
        self
    }
}
