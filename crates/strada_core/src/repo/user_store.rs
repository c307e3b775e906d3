//! User store: generic store specialised with email lookups.
//!
//! # Responsibility
//! - Map `User` onto the `users` table.
//! - Keep embedded employments in sync with the `employments` table.
//! - Answer email-identity questions for uniqueness pre-checks.
//!
//! # Invariants
//! - Email comparison is case-sensitive exact match.
//! - Writing a user rewrites its owned employment set in the same transaction.

use crate::model::employment::Employment;
use crate::model::user::{Address, User, UserId};
use crate::model::RecordId;
use crate::repo::store::{
    delete_record, insert_record, nullable_text, select_records, update_record, Record,
    Repository, Store,
};
use crate::repo::RepoResult;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use std::collections::HashSet;

pub type UserStore = Store<User>;

/// User-specific queries on top of generic CRUD.
pub trait UserRepository: Repository<User> {
    /// Returns the user registered with exactly `email`.
    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Returns whether some user other than `exclude_id` uses `email`.
    fn is_existing(&self, email: &str, exclude_id: Option<UserId>) -> RepoResult<bool>;
}

impl UserRepository for Store<User> {
    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let conn = self.db().lock()?;
        let filter = ("email", Value::Text(email.to_string()));
        let users = select_records::<User>(&conn, Some(filter))?;
        Ok(users.into_iter().next())
    }

    fn is_existing(&self, email: &str, exclude_id: Option<UserId>) -> RepoResult<bool> {
        let conn = self.db().lock()?;
        let exists = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM users
                WHERE email = ?1
                  AND (?2 IS NULL OR id <> ?2)
            );",
            params![email, exclude_id],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }
}

impl Record for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "email",
        "address_street",
        "address_city",
        "address_post_code",
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn column_values(&self) -> Vec<Value> {
        let address = self.address.as_ref();
        vec![
            Value::Text(self.first_name.clone()),
            Value::Text(self.last_name.clone()),
            Value::Text(self.email.clone()),
            nullable_text(address.map(|a| a.street.as_str())),
            nullable_text(address.map(|a| a.city.as_str())),
            nullable_text(address.map(|a| a.post_code.as_str())),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let street: Option<String> = row.get("address_street")?;
        let city: Option<String> = row.get("address_city")?;
        let post_code: Option<String> = row.get("address_post_code")?;
        let address = if street.is_none() && city.is_none() && post_code.is_none() {
            None
        } else {
            Some(Address {
                street: street.unwrap_or_default(),
                city: city.unwrap_or_default(),
                post_code: post_code.unwrap_or_default(),
            })
        };

        Ok(Self {
            id: row.get("id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            email: row.get("email")?,
            address,
            employments: Vec::new(),
        })
    }

    /// Replaces the owned employment set with `self.employments`.
    ///
    /// Employments already owned by this user keep their id and are updated
    /// in place. Anything else is inserted under a fresh id. Owned rows that
    /// are no longer listed are deleted.
    fn save_related(&mut self, conn: &Connection) -> RepoResult<()> {
        let owner = self.id;
        let owned: HashSet<RecordId> = owned_employment_ids(conn, owner)?;
        let listed: HashSet<RecordId> = self.employments.iter().map(|e| e.id).collect();

        for stale in owned.difference(&listed) {
            delete_record::<Employment>(conn, *stale)?;
        }

        for employment in &mut self.employments {
            employment.user_id = owner;
            if owned.contains(&employment.id) {
                let id = employment.id;
                update_record(conn, id, employment)?;
            } else {
                insert_record(conn, employment)?;
            }
        }
        Ok(())
    }

    fn load_related(&mut self, conn: &Connection) -> RepoResult<()> {
        self.employments = select_records(conn, Some(("user_id", Value::Integer(self.id))))?;
        Ok(())
    }
}

fn owned_employment_ids(conn: &Connection, owner: UserId) -> RepoResult<HashSet<RecordId>> {
    let mut stmt = conn.prepare("SELECT id FROM employments WHERE user_id = ?1;")?;
    let ids = stmt
        .query_map(params![owner], |row| row.get::<_, RecordId>(0))?
        .collect::<Result<HashSet<_>, _>>()?;
    Ok(ids)
}
