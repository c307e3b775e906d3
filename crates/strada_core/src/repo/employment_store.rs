//! Employment store: generic store specialised with owner lookups.

use crate::model::employment::Employment;
use crate::model::user::UserId;
use crate::model::RecordId;
use crate::repo::store::{nullable_integer, select_records, Record, Repository, Store};
use crate::repo::RepoResult;
use rusqlite::types::Value;
use rusqlite::Row;

pub type EmploymentStore = Store<Employment>;

/// Employment-specific queries on top of generic CRUD.
pub trait EmploymentRepository: Repository<Employment> {
    /// Lists employments owned by `user_id`, ordered by id.
    fn list_by_user(&self, user_id: UserId) -> RepoResult<Vec<Employment>>;
}

impl EmploymentRepository for Store<Employment> {
    fn list_by_user(&self, user_id: UserId) -> RepoResult<Vec<Employment>> {
        let conn = self.db().lock()?;
        select_records(&conn, Some(("user_id", Value::Integer(user_id))))
    }
}

impl Record for Employment {
    const TABLE: &'static str = "employments";
    const COLUMNS: &'static [&'static str] = &[
        "user_id",
        "company",
        "months_of_experience",
        "salary",
        "start_date",
        "end_date",
    ];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.user_id),
            Value::Text(self.company.clone()),
            Value::Integer(i64::from(self.months_of_experience)),
            Value::Integer(i64::from(self.salary)),
            nullable_integer(self.start_date),
            nullable_integer(self.end_date),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            company: row.get("company")?,
            months_of_experience: row.get("months_of_experience")?,
            salary: row.get("salary")?,
            start_date: row.get("start_date")?,
            end_date: row.get("end_date")?,
        })
    }
}
