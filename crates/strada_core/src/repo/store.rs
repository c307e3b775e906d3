//! Generic record store over one SQLite table.
//!
//! # Responsibility
//! - Provide `add/get/get_all/update/remove` for any `Record` type.
//! - Assign fresh, monotonically increasing ids on insertion.
//! - Run each call under the shared connection lock, writes in one transaction.
//!
//! # Invariants
//! - `add` ignores the incoming id; ids are never reused (`AUTOINCREMENT`).
//! - `get_all` returns records in insertion (id) order.
//! - `update` on a missing id returns `false` and changes nothing.
//! - `remove` on a missing id is a no-op.

use crate::db::SharedDb;
use crate::model::RecordId;
use crate::repo::RepoResult;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::marker::PhantomData;

/// A record type persisted in its own table with an integer `id` column.
pub trait Record: Clone {
    /// Table holding the records.
    const TABLE: &'static str;
    /// Data columns, excluding `id`, in `column_values` order.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> RecordId;
    fn set_id(&mut self, id: RecordId);
    /// Values bound to `COLUMNS`, same order and length.
    fn column_values(&self) -> Vec<Value>;
    /// Maps one `SELECT id, COLUMNS...` row back into a record.
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;

    /// Persists composed child records after this record was written.
    ///
    /// Runs inside the same transaction as the parent write.
    fn save_related(&mut self, _conn: &Connection) -> RepoResult<()> {
        Ok(())
    }

    /// Loads composed child records after this record was read.
    fn load_related(&mut self, _conn: &Connection) -> RepoResult<()> {
        Ok(())
    }
}

/// CRUD contract shared by every entity store.
pub trait Repository<R> {
    /// Persists a copy of `record` under a fresh id and returns it.
    fn add(&self, record: &R) -> RepoResult<R>;
    /// Returns the record stored under `id`, if any.
    fn get(&self, id: RecordId) -> RepoResult<Option<R>>;
    /// Returns all records in insertion order.
    fn get_all(&self) -> RepoResult<Vec<R>>;
    /// Replaces the record stored under `id`; `false` when absent.
    fn update(&self, id: RecordId, record: &R) -> RepoResult<bool>;
    /// Deletes the record stored under `id`; absent ids are ignored.
    fn remove(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed store for one record type.
///
/// Clones share the same underlying connection.
pub struct Store<R> {
    db: SharedDb,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> Store<R> {
    pub fn new(db: SharedDb) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    pub(crate) fn db(&self) -> &SharedDb {
        &self.db
    }
}

impl<R: Record> Repository<R> for Store<R> {
    fn add(&self, record: &R) -> RepoResult<R> {
        let mut conn = self.db.lock()?;
        let tx = conn.transaction()?;
        let mut stored = record.clone();
        insert_record(&tx, &mut stored)?;
        tx.commit()?;

        debug!(
            "event=store_add module=repo status=ok table={} id={}",
            R::TABLE,
            stored.id()
        );
        Ok(stored)
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<R>> {
        let conn = self.db.lock()?;
        select_record(&conn, id)
    }

    fn get_all(&self) -> RepoResult<Vec<R>> {
        let conn = self.db.lock()?;
        select_records(&conn, None)
    }

    fn update(&self, id: RecordId, record: &R) -> RepoResult<bool> {
        let mut conn = self.db.lock()?;
        let tx = conn.transaction()?;
        let mut stored = record.clone();
        let updated = update_record(&tx, id, &mut stored)?;
        tx.commit()?;

        debug!(
            "event=store_update module=repo status={} table={} id={id}",
            if updated { "ok" } else { "not_found" },
            R::TABLE
        );
        Ok(updated)
    }

    fn remove(&self, id: RecordId) -> RepoResult<()> {
        let conn = self.db.lock()?;
        let removed = delete_record::<R>(&conn, id)?;

        debug!(
            "event=store_remove module=repo status={} table={} id={id}",
            if removed { "ok" } else { "not_found" },
            R::TABLE
        );
        Ok(())
    }
}

/// Inserts `record` under a fresh id, then its related records.
pub(crate) fn insert_record<R: Record>(conn: &Connection, record: &mut R) -> RepoResult<()> {
    conn.execute(&insert_sql::<R>(), params_from_iter(record.column_values()))?;
    record.set_id(conn.last_insert_rowid());
    record.save_related(conn)
}

/// Overwrites the row at `id`. Returns `false` without side effects when absent.
pub(crate) fn update_record<R: Record>(
    conn: &Connection,
    id: RecordId,
    record: &mut R,
) -> RepoResult<bool> {
    let mut values = record.column_values();
    values.push(Value::Integer(id));
    let changed = conn.execute(&update_sql::<R>(), params_from_iter(values))?;
    if changed == 0 {
        return Ok(false);
    }

    record.set_id(id);
    record.save_related(conn)?;
    Ok(true)
}

pub(crate) fn delete_record<R: Record>(conn: &Connection, id: RecordId) -> RepoResult<bool> {
    let changed = conn.execute(
        &format!("DELETE FROM {} WHERE id = ?1;", R::TABLE),
        params![id],
    )?;
    Ok(changed > 0)
}

pub(crate) fn select_record<R: Record>(conn: &Connection, id: RecordId) -> RepoResult<Option<R>> {
    let mut stmt = conn.prepare(&format!("{} WHERE id = ?1;", select_sql::<R>()))?;
    let mut rows = stmt.query(params![id])?;
    let Some(row) = rows.next()? else {
        return Ok(None);
    };

    let mut record = R::from_row(row)?;
    record.load_related(conn)?;
    Ok(Some(record))
}

/// Selects records ordered by id, optionally filtered by `column = value`.
///
/// `column` must be one of `R::COLUMNS`; it is interpolated into SQL.
pub(crate) fn select_records<R: Record>(
    conn: &Connection,
    filter: Option<(&str, Value)>,
) -> RepoResult<Vec<R>> {
    let mut sql = select_sql::<R>();
    let mut bind_values: Vec<Value> = Vec::new();
    if let Some((column, value)) = filter {
        debug_assert!(R::COLUMNS.iter().any(|known| *known == column));
        sql.push_str(&format!(" WHERE {column} = ?1"));
        bind_values.push(value);
    }
    sql.push_str(" ORDER BY id ASC;");

    let mut records = {
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(R::from_row(row)?);
        }
        records
    };

    for record in &mut records {
        record.load_related(conn)?;
    }
    Ok(records)
}

fn select_sql<R: Record>() -> String {
    format!("SELECT id, {} FROM {}", R::COLUMNS.join(", "), R::TABLE)
}

fn insert_sql<R: Record>() -> String {
    let placeholders = (1..=R::COLUMNS.len())
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({placeholders});",
        R::TABLE,
        R::COLUMNS.join(", ")
    )
}

fn update_sql<R: Record>() -> String {
    let assignments = R::COLUMNS
        .iter()
        .enumerate()
        .map(|(index, column)| format!("{column} = ?{}", index + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {assignments} WHERE id = ?{};",
        R::TABLE,
        R::COLUMNS.len() + 1
    )
}

/// Maps an optional string onto a nullable SQL value.
pub(crate) fn nullable_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |text| Value::Text(text.to_string()))
}

/// Maps an optional integer onto a nullable SQL value.
pub(crate) fn nullable_integer(value: Option<i64>) -> Value {
    value.map_or(Value::Null, Value::Integer)
}

#[cfg(test)]
mod tests {
    use super::{insert_sql, update_sql, Record};
    use crate::model::employment::Employment;

    #[test]
    fn insert_sql_binds_every_column_in_order() {
        let sql = insert_sql::<Employment>();
        assert!(sql.starts_with("INSERT INTO employments (user_id, company,"));
        assert!(sql.ends_with(&format!("?{});", Employment::COLUMNS.len())));
    }

    #[test]
    fn update_sql_binds_id_after_columns() {
        let sql = update_sql::<Employment>();
        assert!(sql.contains("user_id = ?1"));
        assert!(sql.ends_with(&format!("WHERE id = ?{};", Employment::COLUMNS.len() + 1)));
    }
}
