//! Generic record store over SQLite.
//!
//! Every entity table shares the `RecordBase` columns, so create, fetch,
//! save and soft delete are written once against the [`Record`] trait.
//! Functions take a plain connection; callers pass either a pooled
//! connection or an open transaction.

pub mod association;
pub mod transaction;

use chrono::Utc;
use sqlx::query::QueryAs;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite, SqliteConnection};

use crate::models::RecordBase;

pub type RecordQuery<'q, T> = QueryAs<'q, Sqlite, T, SqliteArguments<'q>>;

pub trait Record: for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static {
    const TABLE: &'static str;
    /// Singular name used in log lines and error messages.
    const ENTITY: &'static str;
    /// Writable columns, in the order `bind_columns` binds them.
    const COLUMNS: &'static [&'static str];

    fn base(&self) -> &RecordBase;

    fn bind_columns<'q>(&'q self, query: RecordQuery<'q, Self>) -> RecordQuery<'q, Self>;
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Inserts a new row and returns it with its assigned id and timestamps.
pub async fn create<T: Record>(conn: &mut SqliteConnection, record: &T) -> sqlx::Result<T> {
    let sql = format!(
        "INSERT INTO {} ({}, created_at, updated_at) VALUES ({}, ?, ?) RETURNING *",
        T::TABLE,
        T::COLUMNS.join(", "),
        placeholders(T::COLUMNS.len()),
    );
    let now = Utc::now();
    record
        .bind_columns(sqlx::query_as::<_, T>(&sql))
        .bind(now)
        .bind(now)
        .fetch_one(conn)
        .await
}

/// Live row by key; soft-deleted rows are treated as absent.
pub async fn fetch_by_id<T: Record>(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<T>> {
    let sql = format!("SELECT * FROM {} WHERE id = ? AND deleted_at IS NULL", T::TABLE);
    sqlx::query_as::<_, T>(&sql).bind(id).fetch_optional(conn).await
}

pub async fn fetch_all<T: Record>(conn: &mut SqliteConnection) -> sqlx::Result<Vec<T>> {
    let sql = format!("SELECT * FROM {} WHERE deleted_at IS NULL ORDER BY id", T::TABLE);
    sqlx::query_as::<_, T>(&sql).fetch_all(conn).await
}

/// Upsert by key. On conflict every writable column is overwritten and
/// `updated_at` refreshed; `created_at` keeps its stored value.
pub async fn save<T: Record>(conn: &mut SqliteConnection, record: &T) -> sqlx::Result<T> {
    let assignments = T::COLUMNS
        .iter()
        .map(|column| format!("{column} = excluded.{column}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT INTO {} (id, {}, created_at, updated_at) VALUES (?, {}, ?, ?) \
         ON CONFLICT (id) DO UPDATE SET {}, updated_at = excluded.updated_at RETURNING *",
        T::TABLE,
        T::COLUMNS.join(", "),
        placeholders(T::COLUMNS.len()),
        assignments,
    );
    let base = record.base();
    record
        .bind_columns(sqlx::query_as::<_, T>(&sql).bind(base.id))
        .bind(base.created_at)
        .bind(Utc::now())
        .fetch_one(conn)
        .await
}

/// Marks the row deleted. Returns the number of rows touched, which is zero
/// for an unknown or already deleted key.
pub async fn soft_delete<T: Record>(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<u64> {
    let sql = format!(
        "UPDATE {} SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL",
        T::TABLE
    );
    let result = sqlx::query(&sql).bind(Utc::now()).bind(id).execute(conn).await?;
    Ok(result.rows_affected())
}
