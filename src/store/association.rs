use std::collections::HashMap;

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqliteConnection};

use super::Record;

// Stays under SQLite's bound-parameter limit, which older builds set at 999.
pub const MAX_OWNERS_PER_QUERY: usize = 900;

/// One side of a many-to-many join table. `owner_key` is the column holding
/// the parent id, `member_key` the column pointing at the member table.
#[derive(Debug, Clone, Copy)]
pub struct Association {
    pub table: &'static str,
    pub owner_key: &'static str,
    pub member_key: &'static str,
}

// A member row tagged with the owner it was found through.
struct Membership<T> {
    owner_id: i64,
    member: T,
}

impl<'r, T: FromRow<'r, SqliteRow>> FromRow<'r, SqliteRow> for Membership<T> {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Membership {
            owner_id: row.try_get("owner_id")?,
            member: T::from_row(row)?,
        })
    }
}

impl Association {
    /// Adds the pair unless it is already present.
    pub async fn append(&self, conn: &mut SqliteConnection, owner_id: i64, member_id: i64) -> sqlx::Result<()> {
        let sql = format!(
            "INSERT INTO {} ({}, {}, created_at, updated_at) VALUES (?, ?, ?, ?) ON CONFLICT DO NOTHING",
            self.table, self.owner_key, self.member_key
        );
        let now = Utc::now();
        sqlx::query(&sql)
            .bind(owner_id)
            .bind(member_id)
            .bind(now)
            .bind(now)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Removes the pair; a missing pair is not an error.
    pub async fn remove(&self, conn: &mut SqliteConnection, owner_id: i64, member_id: i64) -> sqlx::Result<()> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ? AND {} = ?",
            self.table, self.owner_key, self.member_key
        );
        sqlx::query(&sql).bind(owner_id).bind(member_id).execute(conn).await?;
        Ok(())
    }

    /// Live members of every owner in `owner_ids`, as `(owner_id, member)`
    /// pairs; each owner's members come in id order. Owners are queried in
    /// chunks of `MAX_OWNERS_PER_QUERY`, so any number of parents can be loaded.
    pub async fn find<T: Record>(&self, conn: &mut SqliteConnection, owner_ids: &[i64]) -> sqlx::Result<Vec<(i64, T)>> {
        let mut found = Vec::new();
        for chunk in owner_ids.chunks(MAX_OWNERS_PER_QUERY) {
            let mut builder = QueryBuilder::<Sqlite>::new(format!(
                "SELECT m.*, j.{owner} AS owner_id FROM {members} m \
                 JOIN {join} j ON j.{member} = m.id \
                 WHERE m.deleted_at IS NULL AND j.{owner} IN (",
                owner = self.owner_key,
                members = T::TABLE,
                join = self.table,
                member = self.member_key,
            ));
            let mut ids = builder.separated(", ");
            for id in chunk {
                ids.push_bind(*id);
            }
            ids.push_unseparated(") ORDER BY m.id");

            let rows = builder
                .build_query_as::<Membership<T>>()
                .fetch_all(&mut *conn)
                .await?;
            found.extend(rows.into_iter().map(|row| (row.owner_id, row.member)));
        }
        Ok(found)
    }
}

/// Groups `(owner_id, member)` pairs by owner, keeping member order.
pub fn group_by_owner<T>(pairs: Vec<(i64, T)>) -> HashMap<i64, Vec<T>> {
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    for (owner_id, member) in pairs {
        grouped.entry(owner_id).or_default().push(member);
    }
    grouped
}
