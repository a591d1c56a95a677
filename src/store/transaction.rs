use std::ops::{Deref, DerefMut};

use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

/// A transaction that holds the database write lock from its first
/// statement, so a read-then-write sequence never has to upgrade a shared
/// lock while another writer waits on it.
///
/// Dropping it without `commit` returns the connection to the pool, where
/// the pool's release hook (see `db`) rolls the open transaction back.
pub struct WriteTransaction {
    conn: PoolConnection<Sqlite>,
}

impl WriteTransaction {
    pub async fn begin(pool: &SqlitePool) -> sqlx::Result<Self> {
        let mut conn = pool.acquire().await?;
        // Waits out other writers through the connection's busy timeout.
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;
        Ok(WriteTransaction { conn })
    }

    pub async fn commit(mut self) -> sqlx::Result<()> {
        sqlx::query("COMMIT").execute(&mut *self.conn).await?;
        Ok(())
    }
}

impl Deref for WriteTransaction {
    type Target = SqliteConnection;

    fn deref(&self) -> &SqliteConnection {
        &self.conn
    }
}

impl DerefMut for WriteTransaction {
    fn deref_mut(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}
