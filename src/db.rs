use std::str::FromStr;
use std::time::Duration;

use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::config::Config;

// Every pool hands out connections with no transaction left open. A
// transaction dropped before commit is rolled back when its connection is
// released; the ROLLBACK fails harmlessly when nothing was open.
fn pool_options() -> SqlitePoolOptions {
    SqlitePoolOptions::new().after_release(|conn, _meta| {
        Box::pin(async move {
            if sqlx::query("ROLLBACK").execute(&mut *conn).await.is_ok() {
                debug!("Rolled back a transaction left open on a released connection");
            }
            Ok(true)
        })
    })
}

// Opens the pool, checks the connection and applies pending migrations.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        // Readers keep going while one writer holds the lock.
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));
    let pool = pool_options()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    info!("Database connection verified.");

    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migration complete.");
    Ok(())
}

// A migrated in-memory database. The pool is pinned to a single connection
// that never expires, since every SQLite memory connection is its own database.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = pool_options()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    migrate(&pool).await?;
    Ok(pool)
}
