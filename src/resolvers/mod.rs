//! One function per query or mutation. Each takes the pool and a typed input,
//! talks to the store and maps failures into [`ResolverError`].

pub mod error;
pub mod inputs;
pub mod membership;
pub mod projects;
pub mod sprints;
pub mod tasks;
pub mod users;

use log::{error, info};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

use crate::store::transaction::WriteTransaction;
use crate::store::{self, Record};
use error::ResolverError;

async fn acquire(pool: &SqlitePool) -> Result<PoolConnection<Sqlite>, ResolverError> {
    pool.acquire().await.map_err(|e| {
        error!("Failed to acquire database connection: {}", e);
        ResolverError::Database(e)
    })
}

async fn begin(pool: &SqlitePool) -> Result<WriteTransaction, ResolverError> {
    WriteTransaction::begin(pool).await.map_err(|e| {
        error!("Failed to begin transaction: {}", e);
        ResolverError::Database(e)
    })
}

// Live record by key, or NotFound.
async fn find_live<T: Record>(conn: &mut SqliteConnection, id: i64) -> Result<T, ResolverError> {
    match store::fetch_by_id::<T>(conn, id).await {
        Ok(Some(record)) => Ok(record),
        Ok(None) => {
            info!("{} {} not found", T::ENTITY, id);
            Err(ResolverError::NotFound { entity: T::ENTITY, id })
        }
        Err(e) => {
            error!("Failed to fetch {} {}: {}", T::ENTITY, id, e);
            Err(ResolverError::fetch(T::ENTITY, e))
        }
    }
}

async fn list_live<T: Record>(conn: &mut SqliteConnection, what: &'static str) -> Result<Vec<T>, ResolverError> {
    store::fetch_all::<T>(conn).await.map_err(|e| {
        error!("Failed to fetch {}: {}", what, e);
        ResolverError::fetch(what, e)
    })
}
