use log::info;
use sqlx::SqlitePool;

use super::error::ResolverError;
use super::{acquire, find_live, list_live};
use crate::models::sprint::Sprint;

pub async fn list(pool: &SqlitePool) -> Result<Vec<Sprint>, ResolverError> {
    info!("Received request to list sprints");
    let mut conn = acquire(pool).await?;
    list_live(&mut conn, "sprints").await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Sprint, ResolverError> {
    info!("Received request to get sprint {}", id);
    let mut conn = acquire(pool).await?;
    find_live(&mut conn, id).await
}
