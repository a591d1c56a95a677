use log::info;
use sqlx::SqlitePool;

use super::error::ResolverError;
use super::{acquire, find_live, list_live};
use crate::models::task::Task;

pub async fn list(pool: &SqlitePool) -> Result<Vec<Task>, ResolverError> {
    info!("Received request to list tasks");
    let mut conn = acquire(pool).await?;
    list_live(&mut conn, "tasks").await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Task, ResolverError> {
    info!("Received request to get task {}", id);
    let mut conn = acquire(pool).await?;
    find_live(&mut conn, id).await
}
