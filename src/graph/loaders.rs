use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, Loader};
use async_graphql::Request;
use log::{debug, error};
use sqlx::SqlitePool;

use crate::models::{
    project::Project,
    user::User,
    user_project::{PROJECT_USERS, USER_PROJECTS},
};
use crate::store::association::{group_by_owner, Association};
use crate::store::Record;

/// Batches association lookups for every parent resolved in one request.
pub struct Members<T> {
    pool: SqlitePool,
    association: Association,
    _member: PhantomData<fn() -> T>,
}

impl<T> Members<T> {
    pub fn new(pool: SqlitePool, association: Association) -> Self {
        Members {
            pool,
            association,
            _member: PhantomData,
        }
    }
}

impl<T: Record + Clone + Sync> Loader<i64> for Members<T> {
    type Value = Vec<T>;
    type Error = Arc<sqlx::Error>;

    async fn load(&self, keys: &[i64]) -> Result<HashMap<i64, Self::Value>, Self::Error> {
        debug!("Loading {} for {} owners", T::TABLE, keys.len());
        let mut conn = self.pool.acquire().await.map_err(Arc::new)?;
        match self.association.find::<T>(&mut conn, keys).await {
            Ok(pairs) => Ok(group_by_owner(pairs)),
            Err(e) => {
                error!("Failed to load {} through {}: {}", T::TABLE, self.association.table, e);
                Err(Arc::new(e))
            }
        }
    }
}

pub type ProjectsByUser = DataLoader<Members<Project>>;
pub type UsersByProject = DataLoader<Members<User>>;

// Loaders live for one request only, so nothing is cached across requests.
pub fn attach(request: Request, pool: &SqlitePool) -> Request {
    let projects_by_user: ProjectsByUser = DataLoader::new(Members::new(pool.clone(), USER_PROJECTS), tokio::spawn);
    let users_by_project: UsersByProject = DataLoader::new(Members::new(pool.clone(), PROJECT_USERS), tokio::spawn);
    request.data(projects_by_user).data(users_by_project)
}
