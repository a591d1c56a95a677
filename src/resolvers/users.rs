use log::{error, info};
use sqlx::SqlitePool;

use super::error::ResolverError;
use super::inputs::{CreateUserInput, UpdateUserInput};
use super::{acquire, begin, find_live, list_live};
use crate::models::{project::Project, user::User, user_project::USER_PROJECTS};
use crate::store::{self, association::group_by_owner};

// Every live user with their projects loaded in a single extra query.
pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, ResolverError> {
    info!("Received request to list users");
    let mut conn = acquire(pool).await?;
    let mut users: Vec<User> = list_live(&mut conn, "users").await?;

    let ids: Vec<i64> = users.iter().map(|user| user.base.id).collect();
    let memberships = USER_PROJECTS
        .find::<Project>(&mut conn, &ids)
        .await
        .map_err(|e| {
            error!("Failed to preload projects for users: {}", e);
            ResolverError::fetch("projects for users", e)
        })?;

    let mut by_user = group_by_owner(memberships);
    for user in &mut users {
        user.preloaded_projects = Some(by_user.remove(&user.base.id).unwrap_or_default());
    }
    Ok(users)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<User, ResolverError> {
    info!("Received request to get user {}", id);
    let mut conn = acquire(pool).await?;
    find_live(&mut conn, id).await
}

pub async fn create(pool: &SqlitePool, input: CreateUserInput) -> Result<User, ResolverError> {
    info!("Received request to create user: {}", input.username);
    let user = User::new(input.username, input.email, input.password);
    let mut conn = acquire(pool).await?;

    match store::create(&mut conn, &user).await {
        Ok(created) => {
            info!("User {} created with id {}", created.username, created.base.id);
            Ok(created)
        }
        Err(e) => {
            error!("Failed to create user {}: {}", user.username, e);
            Err(ResolverError::Creation {
                entity: "user",
                source: e,
            })
        }
    }
}

pub async fn update(pool: &SqlitePool, input: UpdateUserInput) -> Result<User, ResolverError> {
    info!("Received request to update user {}", input.id);
    let mut tx = begin(pool).await?;

    let mut user: User = find_live(&mut tx, input.id).await?;
    input.apply_to(&mut user);

    let saved = match store::save(&mut tx, &user).await {
        Ok(saved) => saved,
        Err(e) => {
            error!("Failed to update user {}: {}", user.base.id, e);
            return Err(ResolverError::Update {
                entity: "user",
                source: e,
            });
        }
    };

    tx.commit().await.map_err(|e| {
        error!("Failed to commit update of user {}: {}", saved.base.id, e);
        ResolverError::Update {
            entity: "user",
            source: e,
        }
    })?;
    Ok(saved)
}

// Soft delete by key. An unknown id still reports success.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, ResolverError> {
    info!("Received request to delete user {}", id);
    let mut conn = acquire(pool).await?;

    match store::soft_delete::<User>(&mut conn, id).await {
        Ok(0) => {
            info!("Delete of user {} matched no live row", id);
            Ok(true)
        }
        Ok(_) => Ok(true),
        Err(e) => {
            error!("Failed to delete user {}: {}", id, e);
            Err(ResolverError::Deletion {
                entity: "user",
                source: e,
            })
        }
    }
}
