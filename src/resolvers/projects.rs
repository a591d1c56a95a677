use log::{error, info};
use sqlx::{SqliteConnection, SqlitePool};

use super::error::ResolverError;
use super::inputs::{CreateProjectInput, UpdateProjectInput};
use super::{acquire, begin, find_live, list_live};
use crate::models::{project::Project, user::User, user_project::PROJECT_USERS};
use crate::store::{self, association::group_by_owner};

async fn preload_users(conn: &mut SqliteConnection, projects: &mut [Project]) -> Result<(), ResolverError> {
    let ids: Vec<i64> = projects.iter().map(|project| project.base.id).collect();
    let memberships = PROJECT_USERS.find::<User>(conn, &ids).await.map_err(|e| {
        error!("Failed to preload users for projects: {}", e);
        ResolverError::fetch("users for projects", e)
    })?;

    let mut by_project = group_by_owner(memberships);
    for project in projects.iter_mut() {
        project.preloaded_users = Some(by_project.remove(&project.base.id).unwrap_or_default());
    }
    Ok(())
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Project>, ResolverError> {
    info!("Received request to list projects");
    let mut conn = acquire(pool).await?;
    let mut projects: Vec<Project> = list_live(&mut conn, "projects").await?;
    preload_users(&mut conn, &mut projects).await?;
    Ok(projects)
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Project, ResolverError> {
    info!("Received request to get project {}", id);
    let mut conn = acquire(pool).await?;
    let mut project: Project = find_live(&mut conn, id).await?;
    preload_users(&mut conn, std::slice::from_mut(&mut project)).await?;
    Ok(project)
}

pub async fn create(pool: &SqlitePool, input: CreateProjectInput) -> Result<Project, ResolverError> {
    info!("Received request to create project: {}", input.name);
    let project = Project::new(input.name, input.description);
    let mut conn = acquire(pool).await?;

    match store::create(&mut conn, &project).await {
        Ok(created) => {
            info!("Project {} created with id {}", created.name, created.base.id);
            Ok(created)
        }
        Err(e) => {
            error!("Failed to create project {}: {}", project.name, e);
            Err(ResolverError::Creation {
                entity: "project",
                source: e,
            })
        }
    }
}

pub async fn update(pool: &SqlitePool, input: UpdateProjectInput) -> Result<Project, ResolverError> {
    info!("Received request to update project {}", input.id);
    let mut tx = begin(pool).await?;

    let mut project: Project = find_live(&mut tx, input.id).await?;
    input.apply_to(&mut project);

    let saved = match store::save(&mut tx, &project).await {
        Ok(saved) => saved,
        Err(e) => {
            error!("Failed to update project {}: {}", project.base.id, e);
            return Err(ResolverError::Update {
                entity: "project",
                source: e,
            });
        }
    };

    tx.commit().await.map_err(|e| {
        error!("Failed to commit update of project {}: {}", saved.base.id, e);
        ResolverError::Update {
            entity: "project",
            source: e,
        }
    })?;
    Ok(saved)
}

// Soft delete by key. An unknown id still reports success.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, ResolverError> {
    info!("Received request to delete project {}", id);
    let mut conn = acquire(pool).await?;

    match store::soft_delete::<Project>(&mut conn, id).await {
        Ok(0) => {
            info!("Delete of project {} matched no live row", id);
            Ok(true)
        }
        Ok(_) => Ok(true),
        Err(e) => {
            error!("Failed to delete project {}: {}", id, e);
            Err(ResolverError::Deletion {
                entity: "project",
                source: e,
            })
        }
    }
}
