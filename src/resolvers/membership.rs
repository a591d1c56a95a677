use log::{error, info};
use sqlx::SqlitePool;

use super::error::ResolverError;
use super::inputs::MembershipInput;
use super::{begin, find_live};
use crate::models::{project::Project, user::User, user_project::PROJECT_USERS};

// Both lookups and the join write share one transaction; any failure rolls
// the whole operation back when `tx` is dropped.
pub async fn add_user(pool: &SqlitePool, input: MembershipInput) -> Result<Project, ResolverError> {
    info!("Received request to add user {} to project {}", input.user_id, input.project_id);
    let mut tx = begin(pool).await?;

    let project: Project = find_live(&mut tx, input.project_id).await?;
    let user: User = find_live(&mut tx, input.user_id).await?;

    let appended = PROJECT_USERS.append(&mut tx, project.base.id, user.base.id).await;
    let committed = match appended {
        Ok(()) => tx.commit().await,
        Err(e) => Err(e),
    };

    match committed {
        Ok(()) => {
            info!("User {} is a member of project {}", user.username, project.name);
            Ok(project)
        }
        Err(e) => {
            error!("Failed to add user {} to project {}: {}", user.base.id, project.base.id, e);
            Err(ResolverError::Association {
                action: "add user to project",
                source: e,
            })
        }
    }
}

// Removing a pair that was never added is not an error.
pub async fn remove_user(pool: &SqlitePool, input: MembershipInput) -> Result<Project, ResolverError> {
    info!("Received request to remove user {} from project {}", input.user_id, input.project_id);
    let mut tx = begin(pool).await?;

    let project: Project = find_live(&mut tx, input.project_id).await?;
    let user: User = find_live(&mut tx, input.user_id).await?;

    let removed = PROJECT_USERS.remove(&mut tx, project.base.id, user.base.id).await;
    let committed = match removed {
        Ok(()) => tx.commit().await,
        Err(e) => Err(e),
    };

    match committed {
        Ok(()) => {
            info!("User {} is not a member of project {}", user.username, project.name);
            Ok(project)
        }
        Err(e) => {
            error!("Failed to remove user {} from project {}: {}", user.base.id, project.base.id, e);
            Err(ResolverError::Association {
                action: "remove user from project",
                source: e,
            })
        }
    }
}
