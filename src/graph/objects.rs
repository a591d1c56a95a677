// Output types. Records are exposed directly; derived association fields use
// preloaded data when the parent fetch loaded it, otherwise the request's
// batch loader.

use async_graphql::{Context, Object, Result, ResultExt, ID};

use super::loaders::{ProjectsByUser, UsersByProject};
use super::scalar::DateTime;
use crate::models::{project::Project, sprint::Sprint, task::Task, user::User, RecordBase};
use crate::resolvers::error::ResolverError;

fn opaque_id(base: &RecordBase) -> ID {
    ID(base.id.to_string())
}

#[Object]
impl User {
    async fn id(&self) -> ID {
        opaque_id(&self.base)
    }

    async fn username(&self) -> &str {
        &self.username
    }

    async fn email(&self) -> &str {
        &self.email
    }

    async fn created_at(&self) -> DateTime {
        self.base.created_at.into()
    }

    async fn updated_at(&self) -> DateTime {
        self.base.updated_at.into()
    }

    async fn projects(&self, ctx: &Context<'_>) -> Result<Vec<Project>> {
        if let Some(projects) = &self.preloaded_projects {
            return Ok(projects.clone());
        }
        let loader = ctx.data::<ProjectsByUser>()?;
        let projects = loader
            .load_one(self.base.id)
            .await
            .map_err(|source| ResolverError::Fetch {
                what: "projects for user",
                source,
            })
            .extend()?;
        Ok(projects.unwrap_or_default())
    }
}

#[Object]
impl Project {
    async fn id(&self) -> ID {
        opaque_id(&self.base)
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    async fn created_at(&self) -> DateTime {
        self.base.created_at.into()
    }

    async fn updated_at(&self) -> DateTime {
        self.base.updated_at.into()
    }

    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        if let Some(users) = &self.preloaded_users {
            return Ok(users.clone());
        }
        let loader = ctx.data::<UsersByProject>()?;
        let users = loader
            .load_one(self.base.id)
            .await
            .map_err(|source| ResolverError::Fetch {
                what: "users for project",
                source,
            })
            .extend()?;
        Ok(users.unwrap_or_default())
    }
}

#[Object]
impl Sprint {
    async fn id(&self) -> ID {
        opaque_id(&self.base)
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn start_date(&self) -> DateTime {
        self.start_date.into()
    }

    async fn end_date(&self) -> DateTime {
        self.end_date.into()
    }

    async fn created_at(&self) -> DateTime {
        self.base.created_at.into()
    }

    async fn updated_at(&self) -> DateTime {
        self.base.updated_at.into()
    }
}

#[Object]
impl Task {
    async fn id(&self) -> ID {
        opaque_id(&self.base)
    }

    async fn title(&self) -> &str {
        &self.title
    }

    async fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    async fn status(&self) -> &str {
        &self.status
    }

    async fn priority(&self) -> &str {
        &self.priority
    }

    async fn created_at(&self) -> DateTime {
        self.base.created_at.into()
    }

    async fn updated_at(&self) -> DateTime {
        self.base.updated_at.into()
    }
}
