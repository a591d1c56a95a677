use async_graphql::{Context, EmptySubscription, Object, Result, ResultExt, Schema, ID};
use sqlx::SqlitePool;

use crate::models::{project::Project, sprint::Sprint, task::Task, user::User};
use crate::resolvers::inputs::{
    parse_id, CreateProjectInput, CreateUserInput, MembershipInput, UpdateProjectInput, UpdateUserInput,
};
use crate::resolvers::{membership, projects, sprints, tasks, users};

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

// The pool is schema data; per-request loaders are attached by `graph::execute`.
pub fn build_schema(pool: SqlitePool) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(pool)
        .finish()
}

// Root fields are nullable: a failing field becomes `null` plus one error
// entry, and its siblings still resolve.
#[derive(Default)]
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    async fn hello(&self) -> &'static str {
        "world"
    }

    /// Get all users
    async fn users(&self, ctx: &Context<'_>) -> Result<Option<Vec<User>>> {
        let pool = ctx.data::<SqlitePool>()?;
        users::list(pool).await.map(Some).extend()
    }

    /// Get single user
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<User>> {
        let pool = ctx.data::<SqlitePool>()?;
        let id = parse_id("user id", &id).extend()?;
        users::get(pool, id).await.map(Some).extend()
    }

    /// Get single project
    async fn project(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Project>> {
        let pool = ctx.data::<SqlitePool>()?;
        let id = parse_id("project id", &id).extend()?;
        projects::get(pool, id).await.map(Some).extend()
    }

    /// Get all projects
    async fn projects(&self, ctx: &Context<'_>) -> Result<Option<Vec<Project>>> {
        let pool = ctx.data::<SqlitePool>()?;
        projects::list(pool).await.map(Some).extend()
    }

    /// Get single sprint
    async fn sprint(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Sprint>> {
        let pool = ctx.data::<SqlitePool>()?;
        let id = parse_id("sprint id", &id).extend()?;
        sprints::get(pool, id).await.map(Some).extend()
    }

    /// Get all sprints
    async fn sprints(&self, ctx: &Context<'_>) -> Result<Option<Vec<Sprint>>> {
        let pool = ctx.data::<SqlitePool>()?;
        sprints::list(pool).await.map(Some).extend()
    }

    /// Get single task
    async fn task(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Task>> {
        let pool = ctx.data::<SqlitePool>()?;
        let id = parse_id("task id", &id).extend()?;
        tasks::get(pool, id).await.map(Some).extend()
    }

    /// Get all tasks
    async fn tasks(&self, ctx: &Context<'_>) -> Result<Option<Vec<Task>>> {
        let pool = ctx.data::<SqlitePool>()?;
        tasks::list(pool).await.map(Some).extend()
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        email: String,
        password: String,
    ) -> Result<Option<User>> {
        let pool = ctx.data::<SqlitePool>()?;
        let input = CreateUserInput::new(username, email, password).extend()?;
        users::create(pool, input).await.map(Some).extend()
    }

    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        username: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Option<User>> {
        let pool = ctx.data::<SqlitePool>()?;
        let input = UpdateUserInput::new(&id, username, email, password).extend()?;
        users::update(pool, input).await.map(Some).extend()
    }

    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<bool>> {
        let pool = ctx.data::<SqlitePool>()?;
        let id = parse_id("user id", &id).extend()?;
        users::delete(pool, id).await.map(Some).extend()
    }

    async fn create_project(
        &self,
        ctx: &Context<'_>,
        name: String,
        description: Option<String>,
    ) -> Result<Option<Project>> {
        let pool = ctx.data::<SqlitePool>()?;
        let input = CreateProjectInput::new(name, description).extend()?;
        projects::create(pool, input).await.map(Some).extend()
    }

    async fn update_project(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Project>> {
        let pool = ctx.data::<SqlitePool>()?;
        let input = UpdateProjectInput::new(&id, name, description).extend()?;
        projects::update(pool, input).await.map(Some).extend()
    }

    async fn delete_project(&self, ctx: &Context<'_>, id: ID) -> Result<Option<bool>> {
        let pool = ctx.data::<SqlitePool>()?;
        let id = parse_id("project id", &id).extend()?;
        projects::delete(pool, id).await.map(Some).extend()
    }

    async fn add_user_to_project(
        &self,
        ctx: &Context<'_>,
        project_id: ID,
        user_id: ID,
    ) -> Result<Option<Project>> {
        let pool = ctx.data::<SqlitePool>()?;
        let input = MembershipInput::new(&project_id, &user_id).extend()?;
        membership::add_user(pool, input).await.map(Some).extend()
    }

    async fn remove_user_from_project(
        &self,
        ctx: &Context<'_>,
        project_id: ID,
        user_id: ID,
    ) -> Result<Option<Project>> {
        let pool = ctx.data::<SqlitePool>()?;
        let input = MembershipInput::new(&project_id, &user_id).extend()?;
        membership::remove_user(pool, input).await.map(Some).extend()
    }
}
