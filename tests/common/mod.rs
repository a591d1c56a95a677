#![allow(dead_code, unused_macros)]

use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use scrumer_backend::db;
use scrumer_backend::models::{project::Project, sprint::Sprint, task::Task, user::User};
use scrumer_backend::store;

pub async fn test_pool() -> SqlitePool {
    db::connect_in_memory().await.expect("in-memory database")
}

pub async fn insert_user(pool: &SqlitePool, username: &str) -> User {
    let mut conn = pool.acquire().await.unwrap();
    let user = User::new(username.to_string(), format!("{username}@x.com"), "password123".to_string());
    store::create(&mut conn, &user).await.unwrap()
}

pub async fn insert_project(pool: &SqlitePool, name: &str) -> Project {
    let mut conn = pool.acquire().await.unwrap();
    store::create(&mut conn, &Project::new(name.to_string(), None)).await.unwrap()
}

pub async fn insert_sprint(pool: &SqlitePool, project: &Project, name: &str) -> Sprint {
    let mut conn = pool.acquire().await.unwrap();
    let start = Utc::now();
    let sprint = Sprint::new(name.to_string(), start, start + Duration::days(14), project.base.id);
    store::create(&mut conn, &sprint).await.unwrap()
}

pub async fn insert_task(pool: &SqlitePool, sprint: &Sprint, assignee: &User, title: &str) -> Task {
    let mut conn = pool.acquire().await.unwrap();
    let task = Task::new(title.to_string(), None, sprint.base.id, assignee.base.id);
    store::create(&mut conn, &task).await.unwrap()
}

// Builds the service the way `main` does, against the given pool.
macro_rules! init_app {
    ($pool:expr) => {{
        let pool: sqlx::SqlitePool = $pool;
        let schema = scrumer_backend::graph::build_schema(pool.clone());
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(pool))
                .app_data(actix_web::web::Data::new(schema))
                .configure(scrumer_backend::routes::routes::health_configure)
                .configure(scrumer_backend::routes::routes::graphql_configure),
        )
        .await
    }};
}

// POSTs a GraphQL body and returns the decoded JSON response.
macro_rules! post_graphql {
    ($app:expr, $body:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/graphql")
            .set_json($body)
            .to_request();
        let value: serde_json::Value = actix_web::test::call_and_read_body_json($app, req).await;
        value
    }};
}
