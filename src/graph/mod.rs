//! GraphQL schema: object types, the `DateTime` scalar, the query and
//! mutation roots, and the per-request batch loaders.

pub mod loaders;
pub mod objects;
pub mod scalar;
pub mod schema;

use async_graphql::{Request, Response};
use sqlx::SqlitePool;

pub use schema::{build_schema, AppSchema, MutationRoot, QueryRoot};

/// Runs one request with a fresh set of loaders.
pub async fn execute(schema: &AppSchema, pool: &SqlitePool, request: Request) -> Response {
    schema.execute(loaders::attach(request, pool)).await
}
