pub mod graphql;
pub mod health;
pub mod routes;
