pub mod graphql_handlers;
pub mod graphql_models;
