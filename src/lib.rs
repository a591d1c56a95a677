pub mod config;
pub mod db;
pub mod graph;
pub mod models;
pub mod resolvers;
pub mod routes;
pub mod store;
