pub mod config;
pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Role required for catalog administration.
pub const SERVICE_ACCESS_ROLE: &str = "admin";
