//! `PostgreSQL` adapters for version persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresVersionRepository, VersionPgPool, connect_pool};
