//! Database module: models and schema for the model registration table.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and their JSON blobs
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `store.rs`: pool wrapper with the delete/insert/count operations

pub mod models;
pub mod schema;
pub mod store;

pub use models::{DeploymentParams, ModelInfo, ModelRegistration};
pub use schema::SQLITE_INIT;
pub use store::{ModelStorage, ReplaceOutcome, SqlitePool};
