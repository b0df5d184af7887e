//! Filedock database layer
//!
//! Repository trait and PostgreSQL implementation for upload metadata,
//! plus embedded schema migrations.

pub mod db;

// Re-export commonly used types
pub use db::{run_migrations, PgUploadRepository, UploadRepository};
