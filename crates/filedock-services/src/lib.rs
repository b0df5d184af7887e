//! Filedock Services Layer
//!
//! This crate is the **business service layer**: it hosts the upload
//! ingestion workflow and re-exports a unified API from the storage and
//! database crates so that binaries depend on a single service facade.

pub mod ingest;

pub use ingest::UploadIngestor;

pub use filedock_db::{PgUploadRepository, UploadRepository};
pub use filedock_storage::{FileStore, LocalFileStore, StorageError, StorageResult};
