//! File store abstraction trait
//!
//! This module defines the FileStore trait that storage backends must
//! implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid stored name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// File store abstraction trait
///
/// The ingestion workflow works against this trait so it stays decoupled
/// from any particular backend. The base directory and the public base URL
/// are backend configuration; callers only ever pass flat stored names.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Create the base directory if it does not exist yet.
    async fn ensure_root(&self) -> StorageResult<()>;

    /// Check if a file with the given stored name exists.
    async fn exists(&self, name: &str) -> StorageResult<bool>;

    /// Write a file and return (storage_path, serving_url).
    ///
    /// The storage_path is the fully-qualified location on the backend; the
    /// serving_url is the publicly accessible URL to the file.
    async fn store(
        &self,
        name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)>;

    /// Read a file's bytes by its stored name.
    async fn load(&self, name: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file by its stored name. Deleting an absent file succeeds.
    async fn delete(&self, name: &str) -> StorageResult<()>;

    /// Fully-qualified location derived from the base path and stored name.
    fn storage_path(&self, name: &str) -> String;

    /// Public URL derived from the base URL and stored name.
    fn serving_url(&self, name: &str) -> String;
}
