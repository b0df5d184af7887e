//! Filedock Storage Library
//!
//! This crate provides the file store abstraction and the local filesystem
//! implementation, plus collision-free stored-name resolution.
//!
//! # Stored names
//!
//! Stored names are flat file names inside the configured base directory:
//! the URL-safe-encoded original name, suffixed with `_<n>` when the plain
//! name is already taken. Names must not contain path separators or `..`.
//! Name resolution is centralized in the `naming` module so every caller
//! derives names the same way.

pub mod local;
pub mod naming;
pub mod traits;

// Re-export commonly used types
pub use local::LocalFileStore;
pub use naming::{encode_original_name, resolve_stored_name};
pub use traits::{FileStore, StorageError, StorageResult};
