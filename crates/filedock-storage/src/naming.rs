//! Stored-name resolution.
//!
//! The submitted file name is URL-safe-encoded, then resolved against the
//! store's directory contents: while the candidate name is taken, a `_<n>`
//! suffix (n starting at 1) is appended to the base name, keeping the
//! extension. A name without a dot has no extension; the suffix goes on the
//! whole name (`notes` -> `notes_1`).

use crate::traits::{FileStore, StorageResult};

/// URL-safe-encode a submitted file name.
///
/// Unreserved characters (letters, digits, `-`, `.`, `_`, `~`) pass through,
/// so extensions survive encoding.
pub fn encode_original_name(name: &str) -> String {
    urlencoding::encode(name).into_owned()
}

/// Append `_<n>` before the extension, or to the whole name when there is
/// no extension.
fn with_suffix(name: &str, n: u32) -> String {
    match name.rsplit_once('.') {
        Some((base, ext)) => format!("{}_{}.{}", base, n, ext),
        None => format!("{}_{}", name, n),
    }
}

/// Resolve a stored name that does not collide with any existing entry.
///
/// The check-then-write sequence is not atomic: two ingestions running
/// concurrently against the same directory can resolve the same name, and
/// the last writer wins on disk. Callers that need stronger guarantees must
/// serialize ingestion per directory.
pub async fn resolve_stored_name(
    store: &dyn FileStore,
    encoded_name: &str,
) -> StorageResult<String> {
    let mut candidate = encoded_name.to_string();
    let mut n = 1u32;

    while store.exists(&candidate).await? {
        candidate = with_suffix(encoded_name, n);
        n += 1;
    }

    Ok(candidate)
}
