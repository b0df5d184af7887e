use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One caller-submitted file: declared name, content type, and raw bytes.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl FilePayload {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size_bytes(&self) -> i64 {
        self.data.len() as i64
    }
}

/// Insert shape for an upload record. The repository assigns `id` and
/// `created_at` at persistence time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUpload {
    pub stored_name: String,
    pub original_name: String,
    pub storage_path: String,
    pub serving_url: String,
    pub content_type: String,
    pub size_bytes: i64,
}

/// One metadata record per stored file.
///
/// `stored_name` is the collision-resolved name actually used on disk;
/// `storage_path` and `serving_url` are derived from it plus the configured
/// base path / base URL and are never independently mutated. Soft-deleted
/// records (`is_deleted = true`) stay queryable but are excluded from
/// default listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UploadRecord {
    pub id: Uuid,
    pub stored_name: String,
    pub original_name: String,
    pub storage_path: String,
    pub serving_url: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}
