//! Upload ingestion workflow.
//!
//! Batches are processed strictly sequentially within one call. Concurrent
//! calls against the same storage directory are not coordinated; the
//! name-resolution race is documented on `resolve_stored_name`.

use std::sync::Arc;

use filedock_core::{
    models::{FilePayload, NewUpload, UploadRecord},
    AppError,
};
use filedock_db::UploadRepository;
use filedock_storage::{encode_original_name, resolve_stored_name, FileStore};

/// Upload ingestion service
///
/// Persists each payload's bytes under a collision-free name, creates one
/// metadata record per file, and drives the soft-delete and permanent-delete
/// lifecycles.
#[derive(Clone)]
pub struct UploadIngestor {
    store: Arc<dyn FileStore>,
    repository: Arc<dyn UploadRepository>,
    max_file_size_bytes: usize,
}

impl UploadIngestor {
    pub fn new(
        store: Arc<dyn FileStore>,
        repository: Arc<dyn UploadRepository>,
        max_file_size_bytes: usize,
    ) -> Self {
        Self {
            store,
            repository,
            max_file_size_bytes,
        }
    }

    /// Ingest a batch of payloads, in submission order.
    ///
    /// Rejects empty batches and oversized payloads before any write. Per
    /// payload: URL-safe-encode the submitted name, resolve a stored name
    /// that does not collide in the storage directory, write the bytes, then
    /// persist the metadata record. Returns the created records in input
    /// order. Files and records created for earlier payloads are not rolled
    /// back when a later payload fails.
    #[tracing::instrument(skip(self, payloads), fields(batch_size = payloads.len()))]
    pub async fn ingest(&self, payloads: Vec<FilePayload>) -> Result<Vec<UploadRecord>, AppError> {
        if payloads.is_empty() {
            return Err(AppError::EmptyBatch);
        }

        for payload in &payloads {
            if payload.data.len() > self.max_file_size_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "{} is {} bytes, limit is {} bytes",
                    payload.name,
                    payload.data.len(),
                    self.max_file_size_bytes
                )));
            }
        }

        self.store
            .ensure_root()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        let mut records = Vec::with_capacity(payloads.len());

        for payload in payloads {
            let original_name = encode_original_name(&payload.name);
            let stored_name = resolve_stored_name(self.store.as_ref(), &original_name)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;

            let size_bytes = payload.size_bytes();
            let (storage_path, serving_url) = self
                .store
                .store(&stored_name, &payload.content_type, payload.data)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;

            let record = self
                .repository
                .add(NewUpload {
                    stored_name,
                    original_name,
                    storage_path,
                    serving_url,
                    content_type: payload.content_type,
                    size_bytes,
                })
                .await?;

            tracing::info!(
                upload_id = %record.id,
                stored_name = %record.stored_name,
                size_bytes = record.size_bytes,
                "Upload ingested"
            );

            records.push(record);
        }

        Ok(records)
    }

    /// Permanently delete an upload: remove the file first, then the record.
    ///
    /// A backing file that is already absent counts as a successful delete.
    /// Any other storage failure surfaces as an error and the record is left
    /// in place. A crash after the file delete can leave a dangling record;
    /// callers must tolerate that.
    #[tracing::instrument(skip(self, record), fields(upload_id = %record.id))]
    pub async fn remove(&self, record: &UploadRecord) -> Result<(), AppError> {
        self.store
            .delete(&record.stored_name)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        let removed = self.repository.remove(record.id).await?;
        if !removed {
            tracing::warn!(upload_id = %record.id, "Upload record was already removed");
        }

        Ok(())
    }

    /// Flip the soft-delete flag and persist it. No filesystem effect.
    #[tracing::instrument(skip(self, record), fields(upload_id = %record.id))]
    pub async fn toggle_soft_delete(
        &self,
        record: &UploadRecord,
    ) -> Result<UploadRecord, AppError> {
        let mut updated = record.clone();
        updated.is_deleted = !record.is_deleted;
        self.repository.update(&updated).await
    }
}
