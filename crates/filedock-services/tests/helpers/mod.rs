//! Test doubles for the ingestion workflow: an in-memory repository that
//! mirrors the Postgres query semantics, and file-store wrappers that count
//! or fail operations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use filedock_core::models::{NewUpload, UploadRecord};
use filedock_core::AppError;
use filedock_db::UploadRepository;
use filedock_storage::{FileStore, StorageError, StorageResult};
use uuid::Uuid;

/// In-memory upload repository. Keeps insertion order so listings stay
/// deterministic even when two records share a timestamp.
#[derive(Default)]
pub struct InMemoryUploadRepository {
    records: Mutex<Vec<(usize, UploadRecord)>>,
    next_seq: AtomicUsize,
    pub add_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub remove_calls: AtomicUsize,
}

impl InMemoryUploadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn sorted_desc(&self, mut records: Vec<(usize, UploadRecord)>) -> Vec<UploadRecord> {
        records.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| seq_b.cmp(seq_a))
        });
        records.into_iter().map(|(_, r)| r).collect()
    }
}

#[async_trait]
impl UploadRepository for InMemoryUploadRepository {
    async fn add(&self, upload: NewUpload) -> Result<UploadRecord, AppError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        let record = UploadRecord {
            id: Uuid::new_v4(),
            stored_name: upload.stored_name,
            original_name: upload.original_name,
            storage_path: upload.storage_path,
            serving_url: upload.serving_url,
            content_type: upload.content_type,
            size_bytes: upload.size_bytes,
            created_at: Utc::now(),
            is_deleted: false,
        };
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().push((seq, record.clone()));
        Ok(record)
    }

    async fn update(&self, record: &UploadRecord) -> Result<UploadRecord, AppError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|(_, r)| r.id == record.id)
            .ok_or_else(|| AppError::NotFound(format!("Upload {} not found", record.id)))?;
        slot.1.is_deleted = record.is_deleted;
        Ok(slot.1.clone())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, AppError> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|(_, r)| r.id != id);
        Ok(records.len() < before)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<UploadRecord>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|(_, r)| r.id == id).map(|(_, r)| r.clone()))
    }

    async fn get_by_original_name(&self, name: &str) -> Result<Option<UploadRecord>, AppError> {
        let records = self.records.lock().unwrap().clone();
        Ok(self
            .sorted_desc(records)
            .into_iter()
            .find(|r| r.original_name.eq_ignore_ascii_case(name)))
    }

    async fn list(&self, is_deleted: bool) -> Result<Vec<UploadRecord>, AppError> {
        let records = self.records.lock().unwrap().clone();
        Ok(self
            .sorted_desc(records)
            .into_iter()
            .filter(|r| r.is_deleted == is_deleted)
            .collect())
    }

    async fn search(&self, term: &str, is_deleted: bool) -> Result<Vec<UploadRecord>, AppError> {
        let needle = term.to_lowercase();
        let records = self.records.lock().unwrap().clone();
        Ok(self
            .sorted_desc(records)
            .into_iter()
            .filter(|r| {
                r.is_deleted == is_deleted && r.original_name.to_lowercase().contains(&needle)
            })
            .collect())
    }
}

/// File store wrapper that counts every operation.
pub struct CountingFileStore<S> {
    inner: S,
    pub exists_calls: AtomicUsize,
    pub store_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl<S> CountingFileStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            exists_calls: AtomicUsize::new(0),
            store_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
            + self.store_calls.load(Ordering::SeqCst)
            + self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: FileStore> FileStore for CountingFileStore<S> {
    async fn ensure_root(&self) -> StorageResult<()> {
        self.inner.ensure_root().await
    }

    async fn exists(&self, name: &str) -> StorageResult<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(name).await
    }

    async fn store(
        &self,
        name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)> {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.store(name, content_type, data).await
    }

    async fn load(&self, name: &str) -> StorageResult<Vec<u8>> {
        self.inner.load(name).await
    }

    async fn delete(&self, name: &str) -> StorageResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(name).await
    }

    fn storage_path(&self, name: &str) -> String {
        self.inner.storage_path(name)
    }

    fn serving_url(&self, name: &str) -> String {
        self.inner.serving_url(name)
    }
}

/// File store wrapper whose delete always fails with a non-absence error.
pub struct FailingDeleteFileStore<S> {
    inner: S,
}

impl<S> FailingDeleteFileStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: FileStore> FileStore for FailingDeleteFileStore<S> {
    async fn ensure_root(&self) -> StorageResult<()> {
        self.inner.ensure_root().await
    }

    async fn exists(&self, name: &str) -> StorageResult<bool> {
        self.inner.exists(name).await
    }

    async fn store(
        &self,
        name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)> {
        self.inner.store(name, content_type, data).await
    }

    async fn load(&self, name: &str) -> StorageResult<Vec<u8>> {
        self.inner.load(name).await
    }

    async fn delete(&self, name: &str) -> StorageResult<()> {
        Err(StorageError::DeleteFailed(format!(
            "simulated delete failure for {}",
            name
        )))
    }

    fn storage_path(&self, name: &str) -> String {
        self.inner.storage_path(name)
    }

    fn serving_url(&self, name: &str) -> String {
        self.inner.serving_url(name)
    }
}

/// Shorthand used by most tests: tempdir-backed local store + in-memory repo.
pub async fn local_store(
    dir: &tempfile::TempDir,
) -> Arc<filedock_storage::LocalFileStore> {
    Arc::new(
        filedock_storage::LocalFileStore::new(
            dir.path(),
            "http://localhost:3000/files".to_string(),
        )
        .await
        .expect("Failed to create local store"),
    )
}
