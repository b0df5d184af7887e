use chrono::Utc;
use filedock_core::{
    models::{NewUpload, UploadRecord},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Trait for upload metadata repository operations
/// This abstracts the database implementation (PostgreSQL)
#[async_trait::async_trait]
pub trait UploadRepository: Send + Sync {
    /// Persist a new record, assigning its id and creation timestamp.
    async fn add(&self, upload: NewUpload) -> Result<UploadRecord, AppError>;

    /// Persist the record's mutable state (the soft-delete flag).
    async fn update(&self, record: &UploadRecord) -> Result<UploadRecord, AppError>;

    /// Delete the record. Returns false when no row matched.
    async fn remove(&self, id: Uuid) -> Result<bool, AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<UploadRecord>, AppError>;

    /// Case-insensitive match on the submitted (encoded) original name.
    async fn get_by_original_name(&self, name: &str) -> Result<Option<UploadRecord>, AppError>;

    /// Records whose soft-delete flag matches, newest first.
    async fn list(&self, is_deleted: bool) -> Result<Vec<UploadRecord>, AppError>;

    /// Case-insensitive substring match on the original name, filtered by
    /// the soft-delete flag, newest first.
    async fn search(&self, term: &str, is_deleted: bool) -> Result<Vec<UploadRecord>, AppError>;
}

/// PostgreSQL-backed upload metadata repository
#[derive(Clone)]
pub struct PgUploadRepository {
    pool: PgPool,
}

impl PgUploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UploadRepository for PgUploadRepository {
    #[tracing::instrument(skip(self, upload), fields(db.table = "uploads", db.operation = "insert"))]
    async fn add(&self, upload: NewUpload) -> Result<UploadRecord, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let record = sqlx::query_as::<Postgres, UploadRecord>(
            r#"
            INSERT INTO uploads (
                id, stored_name, original_name, storage_path, serving_url,
                content_type, size_bytes, created_at, is_deleted
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&upload.stored_name)
        .bind(&upload.original_name)
        .bind(&upload.storage_path)
        .bind(&upload.serving_url)
        .bind(&upload.content_type)
        .bind(upload.size_bytes)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "uploads", db.operation = "update", db.record_id = %record.id))]
    async fn update(&self, record: &UploadRecord) -> Result<UploadRecord, AppError> {
        let updated = sqlx::query_as::<Postgres, UploadRecord>(
            "UPDATE uploads SET is_deleted = $2 WHERE id = $1 RETURNING *",
        )
        .bind(record.id)
        .bind(record.is_deleted)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound(format!("Upload {} not found", record.id)))
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.operation = "delete", db.record_id = %id))]
    async fn remove(&self, id: Uuid) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM uploads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.operation = "select", db.record_id = %id))]
    async fn get_by_id(&self, id: Uuid) -> Result<Option<UploadRecord>, AppError> {
        let record = sqlx::query_as::<Postgres, UploadRecord>(
            "SELECT * FROM uploads WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.operation = "select"))]
    async fn get_by_original_name(&self, name: &str) -> Result<Option<UploadRecord>, AppError> {
        let record = sqlx::query_as::<Postgres, UploadRecord>(
            "SELECT * FROM uploads WHERE LOWER(original_name) = LOWER($1) ORDER BY created_at DESC LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.operation = "select"))]
    async fn list(&self, is_deleted: bool) -> Result<Vec<UploadRecord>, AppError> {
        let records = sqlx::query_as::<Postgres, UploadRecord>(
            "SELECT * FROM uploads WHERE is_deleted = $1 ORDER BY created_at DESC",
        )
        .bind(is_deleted)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.operation = "select"))]
    async fn search(&self, term: &str, is_deleted: bool) -> Result<Vec<UploadRecord>, AppError> {
        let pattern = format!("%{}%", term);

        let records = sqlx::query_as::<Postgres, UploadRecord>(
            "SELECT * FROM uploads WHERE is_deleted = $1 AND original_name ILIKE $2 ORDER BY created_at DESC",
        )
        .bind(is_deleted)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
