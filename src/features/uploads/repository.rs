//! Persistence for staged uploads and the approval transaction.

use async_trait::async_trait;
use sqlx::{Acquire, PgPool, Postgres, Transaction};

use crate::core::error::{AppError, Result};
use crate::features::datasets::models::{Dataset, NewDataset};
use crate::features::uploads::models::{
    NewPendingUpload, PendingUpload, ReviewInput, UploadStatus,
};

/// Storage operations behind upload intake and moderation
#[async_trait]
pub trait UploadRepository: Send + Sync {
    async fn create(&self, upload: NewPendingUpload) -> Result<PendingUpload>;

    /// Uploads newest first, optionally restricted to one status
    async fn list(&self, status: Option<UploadStatus>) -> Result<Vec<PendingUpload>>;

    async fn find(&self, id: i64) -> Result<Option<PendingUpload>>;

    /// Lock a pending upload for review. `None` if it is missing or already
    /// reviewed. Concurrent callers for the same id wait for the lock holder.
    async fn begin_review(&self, id: i64) -> Result<Option<Box<dyn ReviewSession>>>;

    /// Mark a pending upload rejected. `false` if it was not pending.
    async fn reject(&self, id: i64, review: &ReviewInput) -> Result<bool>;
}

/// An open approval holding the upload lock.
///
/// Dataset inserts become visible only after [`ReviewSession::approve`];
/// dropping the session discards them and releases the lock.
#[async_trait]
pub trait ReviewSession: Send {
    fn upload(&self) -> &PendingUpload;

    /// Insert one dataset in isolation from the other rows.
    ///
    /// The inner `Err` carries the store's reason for refusing this row
    /// (for example a duplicate name); the session stays usable.
    async fn insert_dataset(
        &mut self,
        dataset: &NewDataset,
    ) -> Result<std::result::Result<Dataset, String>>;

    /// Mark the upload approved and commit. `false` if it was no longer pending.
    async fn approve(&mut self, review: &ReviewInput) -> Result<bool>;
}

// ============================================================================
// Postgres
// ============================================================================

pub struct PgUploadRepository {
    pool: PgPool,
}

impl PgUploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadRepository for PgUploadRepository {
    async fn create(&self, upload: NewPendingUpload) -> Result<PendingUpload> {
        let query = format!(
            r#"
            INSERT INTO pending_uploads (file_name, file_type, file_content, uploaded_by, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING {}
            "#,
            PendingUpload::COLUMNS
        );

        sqlx::query_as::<_, PendingUpload>(&query)
            .bind(&upload.file_name)
            .bind(upload.file_type)
            .bind(&upload.file_content)
            .bind(&upload.uploaded_by)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to stage upload {}: {:?}", upload.file_name, e);
                AppError::Database(e)
            })
    }

    async fn list(&self, status: Option<UploadStatus>) -> Result<Vec<PendingUpload>> {
        let query = format!(
            r#"
            SELECT {}
            FROM pending_uploads
            WHERE ($1::upload_status IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            "#,
            PendingUpload::COLUMNS
        );

        sqlx::query_as::<_, PendingUpload>(&query)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list uploads: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find(&self, id: i64) -> Result<Option<PendingUpload>> {
        let query = format!(
            "SELECT {} FROM pending_uploads WHERE id = $1",
            PendingUpload::COLUMNS
        );

        sqlx::query_as::<_, PendingUpload>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get upload {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn begin_review(&self, id: i64) -> Result<Option<Box<dyn ReviewSession>>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin review transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let query = format!(
            "SELECT {} FROM pending_uploads WHERE id = $1 AND status = 'pending' FOR UPDATE",
            PendingUpload::COLUMNS
        );
        let upload = sqlx::query_as::<_, PendingUpload>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to lock upload {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        match upload {
            Some(upload) => {
                let session: Box<dyn ReviewSession> = Box::new(PgReviewSession {
                    upload,
                    tx: Some(tx),
                });
                Ok(Some(session))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    async fn reject(&self, id: i64, review: &ReviewInput) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE pending_uploads
            SET status = 'rejected', review_notes = $2, reviewed_by = $3, reviewed_at = NOW()
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .bind(&review.review_notes)
        .bind(&review.reviewed_by)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to reject upload {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() == 1)
    }
}

struct PgReviewSession {
    upload: PendingUpload,
    /// `None` once committed
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgReviewSession {
    fn tx(&mut self) -> Result<&mut Transaction<'static, Postgres>> {
        self.tx
            .as_mut()
            .ok_or_else(|| AppError::Internal("review session already closed".to_string()))
    }
}

#[async_trait]
impl ReviewSession for PgReviewSession {
    fn upload(&self) -> &PendingUpload {
        &self.upload
    }

    async fn insert_dataset(
        &mut self,
        dataset: &NewDataset,
    ) -> Result<std::result::Result<Dataset, String>> {
        let query = format!(
            r#"
            INSERT INTO datasets (
                name, description, disease_type, sample_size,
                data_accessibility, wgs_available, imaging_types, modalities
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            Dataset::COLUMNS
        );

        let tx = self.tx()?;
        let mut savepoint = tx.begin().await?;

        let inserted = sqlx::query_as::<_, Dataset>(&query)
            .bind(&dataset.name)
            .bind(&dataset.description)
            .bind(&dataset.disease_type)
            .bind(dataset.sample_size)
            .bind(&dataset.data_accessibility)
            .bind(&dataset.wgs_available)
            .bind(&dataset.imaging_types)
            .bind(&dataset.modalities)
            .fetch_one(&mut *savepoint)
            .await;

        match inserted {
            Ok(row) => {
                savepoint.commit().await?;
                Ok(Ok(row))
            }
            Err(sqlx::Error::Database(db_error)) => {
                savepoint.rollback().await?;
                Ok(Err(db_error.message().to_string()))
            }
            Err(e) => {
                tracing::error!("Failed to insert dataset {}: {:?}", dataset.name, e);
                Err(AppError::Database(e))
            }
        }
    }

    async fn approve(&mut self, review: &ReviewInput) -> Result<bool> {
        let mut tx = self
            .tx
            .take()
            .ok_or_else(|| AppError::Internal("review session already closed".to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE pending_uploads
            SET status = 'approved', review_notes = $2, reviewed_by = $3, reviewed_at = NOW()
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(self.upload.id)
        .bind(&review.review_notes)
        .bind(&review.reviewed_by)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to approve upload {}: {:?}", self.upload.id, e);
            AppError::Database(e)
        })?;

        if result.rows_affected() != 1 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit approval of upload {}: {:?}", self.upload.id, e);
            AppError::Database(e)
        })?;

        Ok(true)
    }
}
