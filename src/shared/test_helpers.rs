#![cfg(test)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::core::error::Result;
use crate::features::datasets::models::{Dataset, NewDataset};
use crate::features::uploads::models::{
    NewPendingUpload, PendingUpload, ReviewInput, UploadStatus,
};
use crate::features::uploads::repository::{ReviewSession, UploadRepository};

#[derive(Default)]
struct MemoryState {
    uploads: Vec<PendingUpload>,
    datasets: Vec<Dataset>,
    next_upload_id: i64,
    next_dataset_id: i64,
}

/// In-memory upload store for service and handler tests.
///
/// A review session holds the whole store lock until it is dropped, so
/// concurrent reviews of one upload are serialized like a row lock.
#[derive(Clone, Default)]
pub struct MemoryUploadRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryUploadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upload(&self, id: i64) -> Option<PendingUpload> {
        let state = self.state.lock().await;
        state.uploads.iter().find(|u| u.id == id).cloned()
    }

    pub async fn uploads(&self) -> Vec<PendingUpload> {
        self.state.lock().await.uploads.clone()
    }

    /// Committed datasets in insertion order
    pub async fn datasets(&self) -> Vec<Dataset> {
        self.state.lock().await.datasets.clone()
    }
}

#[async_trait]
impl UploadRepository for MemoryUploadRepository {
    async fn create(&self, upload: NewPendingUpload) -> Result<PendingUpload> {
        let mut state = self.state.lock().await;
        state.next_upload_id += 1;

        let created = PendingUpload {
            id: state.next_upload_id,
            file_name: upload.file_name,
            file_type: upload.file_type,
            file_content: upload.file_content,
            uploaded_by: upload.uploaded_by,
            status: UploadStatus::Pending,
            review_notes: String::new(),
            reviewed_by: String::new(),
            created_at: Utc::now(),
            reviewed_at: None,
        };
        state.uploads.push(created.clone());
        Ok(created)
    }

    async fn list(&self, status: Option<UploadStatus>) -> Result<Vec<PendingUpload>> {
        let state = self.state.lock().await;
        let mut uploads: Vec<PendingUpload> = state
            .uploads
            .iter()
            .filter(|u| status.map_or(true, |s| u.status == s))
            .cloned()
            .collect();
        uploads.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(uploads)
    }

    async fn find(&self, id: i64) -> Result<Option<PendingUpload>> {
        Ok(self.upload(id).await)
    }

    async fn begin_review(&self, id: i64) -> Result<Option<Box<dyn ReviewSession>>> {
        let guard = self.state.clone().lock_owned().await;

        let upload = guard
            .uploads
            .iter()
            .find(|u| u.id == id && u.status == UploadStatus::Pending)
            .cloned();

        Ok(upload.map(|upload| {
            let session: Box<dyn ReviewSession> = Box::new(MemoryReviewSession {
                guard,
                upload,
                staged: Vec::new(),
            });
            session
        }))
    }

    async fn reject(&self, id: i64, review: &ReviewInput) -> Result<bool> {
        let mut state = self.state.lock().await;
        match state
            .uploads
            .iter_mut()
            .find(|u| u.id == id && u.status == UploadStatus::Pending)
        {
            Some(upload) => {
                upload.status = UploadStatus::Rejected;
                upload.review_notes = review.review_notes.clone();
                upload.reviewed_by = review.reviewed_by.clone();
                upload.reviewed_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

struct MemoryReviewSession {
    guard: OwnedMutexGuard<MemoryState>,
    upload: PendingUpload,
    /// Inserted but not yet committed
    staged: Vec<Dataset>,
}

#[async_trait]
impl ReviewSession for MemoryReviewSession {
    fn upload(&self) -> &PendingUpload {
        &self.upload
    }

    async fn insert_dataset(
        &mut self,
        dataset: &NewDataset,
    ) -> Result<std::result::Result<Dataset, String>> {
        let taken = self
            .guard
            .datasets
            .iter()
            .chain(self.staged.iter())
            .any(|d| d.name == dataset.name);
        if taken {
            return Ok(Err(
                "duplicate key value violates unique constraint \"datasets_name_unique\"".to_string(),
            ));
        }

        self.guard.next_dataset_id += 1;
        let now = Utc::now();
        let created = Dataset {
            id: self.guard.next_dataset_id,
            name: dataset.name.clone(),
            description: Some(dataset.description.clone()),
            disease_type: Some(dataset.disease_type.clone()),
            sample_size: Some(dataset.sample_size),
            data_accessibility: Some(dataset.data_accessibility.clone()),
            wgs_available: Some(dataset.wgs_available.clone()),
            imaging_types: Some(dataset.imaging_types.clone()),
            modalities: Some(dataset.modalities.clone()),
            created_at: now,
            updated_at: now,
        };
        self.staged.push(created.clone());
        Ok(Ok(created))
    }

    async fn approve(&mut self, review: &ReviewInput) -> Result<bool> {
        let id = self.upload.id;
        let state = &mut *self.guard;

        let Some(upload) = state
            .uploads
            .iter_mut()
            .find(|u| u.id == id && u.status == UploadStatus::Pending)
        else {
            return Ok(false);
        };

        upload.status = UploadStatus::Approved;
        upload.review_notes = review.review_notes.clone();
        upload.reviewed_by = review.reviewed_by.clone();
        upload.reviewed_at = Some(Utc::now());
        state.datasets.append(&mut self.staged);
        Ok(true)
    }
}
