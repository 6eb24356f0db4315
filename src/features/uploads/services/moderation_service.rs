use std::sync::Arc;

use serde_json::Value;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::{
    ApprovalResultDto, PendingUploadDetailDto, PendingUploadDto, PendingUploadQueryParams,
    ReviewUploadDto,
};
use crate::features::uploads::models::ReviewInput;
use crate::features::uploads::repository::UploadRepository;
use crate::features::uploads::services::column_matching::{self, RowError};
use crate::features::uploads::services::normalizer::{self, Row};
use crate::shared::constants::MAX_REPORTED_ROW_ERRORS;

/// Service for reviewing staged uploads
pub struct ModerationService {
    repository: Arc<dyn UploadRepository>,
}

fn not_reviewable() -> AppError {
    AppError::NotFound("Upload not found or already reviewed".to_string())
}

impl ModerationService {
    pub fn new(repository: Arc<dyn UploadRepository>) -> Self {
        Self { repository }
    }

    /// Uploads newest first, filtered by status (`pending` by default)
    pub async fn list(&self, params: &PendingUploadQueryParams) -> Result<Vec<PendingUploadDto>> {
        let status = params.status_filter()?;
        let uploads = self.repository.list(status).await?;

        Ok(uploads.iter().map(PendingUploadDto::from).collect())
    }

    /// One upload with its staged rows decoded
    pub async fn detail(&self, id: i64) -> Result<PendingUploadDetailDto> {
        let upload = self
            .repository
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Upload not found".to_string()))?;

        Ok(PendingUploadDetailDto {
            upload: PendingUploadDto::from(&upload),
            file_content: decode_rows(upload.id, &upload.file_content),
        })
    }

    /// Commit the staged rows as datasets and mark the upload approved.
    ///
    /// Rows that cannot be mapped or inserted are counted and skipped; the
    /// rest are committed together with the status change.
    pub async fn approve(&self, id: i64, dto: ReviewUploadDto) -> Result<ApprovalResultDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let review = ReviewInput::new(dto.review_notes, dto.reviewed_by);

        let mut session = self
            .repository
            .begin_review(id)
            .await?
            .ok_or_else(not_reviewable)?;

        let rows = match serde_json::from_str::<Value>(&session.upload().file_content) {
            Ok(Value::Array(rows)) if !rows.is_empty() => rows,
            Ok(_) => return Err(AppError::Validation("No data found in file".to_string())),
            Err(e) => {
                tracing::error!("Upload {} has undecodable content: {}", id, e);
                return Err(AppError::Format(e.to_string()));
            }
        };

        let mut added_count = 0;
        let mut row_errors: Vec<RowError> = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            let dataset = match column_matching::resolve_dataset(row, index) {
                Ok(dataset) => dataset,
                Err(e) => {
                    tracing::warn!("Upload {}: {}", id, e);
                    row_errors.push(e);
                    continue;
                }
            };

            match session.insert_dataset(&dataset).await? {
                Ok(created) => {
                    tracing::debug!("Upload {}: added dataset {} ({})", id, created.id, created.name);
                    added_count += 1;
                }
                Err(message) => {
                    let e = RowError::Database {
                        row: index + 1,
                        message,
                    };
                    tracing::warn!("Upload {}: {}", id, e);
                    row_errors.push(e);
                }
            }
        }

        if !session.approve(&review).await? {
            return Err(not_reviewable());
        }

        tracing::info!(
            "Upload {} approved by '{}': {} added, {} failed",
            id,
            review.reviewed_by,
            added_count,
            row_errors.len()
        );

        Ok(ApprovalResultDto {
            added_count,
            error_count: row_errors.len(),
            errors: row_errors
                .iter()
                .take(MAX_REPORTED_ROW_ERRORS)
                .map(ToString::to_string)
                .collect(),
        })
    }

    /// Mark a pending upload rejected without touching datasets
    pub async fn reject(&self, id: i64, dto: ReviewUploadDto) -> Result<PendingUploadDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let review = ReviewInput::new(dto.review_notes, dto.reviewed_by);

        if !self.repository.reject(id, &review).await? {
            return Err(not_reviewable());
        }

        tracing::info!("Upload {} rejected by '{}'", id, review.reviewed_by);

        let upload = self
            .repository
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Upload not found".to_string()))?;

        Ok(PendingUploadDto::from(&upload))
    }
}

/// Staged rows for display; unreadable content shows as no rows
fn decode_rows(id: i64, content: &str) -> Vec<Row> {
    match serde_json::from_str::<Vec<Row>>(content) {
        Ok(rows) => normalizer::ensure_json_safe(rows),
        Err(e) => {
            tracing::warn!("Upload {} content is not a list of rows: {}", id, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::uploads::models::{FileType, NewPendingUpload, UploadStatus};
    use crate::shared::test_helpers::MemoryUploadRepository;
    use serde_json::json;

    async fn stage(repo: &MemoryUploadRepository, content: &str) -> i64 {
        repo.create(NewPendingUpload {
            file_name: "cohorts.csv".to_string(),
            file_type: FileType::Csv,
            file_content: content.to_string(),
            uploaded_by: "lab-7".to_string(),
        })
        .await
        .unwrap()
        .id
    }

    fn setup() -> (Arc<MemoryUploadRepository>, ModerationService) {
        let repo = Arc::new(MemoryUploadRepository::new());
        let service = ModerationService::new(repo.clone());
        (repo, service)
    }

    fn three_rows() -> String {
        json!([
            {"Dataset Name": "ADNI", "Sample Size": "1,518 (ADNI)"},
            {"Dataset Name": "", "Sample Size": "40"},
            {"Dataset Name": "NACC", "Sample Size": "n/a"}
        ])
        .to_string()
    }

    #[tokio::test]
    async fn test_approve_isolates_row_errors() {
        let (repo, service) = setup();
        let id = stage(&repo, &three_rows()).await;

        let result = service.approve(id, ReviewUploadDto::default()).await.unwrap();

        assert_eq!(result.added_count, 2);
        assert_eq!(result.error_count, 1);
        assert_eq!(
            result.errors,
            vec!["Row 2: Missing dataset name. Available columns: Dataset Name, Sample Size"]
        );

        let upload = repo.upload(id).await.unwrap();
        assert_eq!(upload.status, UploadStatus::Approved);
        assert_eq!(upload.reviewed_by, "admin");
        assert_eq!(upload.review_notes, "");
        assert!(upload.reviewed_at.is_some());

        let datasets = repo.datasets().await;
        let names: Vec<&str> = datasets.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["ADNI", "NACC"]);
        assert_eq!(datasets[0].sample_size, Some(1518));
        assert_eq!(datasets[1].sample_size, Some(0));
    }

    #[tokio::test]
    async fn test_overlong_reviewer_leaves_upload_pending() {
        let (repo, service) = setup();
        let id = stage(&repo, &three_rows()).await;
        let review = ReviewUploadDto {
            review_notes: None,
            reviewed_by: Some("r".repeat(300)),
        };

        let approve = service.approve(id, review.clone()).await;
        assert!(matches!(approve, Err(AppError::Validation(_))));
        let reject = service.reject(id, review).await;
        assert!(matches!(reject, Err(AppError::Validation(_))));

        assert!(repo.datasets().await.is_empty());
        assert_eq!(repo.upload(id).await.unwrap().status, UploadStatus::Pending);
    }

    #[tokio::test]
    async fn test_second_review_is_not_found() {
        let (repo, service) = setup();
        let id = stage(&repo, &three_rows()).await;

        service.approve(id, ReviewUploadDto::default()).await.unwrap();

        let again = service.approve(id, ReviewUploadDto::default()).await;
        assert!(matches!(again, Err(AppError::NotFound(_))));
        let reject = service.reject(id, ReviewUploadDto::default()).await;
        assert!(matches!(reject, Err(AppError::NotFound(_))));

        assert_eq!(repo.datasets().await.len(), 2);
        assert_eq!(repo.upload(id).await.unwrap().status, UploadStatus::Approved);
    }

    #[tokio::test]
    async fn test_approve_rejected_upload_adds_nothing() {
        let (repo, service) = setup();
        let id = stage(&repo, &three_rows()).await;

        let rejected = service
            .reject(
                id,
                ReviewUploadDto {
                    review_notes: Some("duplicates".to_string()),
                    reviewed_by: Some("curator".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(rejected.status, UploadStatus::Rejected);
        assert_eq!(rejected.review_notes, "duplicates");
        assert_eq!(rejected.reviewed_by, "curator");

        let result = service.approve(id, ReviewUploadDto::default()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(repo.datasets().await.is_empty());
        assert_eq!(repo.upload(id).await.unwrap().status, UploadStatus::Rejected);
    }

    #[tokio::test]
    async fn test_unknown_upload_is_not_found() {
        let (_repo, service) = setup();

        assert!(matches!(
            service.approve(404, ReviewUploadDto::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.detail(404).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_duplicate_name_is_a_row_error() {
        let (repo, service) = setup();
        let content = json!([
            {"name": "ADNI"},
            {"name": "ADNI"},
            {"name": "PPMI"}
        ])
        .to_string();
        let id = stage(&repo, &content).await;

        let result = service.approve(id, ReviewUploadDto::default()).await.unwrap();

        assert_eq!(result.added_count, 2);
        assert_eq!(result.error_count, 1);
        assert!(result.errors[0].starts_with("Row 2: Database error - "));
        assert_eq!(repo.datasets().await.len(), 2);
    }

    #[tokio::test]
    async fn test_undecodable_content_leaves_upload_pending() {
        let (repo, service) = setup();
        let id = stage(&repo, "{not json").await;

        let result = service.approve(id, ReviewUploadDto::default()).await;

        assert!(matches!(result, Err(AppError::Format(_))));
        assert_eq!(repo.upload(id).await.unwrap().status, UploadStatus::Pending);
    }

    #[tokio::test]
    async fn test_empty_row_list_leaves_upload_pending() {
        let (repo, service) = setup();
        let id = stage(&repo, "[]").await;

        let result = service.approve(id, ReviewUploadDto::default()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(repo.upload(id).await.unwrap().status, UploadStatus::Pending);
    }

    #[tokio::test]
    async fn test_reported_errors_are_capped() {
        let (repo, service) = setup();
        let rows: Vec<Value> = (0..12).map(|_| json!({"Notes": "no name here"})).collect();
        let id = stage(&repo, &Value::Array(rows).to_string()).await;

        let result = service.approve(id, ReviewUploadDto::default()).await.unwrap();

        assert_eq!(result.added_count, 0);
        assert_eq!(result.error_count, 12);
        assert_eq!(result.errors.len(), 10);
        assert!(result.errors[9].starts_with("Row 10: "));
        assert_eq!(repo.upload(id).await.unwrap().status, UploadStatus::Approved);
    }

    #[tokio::test]
    async fn test_concurrent_approvals_only_one_succeeds() {
        let (repo, service) = setup();
        let id = stage(&repo, &three_rows()).await;

        let (first, second) = tokio::join!(
            service.approve(id, ReviewUploadDto::default()),
            service.approve(id, ReviewUploadDto::default())
        );

        let successes = [first.is_ok(), second.is_ok()]
            .iter()
            .filter(|ok| **ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(repo.datasets().await.len(), 2);
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let (repo, service) = setup();
        let first = stage(&repo, &three_rows()).await;
        let second = stage(&repo, &three_rows()).await;
        service.reject(first, ReviewUploadDto::default()).await.unwrap();

        let pending = service
            .list(&PendingUploadQueryParams::default())
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, second);

        let all = service
            .list(&PendingUploadQueryParams {
                status: Some("all".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second);

        let unknown = service
            .list(&PendingUploadQueryParams {
                status: Some("archived".to_string()),
            })
            .await;
        assert!(matches!(unknown, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_detail_decodes_rows() {
        let (repo, service) = setup();
        let good = stage(&repo, &three_rows()).await;
        let broken = stage(&repo, "{not json").await;

        let detail = service.detail(good).await.unwrap();
        assert_eq!(detail.file_content.len(), 3);
        assert_eq!(detail.file_content[0]["Dataset Name"], json!("ADNI"));
        assert_eq!(detail.upload.status, UploadStatus::Pending);

        let detail = service.detail(broken).await.unwrap();
        assert!(detail.file_content.is_empty());
    }
}
