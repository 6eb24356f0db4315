use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::uploads::models::{FileType, PendingUpload, UploadStatus};
use crate::features::uploads::services::normalizer::Row;

/// Query params for listing uploads
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PendingUploadQueryParams {
    /// `pending` (default), `approved`, `rejected` or `all`
    pub status: Option<String>,
}

impl PendingUploadQueryParams {
    /// Status to filter on; `None` selects every upload
    pub fn status_filter(&self) -> Result<Option<UploadStatus>> {
        let status = self
            .status
            .as_deref()
            .map(|s| s.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match status.as_str() {
            "" | "pending" => Ok(Some(UploadStatus::Pending)),
            "approved" => Ok(Some(UploadStatus::Approved)),
            "rejected" => Ok(Some(UploadStatus::Rejected)),
            "all" => Ok(None),
            other => Err(AppError::Validation(format!(
                "Unknown status filter '{}', expected pending, approved, rejected or all",
                other
            ))),
        }
    }
}

/// Upload summary without its rows
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PendingUploadDto {
    pub id: i64,
    pub file_name: String,
    pub file_type: FileType,
    pub uploaded_by: String,
    pub status: UploadStatus,
    pub review_notes: String,
    pub reviewed_by: String,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl From<&PendingUpload> for PendingUploadDto {
    fn from(u: &PendingUpload) -> Self {
        Self {
            id: u.id,
            file_name: u.file_name.clone(),
            file_type: u.file_type,
            uploaded_by: u.uploaded_by.clone(),
            status: u.status,
            review_notes: u.review_notes.clone(),
            reviewed_by: u.reviewed_by.clone(),
            created_at: u.created_at,
            reviewed_at: u.reviewed_at,
        }
    }
}

/// Upload with its decoded rows
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PendingUploadDetailDto {
    #[serde(flatten)]
    pub upload: PendingUploadDto,
    #[schema(value_type = Vec<Object>)]
    pub file_content: Vec<Row>,
}

/// Request DTO for approving or rejecting an upload
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ReviewUploadDto {
    #[serde(default)]
    pub review_notes: Option<String>,
    /// Defaults to `admin` when absent or blank
    #[serde(default)]
    #[validate(length(max = 255, message = "Reviewer must not exceed 255 characters"))]
    pub reviewed_by: Option<String>,
}

/// Outcome of an approval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApprovalResultDto {
    pub added_count: usize,
    pub error_count: usize,
    /// At most the first 10 row errors
    pub errors: Vec<String>,
}

impl ApprovalResultDto {
    pub fn message(&self) -> String {
        let mut message = format!(
            "Successfully added {} dataset(s) to the database.",
            self.added_count
        );
        if self.error_count > 0 {
            message.push_str(&format!(" {} row(s) had errors.", self.error_count));
        }
        message
    }
}
