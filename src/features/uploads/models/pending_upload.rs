use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

use crate::core::error::AppError;
use crate::shared::constants::DEFAULT_REVIEWER;

/// Moderation state of an upload. Terminal once not `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "upload_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadStatus::Pending => write!(f, "pending"),
            UploadStatus::Approved => write!(f, "approved"),
            UploadStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Declared format of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "upload_file_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Csv,
    Xlsx,
    Xls,
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileType::Csv => write!(f, "csv"),
            FileType::Xlsx => write!(f, "xlsx"),
            FileType::Xls => write!(f, "xls"),
        }
    }
}

impl FromStr for FileType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(FileType::Csv),
            "xlsx" => Ok(FileType::Xlsx),
            "xls" => Ok(FileType::Xls),
            _ => Err(AppError::Parse("Unsupported file type".to_string())),
        }
    }
}

/// Database model for a staged upload
///
/// `file_content` holds the normalized rows as a JSON array of objects.
#[derive(Debug, Clone, FromRow)]
pub struct PendingUpload {
    pub id: i64,
    pub file_name: String,
    pub file_type: FileType,
    pub file_content: String,
    pub uploaded_by: String,
    pub status: UploadStatus,
    pub review_notes: String,
    pub reviewed_by: String,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl PendingUpload {
    pub const COLUMNS: &'static str = "id, file_name, file_type, file_content, uploaded_by, \
         status, review_notes, reviewed_by, created_at, reviewed_at";
}

/// Data needed to stage a new upload
#[derive(Debug, Clone)]
pub struct NewPendingUpload {
    pub file_name: String,
    pub file_type: FileType,
    pub file_content: String,
    pub uploaded_by: String,
}

/// Reviewer decision metadata recorded on approve/reject
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewInput {
    pub review_notes: String,
    pub reviewed_by: String,
}

impl ReviewInput {
    /// Blank notes become `""`, a blank reviewer becomes the default reviewer
    pub fn new(review_notes: Option<String>, reviewed_by: Option<String>) -> Self {
        let reviewed_by = reviewed_by
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REVIEWER.to_string());

        Self {
            review_notes: review_notes.unwrap_or_default(),
            reviewed_by,
        }
    }
}
