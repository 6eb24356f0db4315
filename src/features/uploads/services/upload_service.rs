use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::{UploadCreatedDto, UploadFileDto};
use crate::features::uploads::models::{FileType, NewPendingUpload};
use crate::features::uploads::repository::UploadRepository;
use crate::features::uploads::services::normalizer;

/// Service for file intake and staging
pub struct UploadService {
    repository: Arc<dyn UploadRepository>,
}

impl UploadService {
    pub fn new(repository: Arc<dyn UploadRepository>) -> Self {
        Self { repository }
    }

    /// Normalize a submitted file and stage it for moderation
    pub async fn submit(&self, dto: UploadFileDto) -> Result<UploadCreatedDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let file_type: FileType = dto.file_type.parse()?;
        let rows = normalizer::normalize(&dto.file_content, file_type)?;

        let file_content = serde_json::to_string(&rows)
            .map_err(|e| AppError::Internal(format!("Failed to encode rows: {}", e)))?;

        let upload = self
            .repository
            .create(NewPendingUpload {
                file_name: dto.file_name.trim().to_string(),
                file_type,
                file_content,
                uploaded_by: dto.uploaded_by.trim().to_string(),
            })
            .await?;

        tracing::info!(
            "Staged upload {} ({}, {} rows) from '{}'",
            upload.id,
            upload.file_type,
            rows.len(),
            upload.uploaded_by
        );

        Ok(UploadCreatedDto {
            upload_id: upload.id,
        })
    }
}
