use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::validate_not_blank;

/// Request DTO for submitting a file for moderation
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UploadFileDto {
    #[serde(default)]
    #[validate(
        custom(function = "validate_not_blank", message = "File name and content required"),
        length(max = 255, message = "File name must not exceed 255 characters")
    )]
    pub file_name: String,

    /// Raw CSV text, or base64 (optionally `data:<mime>;base64,` prefixed)
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "File name and content required"))]
    pub file_content: String,

    /// `csv`, `xlsx` or `xls`
    #[serde(default = "default_file_type")]
    #[schema(example = "csv")]
    pub file_type: String,

    /// Free-text label of the submitter
    #[serde(default)]
    #[validate(length(max = 255, message = "Uploader must not exceed 255 characters"))]
    pub uploaded_by: String,
}

fn default_file_type() -> String {
    "csv".to_string()
}

/// Response DTO after staging an upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadCreatedDto {
    pub upload_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_dto_defaults() {
        let dto: UploadFileDto =
            serde_json::from_str(r#"{"file_name": "a.csv", "file_content": "name\nx"}"#).unwrap();

        assert_eq!(dto.file_type, "csv");
        assert_eq!(dto.uploaded_by, "");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_upload_dto_rejects_blank_content() {
        let dto: UploadFileDto =
            serde_json::from_str(r#"{"file_name": "a.csv", "file_content": "   "}"#).unwrap();

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("file_content"));
        assert!(!errors.field_errors().contains_key("file_name"));
    }

    #[test]
    fn test_upload_dto_rejects_overlong_names() {
        let dto = UploadFileDto {
            file_name: format!("{}.csv", "a".repeat(300)),
            file_content: "name\nx".to_string(),
            file_type: "csv".to_string(),
            uploaded_by: "b".repeat(256),
        };

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("file_name"));
        assert!(errors.field_errors().contains_key("uploaded_by"));

        let at_limit = UploadFileDto {
            file_name: "a".repeat(255),
            uploaded_by: "b".repeat(255),
            ..dto
        };
        assert!(at_limit.validate().is_ok());
    }
}
