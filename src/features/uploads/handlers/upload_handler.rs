use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::uploads::dtos::{
    ApprovalResultDto, PendingUploadDetailDto, PendingUploadDto, PendingUploadQueryParams,
    ReviewUploadDto, UploadCreatedDto, UploadFileDto,
};
use crate::features::uploads::services::{ModerationService, UploadService};
use crate::shared::types::{ApiResponse, Meta};

/// State for upload and moderation handlers
#[derive(Clone)]
pub struct UploadState {
    pub upload_service: Arc<UploadService>,
    pub moderation_service: Arc<ModerationService>,
}

/// Submit a CSV or spreadsheet for moderation
///
/// The file is normalized into rows immediately and staged as a pending
/// upload. Nothing reaches the dataset catalog until an admin approves it.
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body = UploadFileDto,
    responses(
        (status = 201, description = "Upload staged for review", body = ApiResponse<UploadCreatedDto>),
        (status = 400, description = "Missing fields, unsupported type or unparseable content")
    ),
    tag = "uploads"
)]
pub async fn upload_file(
    State(state): State<UploadState>,
    AppJson(dto): AppJson<UploadFileDto>,
) -> Result<(StatusCode, Json<ApiResponse<UploadCreatedDto>>)> {
    let created = state.upload_service.submit(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(created),
            Some("File uploaded successfully and pending review".to_string()),
            None,
        )),
    ))
}

/// List uploads by moderation status
#[utoipa::path(
    get,
    path = "/api/management/pending",
    params(PendingUploadQueryParams),
    responses(
        (status = 200, description = "Uploads, newest first", body = ApiResponse<Vec<PendingUploadDto>>),
        (status = 400, description = "Unknown status filter")
    ),
    tag = "moderation"
)]
pub async fn list_uploads(
    State(state): State<UploadState>,
    Query(params): Query<PendingUploadQueryParams>,
) -> Result<Json<ApiResponse<Vec<PendingUploadDto>>>> {
    let uploads = state.moderation_service.list(&params).await?;
    let total = uploads.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(uploads),
        None,
        Some(Meta::total(total)),
    )))
}

/// Get an upload with its staged rows
#[utoipa::path(
    get,
    path = "/api/management/pending/{id}",
    params(
        ("id" = i64, Path, description = "Upload ID")
    ),
    responses(
        (status = 200, description = "Upload found", body = ApiResponse<PendingUploadDetailDto>),
        (status = 404, description = "Upload not found")
    ),
    tag = "moderation"
)]
pub async fn get_upload(
    State(state): State<UploadState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PendingUploadDetailDto>>> {
    let detail = state.moderation_service.detail(id).await?;
    Ok(Json(ApiResponse::success(Some(detail), None, None)))
}

/// Approve an upload and add its rows to the catalog
#[utoipa::path(
    post,
    path = "/api/management/pending/{id}/approve",
    params(
        ("id" = i64, Path, description = "Upload ID")
    ),
    request_body = ReviewUploadDto,
    responses(
        (status = 200, description = "Upload approved", body = ApiResponse<ApprovalResultDto>),
        (status = 400, description = "Staged content is invalid or empty"),
        (status = 404, description = "Upload not found or already reviewed")
    ),
    tag = "moderation"
)]
pub async fn approve_upload(
    State(state): State<UploadState>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<ReviewUploadDto>,
) -> Result<Json<ApiResponse<ApprovalResultDto>>> {
    let result = state.moderation_service.approve(id, dto).await?;
    let message = result.message();

    Ok(Json(ApiResponse::success(Some(result), Some(message), None)))
}

/// Reject an upload
#[utoipa::path(
    post,
    path = "/api/management/pending/{id}/reject",
    params(
        ("id" = i64, Path, description = "Upload ID")
    ),
    request_body = ReviewUploadDto,
    responses(
        (status = 200, description = "Upload rejected", body = ApiResponse<PendingUploadDto>),
        (status = 404, description = "Upload not found or already reviewed")
    ),
    tag = "moderation"
)]
pub async fn reject_upload(
    State(state): State<UploadState>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<ReviewUploadDto>,
) -> Result<Json<ApiResponse<PendingUploadDto>>> {
    let upload = state.moderation_service.reject(id, dto).await?;

    Ok(Json(ApiResponse::success(
        Some(upload),
        Some("Upload rejected".to_string()),
        None,
    )))
}
