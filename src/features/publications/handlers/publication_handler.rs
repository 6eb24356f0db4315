use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::core::error::Result;
use crate::features::datasets::dtos::RecentQueryParams;
use crate::features::publications::dtos::{
    PublicationQueryParams, PublicationResponseDto, PublicationSearchParams,
};
use crate::features::publications::services::PublicationService;
use crate::shared::types::{ApiResponse, Meta};

/// List publications (paginated, filterable)
#[utoipa::path(
    get,
    path = "/api/publications",
    params(PublicationQueryParams),
    responses(
        (status = 200, description = "List of publications", body = ApiResponse<Vec<PublicationResponseDto>>)
    ),
    tag = "publications"
)]
pub async fn list_publications(
    State(service): State<Arc<PublicationService>>,
    Query(params): Query<PublicationQueryParams>,
) -> Result<Json<ApiResponse<Vec<PublicationResponseDto>>>> {
    let (items, total) = service.list(&params).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta::paged(total, &params.pagination())),
    )))
}

/// Advanced publication search
#[utoipa::path(
    get,
    path = "/api/publications/search",
    params(PublicationSearchParams),
    responses(
        (status = 200, description = "Matching publications", body = ApiResponse<Vec<PublicationResponseDto>>)
    ),
    tag = "publications"
)]
pub async fn search_publications(
    State(service): State<Arc<PublicationService>>,
    Query(params): Query<PublicationSearchParams>,
) -> Result<Json<ApiResponse<Vec<PublicationResponseDto>>>> {
    let items = service.search(&params).await?;
    let total = items.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta::total(total)),
    )))
}

/// Recently added publications
#[utoipa::path(
    get,
    path = "/api/publications/recent",
    params(RecentQueryParams),
    responses(
        (status = 200, description = "Newest publications", body = ApiResponse<Vec<PublicationResponseDto>>)
    ),
    tag = "publications"
)]
pub async fn recent_publications(
    State(service): State<Arc<PublicationService>>,
    Query(params): Query<RecentQueryParams>,
) -> Result<Json<ApiResponse<Vec<PublicationResponseDto>>>> {
    let items = service.recent(params.limit()).await?;
    Ok(Json(ApiResponse::success(Some(items), None, None)))
}

/// Export all publications as CSV
#[utoipa::path(
    get,
    path = "/api/publications/export",
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String)
    ),
    tag = "publications"
)]
pub async fn export_publications(
    State(service): State<Arc<PublicationService>>,
) -> Result<impl IntoResponse> {
    let body = service.export_csv().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"adrd_publications.csv\"",
            ),
        ],
        body,
    ))
}
