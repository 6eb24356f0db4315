use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::core::error::Result;
use crate::features::datasets::dtos::{
    DatasetPublicationsDto, DatasetQueryParams, DatasetResponseDto, DatasetSearchParams,
    RecentQueryParams,
};
use crate::features::datasets::services::DatasetService;
use crate::shared::types::{ApiResponse, Meta};

/// List datasets (paginated, filterable)
#[utoipa::path(
    get,
    path = "/api/datasets",
    params(DatasetQueryParams),
    responses(
        (status = 200, description = "List of datasets", body = ApiResponse<Vec<DatasetResponseDto>>)
    ),
    tag = "datasets"
)]
pub async fn list_datasets(
    State(service): State<Arc<DatasetService>>,
    Query(params): Query<DatasetQueryParams>,
) -> Result<Json<ApiResponse<Vec<DatasetResponseDto>>>> {
    let (items, total) = service.list(&params).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta::paged(total, &params.pagination())),
    )))
}

/// Get dataset by ID
#[utoipa::path(
    get,
    path = "/api/datasets/{id}",
    params(
        ("id" = i64, Path, description = "Dataset ID")
    ),
    responses(
        (status = 200, description = "Dataset found", body = ApiResponse<DatasetResponseDto>),
        (status = 404, description = "Dataset not found")
    ),
    tag = "datasets"
)]
pub async fn get_dataset(
    State(service): State<Arc<DatasetService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DatasetResponseDto>>> {
    let dataset = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(dataset), None, None)))
}

/// Advanced dataset search
#[utoipa::path(
    get,
    path = "/api/datasets/search",
    params(DatasetSearchParams),
    responses(
        (status = 200, description = "Matching datasets", body = ApiResponse<Vec<DatasetResponseDto>>)
    ),
    tag = "datasets"
)]
pub async fn search_datasets(
    State(service): State<Arc<DatasetService>>,
    Query(params): Query<DatasetSearchParams>,
) -> Result<Json<ApiResponse<Vec<DatasetResponseDto>>>> {
    let items = service.search(&params).await?;
    let total = items.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta::total(total)),
    )))
}

/// Recently added datasets
#[utoipa::path(
    get,
    path = "/api/datasets/recent",
    params(RecentQueryParams),
    responses(
        (status = 200, description = "Newest datasets", body = ApiResponse<Vec<DatasetResponseDto>>)
    ),
    tag = "datasets"
)]
pub async fn recent_datasets(
    State(service): State<Arc<DatasetService>>,
    Query(params): Query<RecentQueryParams>,
) -> Result<Json<ApiResponse<Vec<DatasetResponseDto>>>> {
    let items = service.recent(params.limit()).await?;
    Ok(Json(ApiResponse::success(Some(items), None, None)))
}

/// Export all datasets as CSV
#[utoipa::path(
    get,
    path = "/api/datasets/export",
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String)
    ),
    tag = "datasets"
)]
pub async fn export_datasets(
    State(service): State<Arc<DatasetService>>,
) -> Result<impl IntoResponse> {
    let body = service.export_csv().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"adrd_datasets.csv\"",
            ),
        ],
        body,
    ))
}

/// Publications that reference a dataset by name
#[utoipa::path(
    get,
    path = "/api/datasets/{id}/publications",
    params(
        ("id" = i64, Path, description = "Dataset ID")
    ),
    responses(
        (status = 200, description = "Dataset publications", body = ApiResponse<DatasetPublicationsDto>),
        (status = 404, description = "Dataset not found")
    ),
    tag = "datasets"
)]
pub async fn get_dataset_publications(
    State(service): State<Arc<DatasetService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DatasetPublicationsDto>>> {
    let dto = service.publications(id).await?;
    let total = dto.publications.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(dto),
        None,
        Some(Meta::total(total)),
    )))
}
