use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::analytics::dtos::*;
use crate::features::analytics::services::AnalyticsService;
use crate::shared::types::ApiResponse;

/// Summary statistics
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Catalog totals and disease distribution", body = ApiResponse<StatsDto>)
    ),
    tag = "analytics"
)]
pub async fn get_stats(
    State(service): State<Arc<AnalyticsService>>,
) -> Result<Json<ApiResponse<StatsDto>>> {
    let stats = service.get_stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Filter options
#[utoipa::path(
    get,
    path = "/api/filters",
    responses(
        (status = 200, description = "Disease types and modalities", body = ApiResponse<FilterOptionsDto>)
    ),
    tag = "analytics"
)]
pub async fn get_filters(
    State(service): State<Arc<AnalyticsService>>,
) -> Result<Json<ApiResponse<FilterOptionsDto>>> {
    let filters = service.get_filters().await?;
    Ok(Json(ApiResponse::success(Some(filters), None, None)))
}

/// Analytics overview
#[utoipa::path(
    get,
    path = "/api/analytics/overview",
    responses(
        (status = 200, description = "Catalog analytics", body = ApiResponse<AnalyticsOverviewDto>)
    ),
    tag = "analytics"
)]
pub async fn get_overview(
    State(service): State<Arc<AnalyticsService>>,
) -> Result<Json<ApiResponse<AnalyticsOverviewDto>>> {
    let overview = service.get_overview().await?;
    Ok(Json(ApiResponse::success(Some(overview), None, None)))
}
