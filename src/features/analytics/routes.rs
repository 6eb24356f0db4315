use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::analytics::handlers;
use crate::features::analytics::services::AnalyticsService;

/// Create routes for the analytics feature
pub fn routes(service: Arc<AnalyticsService>) -> Router {
    Router::new()
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/filters", get(handlers::get_filters))
        .route("/api/analytics/overview", get(handlers::get_overview))
        .with_state(service)
}
