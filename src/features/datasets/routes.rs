use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::datasets::handlers;
use crate::features::datasets::services::DatasetService;

/// Create routes for the datasets feature
///
/// Static segments (`search`, `export`, `recent`) take priority over `{id}`.
pub fn routes(service: Arc<DatasetService>) -> Router {
    Router::new()
        .route("/api/datasets", get(handlers::list_datasets))
        .route("/api/datasets/search", get(handlers::search_datasets))
        .route("/api/datasets/export", get(handlers::export_datasets))
        .route("/api/datasets/recent", get(handlers::recent_datasets))
        .route("/api/datasets/{id}", get(handlers::get_dataset))
        .route(
            "/api/datasets/{id}/publications",
            get(handlers::get_dataset_publications),
        )
        .with_state(service)
}
