use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::publications::handlers;
use crate::features::publications::services::PublicationService;

/// Create routes for the publications feature
pub fn routes(service: Arc<PublicationService>) -> Router {
    Router::new()
        .route("/api/publications", get(handlers::list_publications))
        .route("/api/publications/search", get(handlers::search_publications))
        .route("/api/publications/export", get(handlers::export_publications))
        .route("/api/publications/recent", get(handlers::recent_publications))
        .with_state(service)
}
