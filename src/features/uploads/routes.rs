use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::uploads::handlers::{self, UploadState};
use crate::features::uploads::services::{ModerationService, UploadService};

/// Create routes for upload intake and moderation
///
/// `max_upload_size` bounds the JSON body of `/api/upload`, which carries
/// the whole file.
pub fn routes(
    upload_service: Arc<UploadService>,
    moderation_service: Arc<ModerationService>,
    max_upload_size: usize,
) -> Router {
    let state = UploadState {
        upload_service,
        moderation_service,
    };

    Router::new()
        .route(
            "/api/upload",
            post(handlers::upload_file).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/api/management/pending", get(handlers::list_uploads))
        .route("/api/management/pending/{id}", get(handlers::get_upload))
        .route(
            "/api/management/pending/{id}/approve",
            post(handlers::approve_upload),
        )
        .route(
            "/api/management/pending/{id}/reject",
            post(handlers::reject_upload),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde_json::{json, Value};

    use crate::features::uploads::models::UploadStatus;
    use crate::shared::test_helpers::MemoryUploadRepository;

    fn server() -> (MemoryUploadRepository, TestServer) {
        let repo = MemoryUploadRepository::new();
        let shared = Arc::new(repo.clone());
        let router = routes(
            Arc::new(UploadService::new(shared.clone())),
            Arc::new(ModerationService::new(shared)),
            1024 * 1024,
        );
        (repo, TestServer::new(router).unwrap())
    }

    #[tokio::test]
    async fn test_upload_then_approve_flow() {
        let (repo, server) = server();
        let csv = "Dataset Name,Disease Type,Sample Size\nADNI,AD,1518\n,AD,20\nPPMI,PD,423\n";

        let response = server
            .post("/api/upload")
            .json(&json!({
                "file_name": "cohorts.csv",
                "file_content": format!("data:text/csv;base64,{}", STANDARD.encode(csv)),
                "file_type": "csv",
                "uploaded_by": "lab-7"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(true));
        let id = body["data"]["upload_id"].as_i64().unwrap();

        let response = server.get("/api/management/pending").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], json!(1));
        assert_eq!(body["data"][0]["status"], json!("pending"));

        let response = server
            .post(&format!("/api/management/pending/{}/approve", id))
            .json(&json!({"review_notes": "ok", "reviewed_by": "curator"}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["added_count"], json!(2));
        assert_eq!(body["data"]["error_count"], json!(1));
        assert_eq!(
            body["message"],
            json!("Successfully added 2 dataset(s) to the database. 1 row(s) had errors.")
        );

        let upload = repo.upload(id).await.unwrap();
        assert_eq!(upload.status, UploadStatus::Approved);
        assert_eq!(upload.reviewed_by, "curator");

        let response = server
            .post(&format!("/api/management/pending/{}/reject", id))
            .json(&json!({}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(repo.upload(id).await.unwrap().status, UploadStatus::Approved);
    }

    #[tokio::test]
    async fn test_upload_missing_content_is_bad_request() {
        let (repo, server) = server();

        let response = server
            .post("/api/upload")
            .json(&json!({"file_name": "cohorts.csv"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
        assert!(repo.uploads().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_overlong_file_name_is_bad_request() {
        let (repo, server) = server();

        let response = server
            .post("/api/upload")
            .json(&json!({
                "file_name": format!("{}.csv", "x".repeat(300)),
                "file_content": "name\nADNI\n"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(repo.uploads().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_detail_returns_rows() {
        let (_repo, server) = server();

        let response = server
            .post("/api/upload")
            .json(&json!({
                "file_name": "cohorts.csv",
                "file_content": "name,n\nADNI,1518\n"
            }))
            .await;
        let id = response.json::<Value>()["data"]["upload_id"].as_i64().unwrap();

        let response = server.get(&format!("/api/management/pending/{}", id)).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["file_name"], json!("cohorts.csv"));
        assert_eq!(body["data"]["file_type"], json!("csv"));
        assert_eq!(body["data"]["file_content"], json!([{"name": "ADNI", "n": "1518"}]));

        server
            .get("/api/management/pending/999")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_status_filter_is_bad_request() {
        let (_repo, server) = server();

        let response = server
            .get("/api/management/pending")
            .add_query_param("status", "archived")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
