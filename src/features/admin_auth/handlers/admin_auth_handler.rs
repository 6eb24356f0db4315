use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::admin_auth::dtos::{AdminLoginDto, AdminLoginResponseDto, AuthStatusDto};
use crate::features::admin_auth::services::AdminAuthService;
use crate::shared::types::ApiResponse;

/// Admin login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = AdminLoginDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AdminLoginResponseDto>),
        (status = 400, description = "Username and password required"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AdminAuthService>>,
    AppJson(dto): AppJson<AdminLoginDto>,
) -> Result<Json<ApiResponse<AdminLoginResponseDto>>> {
    dto.validate()
        .map_err(|_| AppError::Validation("Username and password required".to_string()))?;

    let user = service.login(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(user),
        Some("Login successful".to_string()),
        None,
    )))
}

/// Admin logout
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out")
    ),
    tag = "auth"
)]
pub async fn logout() -> Json<ApiResponse<()>> {
    Json(ApiResponse::success(
        None,
        Some("Logged out successfully".to_string()),
        None,
    ))
}

/// Report whether the caller holds an admin session
#[utoipa::path(
    get,
    path = "/api/auth/check",
    responses(
        (status = 200, description = "Authentication status", body = ApiResponse<AuthStatusDto>)
    ),
    tag = "auth"
)]
pub async fn check_auth() -> Json<ApiResponse<AuthStatusDto>> {
    Json(ApiResponse::success(
        Some(AuthStatusDto {
            authenticated: false,
        }),
        None,
        None,
    ))
}
