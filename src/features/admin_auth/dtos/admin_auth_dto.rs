use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::validate_not_blank;

/// Request DTO for admin login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdminLoginDto {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "Username and password required"))]
    pub username: String,

    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "Username and password required"))]
    pub password: String,
}

/// Response DTO for a successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminLoginResponseDto {
    pub username: String,
}

/// Response DTO for the auth check
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthStatusDto {
    pub authenticated: bool,
}
