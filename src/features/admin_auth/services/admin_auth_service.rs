use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::admin_auth::dtos::{AdminLoginDto, AdminLoginResponseDto};
use crate::features::admin_auth::models::AdminUser;
use crate::features::admin_auth::services::password::{hash_password, verify_password};
use crate::shared::validation::USERNAME_REGEX;

/// Service for admin credential checks
pub struct AdminAuthService {
    pool: PgPool,
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

impl AdminAuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Verify credentials and record the login time
    pub async fn login(&self, dto: AdminLoginDto) -> Result<AdminLoginResponseDto> {
        let query = format!(
            "SELECT {} FROM admin_users WHERE username = $1",
            AdminUser::COLUMNS
        );
        let user = sqlx::query_as::<_, AdminUser>(&query)
            .bind(dto.username.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up admin user: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(&dto.password, &user.password_hash) {
            tracing::warn!("Failed login attempt for admin '{}'", user.username);
            return Err(invalid_credentials());
        }

        sqlx::query("UPDATE admin_users SET last_login = NOW() WHERE id = $1")
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to record login for admin {}: {:?}", user.id, e);
                AppError::Database(e)
            })?;

        tracing::info!("Admin '{}' logged in", user.username);

        Ok(AdminLoginResponseDto {
            username: user.username,
        })
    }

    /// Create the admin account if no account with this username exists.
    /// Returns whether an account was created.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool> {
        let username = username.trim();
        if !USERNAME_REGEX.is_match(username) {
            return Err(AppError::Validation(format!(
                "Invalid admin username '{}'",
                username
            )));
        }
        if password.is_empty() {
            return Err(AppError::Validation(
                "Admin password must not be empty".to_string(),
            ));
        }

        let password_hash = hash_password(password)?;

        let result = sqlx::query(
            r#"
            INSERT INTO admin_users (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(&password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create admin user '{}': {:?}", username, e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected() == 1)
    }
}
