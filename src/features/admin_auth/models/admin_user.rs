use sqlx::FromRow;

/// Database model for admin user
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    /// Argon2id PHC string
    pub password_hash: String,
}

impl AdminUser {
    pub const COLUMNS: &'static str = "id, username, password_hash";
}
