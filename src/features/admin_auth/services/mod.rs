pub mod admin_auth_service;
pub mod password;

pub use admin_auth_service::AdminAuthService;
