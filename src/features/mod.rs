pub mod admin_auth;
pub mod analytics;
pub mod datasets;
pub mod publications;
pub mod uploads;
