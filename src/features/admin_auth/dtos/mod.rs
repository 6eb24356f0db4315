pub mod admin_auth_dto;

pub use admin_auth_dto::*;
