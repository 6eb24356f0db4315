pub mod admin_auth_handler;

pub use admin_auth_handler::*;
