//! Admin credential check for the moderation console.
//!
//! Sessions are not issued: login verifies the password and records
//! `last_login`, logout is a no-op and the auth check always reports an
//! anonymous caller.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AdminAuthService;
