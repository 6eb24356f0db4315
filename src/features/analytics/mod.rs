//! Read-only catalog aggregates: summary stats, filter vocabularies and the
//! analytics overview.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::AnalyticsService;
