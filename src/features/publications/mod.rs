//! Research publications, linked to datasets by name.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/publications` | Paginated list with filters |
//! | GET | `/api/publications/search` | Advanced search |
//! | GET | `/api/publications/export` | CSV export |
//! | GET | `/api/publications/recent` | Newest publications |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::PublicationService;
