//! Research dataset catalog (read side).
//!
//! Datasets are created by approving a pending upload (see `uploads`) or by
//! direct admin entry; this feature only lists, searches and exports them.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/datasets` | Paginated list with filters |
//! | GET | `/api/datasets/search` | Advanced search |
//! | GET | `/api/datasets/export` | CSV export |
//! | GET | `/api/datasets/recent` | Newest datasets |
//! | GET | `/api/datasets/{id}` | Dataset detail |
//! | GET | `/api/datasets/{id}/publications` | Publications citing the dataset |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::DatasetService;
