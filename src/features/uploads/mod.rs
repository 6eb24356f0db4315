//! Community file submissions and their moderation.
//!
//! A submitted CSV/XLSX/XLS file is normalized into rows and staged as a
//! pending upload. An admin then either approves it, turning each usable
//! row into a dataset, or rejects it. Either decision is final.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/upload` | Submit a file for review |
//! | GET | `/api/management/pending` | List uploads by status |
//! | GET | `/api/management/pending/{id}` | Upload with decoded rows |
//! | POST | `/api/management/pending/{id}/approve` | Approve into the catalog |
//! | POST | `/api/management/pending/{id}/reject` | Reject |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::{PgUploadRepository, UploadRepository};
pub use services::{ModerationService, UploadService};
