use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::PaginationQuery;

/// Response DTO for publication
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicationResponseDto {
    pub id: i64,
    pub title: String,
    pub authors: Option<String>,
    pub journal: Option<String>,
    pub year: Option<i32>,
    pub pmid: Option<String>,
    pub doi: Option<String>,
    pub dataset_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Query params for the paginated publication list
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PublicationQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub per_page: i64,
    /// Case-insensitive substring match on dataset name
    pub dataset_name: Option<String>,
    /// Case-insensitive substring match on title
    pub title_search: Option<String>,
    /// Exact publication year
    pub year: Option<i32>,
}

impl PublicationQueryParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Query params for advanced publication search
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PublicationSearchParams {
    /// Free text matched against title or authors
    pub q: Option<String>,
    pub dataset_name: Option<String>,
    pub journal: Option<String>,
    /// Inclusive lower bound on year
    pub min_year: Option<i32>,
    /// Inclusive upper bound on year
    pub max_year: Option<i32>,
    pub author: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}
