use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::publications::dtos::PublicationResponseDto;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, DEFAULT_RECENT_LIMIT, MAX_PAGE_SIZE};
use crate::shared::types::PaginationQuery;

/// Response DTO for dataset
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatasetResponseDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub disease_type: Option<String>,
    pub sample_size: Option<i32>,
    pub data_accessibility: Option<String>,
    pub wgs_available: Option<String>,
    pub imaging_types: Option<String>,
    pub modalities: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query params for the paginated dataset list
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DatasetQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub per_page: i64,
    /// Case-insensitive substring match on disease type
    pub disease_type: Option<String>,
    /// Case-insensitive substring match on modalities
    pub modality: Option<String>,
    /// Case-insensitive substring match on name
    pub search: Option<String>,
}

impl DatasetQueryParams {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Query params for advanced dataset search
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DatasetSearchParams {
    /// Free text matched against name or description
    pub q: Option<String>,
    pub disease_type: Option<String>,
    pub modality: Option<String>,
    /// Inclusive lower bound on sample size
    pub min_sample_size: Option<i32>,
    /// Inclusive upper bound on sample size
    pub max_sample_size: Option<i32>,
    pub data_accessibility: Option<String>,
    pub wgs_available: Option<String>,
}

/// Query params for "recent" endpoints
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RecentQueryParams {
    /// Number of items to return (default: 5, max: 100)
    #[serde(default = "default_recent_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,
}

impl RecentQueryParams {
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for RecentQueryParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

/// Short dataset reference used when listing its publications
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatasetSummaryDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Dataset with the publications that reference it by name
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatasetPublicationsDto {
    pub dataset: DatasetSummaryDto,
    pub publications: Vec<PublicationResponseDto>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_recent_limit() -> i64 {
    DEFAULT_RECENT_LIMIT
}
