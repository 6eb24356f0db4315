use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// ============================================================================
// Stats
// ============================================================================

/// Dataset count for one disease type
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DiseaseCountDto {
    pub disease_type: String,
    pub count: i64,
}

/// Summary statistics for the catalog landing page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatsDto {
    pub total_datasets: i64,
    pub total_publications: i64,
    pub disease_distribution: Vec<DiseaseCountDto>,
}

// ============================================================================
// Filters
// ============================================================================

/// Values offered by the catalog filter controls
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FilterOptionsDto {
    /// Distinct non-empty disease types, sorted
    pub disease_types: Vec<String>,
    /// Fixed modality vocabulary, sorted
    pub modalities: Vec<String>,
}

// ============================================================================
// Overview
// ============================================================================

/// Headline numbers of the analytics overview
///
/// Sample size figures ignore datasets with a missing or zero sample size
/// and are all 0 when no dataset has one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OverviewTotalsDto {
    pub total_datasets: i64,
    pub total_publications: i64,
    pub avg_sample_size: f64,
    pub min_sample_size: i32,
    pub max_sample_size: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct YearCountDto {
    pub year: i32,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AccessibilityCountDto {
    pub accessibility: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WgsCountDto {
    pub availability: String,
    pub count: i64,
}

/// Full analytics overview
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsOverviewDto {
    pub overview: OverviewTotalsDto,
    pub disease_distribution: Vec<DiseaseCountDto>,
    /// Publications per year, newest year first
    pub publication_years: Vec<YearCountDto>,
    pub data_accessibility: Vec<AccessibilityCountDto>,
    pub wgs_availability: Vec<WgsCountDto>,
}
