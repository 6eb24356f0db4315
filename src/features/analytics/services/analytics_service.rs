use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::analytics::dtos::*;

/// Modalities offered as filter options, independent of catalog content
const MODALITIES: [&str; 14] = [
    "MRI",
    "fMRI",
    "PET",
    "DTI",
    "ASL",
    "SNP Genotyping",
    "WGS",
    "WES",
    "RNA",
    "Epigenomics",
    "Proteomics",
    "Metabolomics",
    "EHR",
    "Clinical Cognitive Tests",
];

/// The modality vocabulary in byte-wise sorted order
pub fn modality_vocabulary() -> Vec<String> {
    let mut modalities: Vec<String> = MODALITIES.iter().map(|m| m.to_string()).collect();
    modalities.sort();
    modalities
}

/// Service for catalog aggregates
pub struct AnalyticsService {
    pool: PgPool,
}

impl AnalyticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Stats
    // ========================================================================

    pub async fn get_stats(&self) -> Result<StatsDto> {
        let (total_datasets, total_publications): (i64, i64) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM datasets), (SELECT COUNT(*) FROM publications)",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count catalog entries: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(StatsDto {
            total_datasets,
            total_publications,
            disease_distribution: self.disease_distribution().await?,
        })
    }

    async fn disease_distribution(&self) -> Result<Vec<DiseaseCountDto>> {
        sqlx::query_as::<_, DiseaseCountDto>(
            r#"
            SELECT disease_type, COUNT(*) AS count
            FROM datasets
            WHERE disease_type IS NOT NULL
            GROUP BY disease_type
            ORDER BY count DESC, disease_type ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get disease distribution: {:?}", e);
            AppError::Database(e)
        })
    }

    // ========================================================================
    // Filters
    // ========================================================================

    pub async fn get_filters(&self) -> Result<FilterOptionsDto> {
        let mut disease_types: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT disease_type
            FROM datasets
            WHERE disease_type IS NOT NULL AND disease_type <> ''
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get disease types: {:?}", e);
            AppError::Database(e)
        })?;

        // Byte order, independent of the database collation
        disease_types.sort();

        Ok(FilterOptionsDto {
            disease_types,
            modalities: modality_vocabulary(),
        })
    }

    // ========================================================================
    // Overview
    // ========================================================================

    pub async fn get_overview(&self) -> Result<AnalyticsOverviewDto> {
        let overview = sqlx::query_as::<_, OverviewTotalsDto>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM datasets) AS total_datasets,
                (SELECT COUNT(*) FROM publications) AS total_publications,
                COALESCE(AVG(sample_size)::float8, 0) AS avg_sample_size,
                COALESCE(MIN(sample_size), 0) AS min_sample_size,
                COALESCE(MAX(sample_size), 0) AS max_sample_size
            FROM datasets
            WHERE sample_size IS NOT NULL AND sample_size <> 0
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get overview totals: {:?}", e);
            AppError::Database(e)
        })?;

        let publication_years = sqlx::query_as::<_, YearCountDto>(
            r#"
            SELECT year, COUNT(*) AS count
            FROM publications
            WHERE year IS NOT NULL
            GROUP BY year
            ORDER BY year DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get publication years: {:?}", e);
            AppError::Database(e)
        })?;

        let data_accessibility = sqlx::query_as::<_, AccessibilityCountDto>(
            r#"
            SELECT data_accessibility AS accessibility, COUNT(*) AS count
            FROM datasets
            WHERE data_accessibility IS NOT NULL
            GROUP BY data_accessibility
            ORDER BY count DESC, data_accessibility ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get accessibility distribution: {:?}", e);
            AppError::Database(e)
        })?;

        let wgs_availability = sqlx::query_as::<_, WgsCountDto>(
            r#"
            SELECT wgs_available AS availability, COUNT(*) AS count
            FROM datasets
            WHERE wgs_available IS NOT NULL
            GROUP BY wgs_available
            ORDER BY count DESC, wgs_available ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get WGS distribution: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(AnalyticsOverviewDto {
            overview,
            disease_distribution: self.disease_distribution().await?,
            publication_years,
            data_accessibility,
            wgs_availability,
        })
    }
}
