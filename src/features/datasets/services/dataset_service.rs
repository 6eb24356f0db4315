use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::datasets::dtos::{
    DatasetPublicationsDto, DatasetQueryParams, DatasetResponseDto, DatasetSearchParams,
    DatasetSummaryDto,
};
use crate::features::datasets::models::Dataset;
use crate::features::publications::models::Publication;
use crate::shared::query::contains_filter;

/// Service for dataset catalog queries
pub struct DatasetService {
    pool: PgPool,
}

impl DatasetService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List datasets with optional filters, newest first
    /// Returns (datasets, total_count)
    pub async fn list(&self, params: &DatasetQueryParams) -> Result<(Vec<DatasetResponseDto>, i64)> {
        let pagination = params.pagination();
        let disease_type = contains_filter(&params.disease_type);
        let modality = contains_filter(&params.modality);
        let search = contains_filter(&params.search);

        let filter = r#"
            WHERE ($1::text IS NULL OR disease_type ILIKE $1)
              AND ($2::text IS NULL OR modalities ILIKE $2)
              AND ($3::text IS NULL OR name ILIKE $3)
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM datasets {}", filter))
            .bind(&disease_type)
            .bind(&modality)
            .bind(&search)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count datasets: {:?}", e);
                AppError::Database(e)
            })?;

        let query = format!(
            "SELECT {} FROM datasets {} ORDER BY created_at DESC, id DESC LIMIT $4 OFFSET $5",
            Dataset::COLUMNS,
            filter
        );
        let datasets: Vec<Dataset> = sqlx::query_as(&query)
            .bind(&disease_type)
            .bind(&modality)
            .bind(&search)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list datasets: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((datasets.into_iter().map(Into::into).collect(), total))
    }

    /// Get dataset by ID
    pub async fn get_by_id(&self, id: i64) -> Result<DatasetResponseDto> {
        self.find(id).await.map(Into::into)
    }

    async fn find(&self, id: i64) -> Result<Dataset> {
        let query = format!("SELECT {} FROM datasets WHERE id = $1", Dataset::COLUMNS);
        sqlx::query_as::<_, Dataset>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get dataset {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("Dataset not found".to_string()))
    }

    /// Advanced search across text and numeric fields (unpaginated)
    pub async fn search(&self, params: &DatasetSearchParams) -> Result<Vec<DatasetResponseDto>> {
        let query = format!(
            r#"
            SELECT {}
            FROM datasets
            WHERE ($1::text IS NULL OR name ILIKE $1 OR description ILIKE $1)
              AND ($2::text IS NULL OR disease_type ILIKE $2)
              AND ($3::text IS NULL OR modalities ILIKE $3)
              AND ($4::int IS NULL OR sample_size >= $4)
              AND ($5::int IS NULL OR sample_size <= $5)
              AND ($6::text IS NULL OR data_accessibility ILIKE $6)
              AND ($7::text IS NULL OR wgs_available ILIKE $7)
            ORDER BY created_at DESC, id DESC
            "#,
            Dataset::COLUMNS
        );

        let datasets: Vec<Dataset> = sqlx::query_as(&query)
            .bind(contains_filter(&params.q))
            .bind(contains_filter(&params.disease_type))
            .bind(contains_filter(&params.modality))
            .bind(params.min_sample_size)
            .bind(params.max_sample_size)
            .bind(contains_filter(&params.data_accessibility))
            .bind(contains_filter(&params.wgs_available))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to search datasets: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(datasets.into_iter().map(Into::into).collect())
    }

    /// Most recently created datasets
    pub async fn recent(&self, limit: i64) -> Result<Vec<DatasetResponseDto>> {
        let query = format!(
            "SELECT {} FROM datasets ORDER BY created_at DESC, id DESC LIMIT $1",
            Dataset::COLUMNS
        );
        let datasets: Vec<Dataset> = sqlx::query_as(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch recent datasets: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(datasets.into_iter().map(Into::into).collect())
    }

    /// All datasets for CSV export
    pub async fn export_csv(&self) -> Result<Vec<u8>> {
        let query = format!(
            "SELECT {} FROM datasets ORDER BY created_at DESC, id DESC",
            Dataset::COLUMNS
        );
        let datasets: Vec<Dataset> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to export datasets: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Exporting {} datasets as CSV", datasets.len());
        write_datasets_csv(&datasets)
    }

    /// Publications whose `dataset_name` equals the dataset's name
    pub async fn publications(&self, id: i64) -> Result<DatasetPublicationsDto> {
        let dataset = self.find(id).await?;

        let query = format!(
            "SELECT {} FROM publications WHERE dataset_name = $1 \
             ORDER BY year DESC NULLS LAST, created_at DESC",
            Publication::COLUMNS
        );
        let publications: Vec<Publication> = sqlx::query_as(&query)
            .bind(&dataset.name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch publications for dataset {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(DatasetPublicationsDto {
            dataset: DatasetSummaryDto {
                id: dataset.id,
                name: dataset.name,
                description: dataset.description,
            },
            publications: publications.into_iter().map(Into::into).collect(),
        })
    }
}

/// Render datasets in the export column layout
pub fn write_datasets_csv(datasets: &[Dataset]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let to_internal = |e: csv::Error| AppError::Internal(format!("CSV export failed: {}", e));

    writer
        .write_record([
            "ID",
            "Name",
            "Description",
            "Disease Type",
            "Sample Size",
            "Data Accessibility",
            "WGS Available",
            "Imaging Types",
            "Modalities",
            "Created At",
        ])
        .map_err(to_internal)?;

    for d in datasets {
        writer
            .write_record([
                d.id.to_string(),
                d.name.clone(),
                d.description.clone().unwrap_or_default(),
                d.disease_type.clone().unwrap_or_default(),
                d.sample_size.map(|s| s.to_string()).unwrap_or_default(),
                d.data_accessibility.clone().unwrap_or_default(),
                d.wgs_available.clone().unwrap_or_default(),
                d.imaging_types.clone().unwrap_or_default(),
                d.modalities.clone().unwrap_or_default(),
                d.created_at.to_rfc3339(),
            ])
            .map_err(to_internal)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))
}
