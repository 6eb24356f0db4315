use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::publications::dtos::{
    PublicationQueryParams, PublicationResponseDto, PublicationSearchParams,
};
use crate::features::publications::models::Publication;
use crate::shared::query::contains_filter;

const PUBLICATION_ORDER: &str = "ORDER BY year DESC NULLS LAST, created_at DESC, id DESC";

/// Service for publication catalog queries
pub struct PublicationService {
    pool: PgPool,
}

impl PublicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List publications with optional filters
    /// Returns (publications, total_count)
    pub async fn list(
        &self,
        params: &PublicationQueryParams,
    ) -> Result<(Vec<PublicationResponseDto>, i64)> {
        let pagination = params.pagination();
        let dataset_name = contains_filter(&params.dataset_name);
        let title = contains_filter(&params.title_search);

        let filter = r#"
            WHERE ($1::text IS NULL OR dataset_name ILIKE $1)
              AND ($2::text IS NULL OR title ILIKE $2)
              AND ($3::int IS NULL OR year = $3)
        "#;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM publications {}", filter))
                .bind(&dataset_name)
                .bind(&title)
                .bind(params.year)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count publications: {:?}", e);
                    AppError::Database(e)
                })?;

        let query = format!(
            "SELECT {} FROM publications {} {} LIMIT $4 OFFSET $5",
            Publication::COLUMNS,
            filter,
            PUBLICATION_ORDER
        );
        let publications: Vec<Publication> = sqlx::query_as(&query)
            .bind(&dataset_name)
            .bind(&title)
            .bind(params.year)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list publications: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((publications.into_iter().map(Into::into).collect(), total))
    }

    /// Advanced search (unpaginated)
    pub async fn search(
        &self,
        params: &PublicationSearchParams,
    ) -> Result<Vec<PublicationResponseDto>> {
        let query = format!(
            r#"
            SELECT {}
            FROM publications
            WHERE ($1::text IS NULL OR title ILIKE $1 OR authors ILIKE $1)
              AND ($2::text IS NULL OR dataset_name ILIKE $2)
              AND ($3::text IS NULL OR journal ILIKE $3)
              AND ($4::int IS NULL OR year >= $4)
              AND ($5::int IS NULL OR year <= $5)
              AND ($6::text IS NULL OR authors ILIKE $6)
            {}
            "#,
            Publication::COLUMNS,
            PUBLICATION_ORDER
        );

        let publications: Vec<Publication> = sqlx::query_as(&query)
            .bind(contains_filter(&params.q))
            .bind(contains_filter(&params.dataset_name))
            .bind(contains_filter(&params.journal))
            .bind(params.min_year)
            .bind(params.max_year)
            .bind(contains_filter(&params.author))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to search publications: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(publications.into_iter().map(Into::into).collect())
    }

    /// Most recently added publications
    pub async fn recent(&self, limit: i64) -> Result<Vec<PublicationResponseDto>> {
        let query = format!(
            "SELECT {} FROM publications ORDER BY created_at DESC, id DESC LIMIT $1",
            Publication::COLUMNS
        );
        let publications: Vec<Publication> = sqlx::query_as(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch recent publications: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(publications.into_iter().map(Into::into).collect())
    }

    /// All publications for CSV export
    pub async fn export_csv(&self) -> Result<Vec<u8>> {
        let query = format!(
            "SELECT {} FROM publications {}",
            Publication::COLUMNS,
            PUBLICATION_ORDER
        );
        let publications: Vec<Publication> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to export publications: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Exporting {} publications as CSV", publications.len());
        write_publications_csv(&publications)
    }
}

/// Render publications in the export column layout
pub fn write_publications_csv(publications: &[Publication]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let to_internal = |e: csv::Error| AppError::Internal(format!("CSV export failed: {}", e));

    writer
        .write_record([
            "ID",
            "Title",
            "Authors",
            "Journal",
            "Year",
            "PMID",
            "DOI",
            "Dataset Name",
            "Created At",
        ])
        .map_err(to_internal)?;

    for p in publications {
        writer
            .write_record([
                p.id.to_string(),
                p.title.clone(),
                p.authors.clone().unwrap_or_default(),
                p.journal.clone().unwrap_or_default(),
                p.year.map(|y| y.to_string()).unwrap_or_default(),
                p.pmid.clone().unwrap_or_default(),
                p.doi.clone().unwrap_or_default(),
                p.dataset_name.clone().unwrap_or_default(),
                p.created_at.to_rfc3339(),
            ])
            .map_err(to_internal)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_write_publications_csv() {
        let publication = Publication {
            id: 3,
            title: "Amyloid PET in \"early\" AD".to_string(),
            authors: Some("Smith J; Doe A".to_string()),
            journal: Some("Neurology".to_string()),
            year: None,
            pmid: Some("123456".to_string()),
            doi: None,
            dataset_name: Some("ADNI".to_string()),
            created_at: Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap(),
        };

        let text = String::from_utf8(write_publications_csv(&[publication]).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "ID,Title,Authors,Journal,Year,PMID,DOI,Dataset Name,Created At"
        );
        assert_eq!(
            lines[1],
            "3,\"Amyloid PET in \"\"early\"\" AD\",Smith J; Doe A,Neurology,,123456,,ADNI,2023-01-02T03:04:05+00:00"
        );
    }
}
