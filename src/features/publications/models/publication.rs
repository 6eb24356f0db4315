use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::publications::dtos::PublicationResponseDto;

/// Database model for publication
///
/// `dataset_name` is a soft reference: it is compared against `datasets.name`
/// by string equality and may name a dataset that does not exist.
#[derive(Debug, Clone, FromRow)]
pub struct Publication {
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

impl Publication {
    pub const COLUMNS: &'static str =
        "id, title, authors, journal, year, pmid, doi, dataset_name, created_at";
}

impl From<Publication> for PublicationResponseDto {
    fn from(p: Publication) -> Self {
        Self {
            id: p.id,
            title: p.title,
            authors: p.authors,
            journal: p.journal,
            year: p.year,
            pmid: p.pmid,
            doi: p.doi,
            dataset_name: p.dataset_name,
            created_at: p.created_at,
        }
    }
}
