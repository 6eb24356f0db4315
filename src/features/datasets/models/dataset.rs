use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::datasets::dtos::DatasetResponseDto;

/// Database model for dataset
#[derive(Debug, Clone, FromRow)]
pub struct Dataset {
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

/// Data for inserting a dataset resolved from an approved upload row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDataset {
    pub name: String,
    pub description: String,
    pub disease_type: String,
    pub sample_size: i32,
    pub data_accessibility: String,
    pub wgs_available: String,
    pub imaging_types: String,
    pub modalities: String,
}

impl Dataset {
    /// Column list matching the field order of [`Dataset`]
    pub const COLUMNS: &'static str = "id, name, description, disease_type, sample_size, \
        data_accessibility, wgs_available, imaging_types, modalities, created_at, updated_at";
}

impl From<Dataset> for DatasetResponseDto {
    fn from(d: Dataset) -> Self {
        Self {
            id: d.id,
            name: d.name,
            description: d.description,
            disease_type: d.disease_type,
            sample_size: d.sample_size,
            data_accessibility: d.data_accessibility,
            wgs_available: d.wgs_available,
            imaging_types: d.imaging_types,
            modalities: d.modalities,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}
