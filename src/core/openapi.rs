use utoipa::{Modify, OpenApi};

use crate::features::admin_auth::{dtos as admin_auth_dtos, handlers as admin_auth_handlers};
use crate::features::analytics::{dtos as analytics_dtos, handlers as analytics_handlers};
use crate::features::datasets::{dtos as datasets_dtos, handlers as datasets_handlers};
use crate::features::publications::{dtos as publications_dtos, handlers as publications_handlers};
use crate::features::uploads::{
    dtos as uploads_dtos, handlers as uploads_handlers, models as uploads_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Uploads
        uploads_handlers::upload_file,
        // Moderation
        uploads_handlers::list_uploads,
        uploads_handlers::get_upload,
        uploads_handlers::approve_upload,
        uploads_handlers::reject_upload,
        // Datasets
        datasets_handlers::list_datasets,
        datasets_handlers::get_dataset,
        datasets_handlers::search_datasets,
        datasets_handlers::recent_datasets,
        datasets_handlers::export_datasets,
        datasets_handlers::get_dataset_publications,
        // Publications
        publications_handlers::list_publications,
        publications_handlers::search_publications,
        publications_handlers::recent_publications,
        publications_handlers::export_publications,
        // Analytics
        analytics_handlers::get_stats,
        analytics_handlers::get_filters,
        analytics_handlers::get_overview,
        // Auth
        admin_auth_handlers::login,
        admin_auth_handlers::logout,
        admin_auth_handlers::check_auth,
    ),
    components(
        schemas(
            Meta,
            // Uploads
            uploads_models::UploadStatus,
            uploads_models::FileType,
            uploads_dtos::UploadFileDto,
            uploads_dtos::UploadCreatedDto,
            uploads_dtos::PendingUploadDto,
            uploads_dtos::PendingUploadDetailDto,
            uploads_dtos::ReviewUploadDto,
            uploads_dtos::ApprovalResultDto,
            ApiResponse<uploads_dtos::UploadCreatedDto>,
            ApiResponse<Vec<uploads_dtos::PendingUploadDto>>,
            ApiResponse<uploads_dtos::PendingUploadDto>,
            ApiResponse<uploads_dtos::PendingUploadDetailDto>,
            ApiResponse<uploads_dtos::ApprovalResultDto>,
            // Datasets
            datasets_dtos::DatasetResponseDto,
            datasets_dtos::DatasetSummaryDto,
            datasets_dtos::DatasetPublicationsDto,
            ApiResponse<Vec<datasets_dtos::DatasetResponseDto>>,
            ApiResponse<datasets_dtos::DatasetResponseDto>,
            ApiResponse<datasets_dtos::DatasetPublicationsDto>,
            // Publications
            publications_dtos::PublicationResponseDto,
            ApiResponse<Vec<publications_dtos::PublicationResponseDto>>,
            // Analytics
            analytics_dtos::DiseaseCountDto,
            analytics_dtos::StatsDto,
            analytics_dtos::FilterOptionsDto,
            analytics_dtos::OverviewTotalsDto,
            analytics_dtos::YearCountDto,
            analytics_dtos::AccessibilityCountDto,
            analytics_dtos::WgsCountDto,
            analytics_dtos::AnalyticsOverviewDto,
            ApiResponse<analytics_dtos::StatsDto>,
            ApiResponse<analytics_dtos::FilterOptionsDto>,
            ApiResponse<analytics_dtos::AnalyticsOverviewDto>,
            // Auth
            admin_auth_dtos::AdminLoginDto,
            admin_auth_dtos::AdminLoginResponseDto,
            admin_auth_dtos::AuthStatusDto,
            ApiResponse<admin_auth_dtos::AdminLoginResponseDto>,
            ApiResponse<admin_auth_dtos::AuthStatusDto>,
        )
    ),
    tags(
        (name = "uploads", description = "File submission for moderation"),
        (name = "moderation", description = "Review of staged uploads"),
        (name = "datasets", description = "Research dataset catalog"),
        (name = "publications", description = "Publications linked to datasets"),
        (name = "analytics", description = "Catalog statistics and filter options"),
        (name = "auth", description = "Admin authentication"),
    ),
    info(
        title = "Research Catalog API",
        version = "0.1.0",
        description = "API documentation for the research dataset catalog",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
