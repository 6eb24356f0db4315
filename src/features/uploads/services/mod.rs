pub mod column_matching;
pub mod moderation_service;
pub mod normalizer;
pub mod upload_service;

pub use moderation_service::ModerationService;
pub use upload_service::UploadService;
