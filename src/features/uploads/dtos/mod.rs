pub mod moderation_dto;
pub mod upload_dto;

pub use moderation_dto::*;
pub use upload_dto::*;
