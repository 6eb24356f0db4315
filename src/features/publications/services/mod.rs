pub mod publication_service;

pub use publication_service::PublicationService;
