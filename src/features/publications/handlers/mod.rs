pub mod publication_handler;

pub use publication_handler::*;
