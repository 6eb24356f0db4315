mod pending_upload;

pub use pending_upload::*;
