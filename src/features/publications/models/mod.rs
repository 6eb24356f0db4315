mod publication;

pub use publication::Publication;
