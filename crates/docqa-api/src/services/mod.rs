mod documents;
mod qa;

pub use documents::{DocumentService, UploadedFile};
pub use qa::QaService;
