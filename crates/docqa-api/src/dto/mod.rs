mod request;
mod response;

pub use request::AskRequest;
pub use response::{
    AskResponse, DocumentListResponse, DocumentSummary, HealthResponse, UploadResponse,
    UploadedDocument,
};
