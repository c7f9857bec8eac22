use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docqa_core::error::DocqaError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Upload failures always surface as a 500 with the cause in `details`
    pub fn processing_failed(err: DocqaError) -> Self {
        Self::internal("Document processing failed").with_details(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, details = ?self.details, "Request failed");
        }

        let body = ErrorBody {
            success: false,
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<DocqaError> for ApiError {
    fn from(err: DocqaError) -> Self {
        match &err {
            DocqaError::DocumentNotFound { .. } | DocqaError::NoRelevantData => {
                Self::not_found(err.to_string())
            }
            DocqaError::InvalidRequest(message) => Self::bad_request(message.clone()),
            DocqaError::UnsupportedMediaType { .. } => Self::bad_request(err.to_string()),
            _ => Self::internal(err.to_string()),
        }
    }
}
