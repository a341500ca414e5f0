use super::types::ErrorResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

const MIB: u64 = 1024 * 1024;

/// Request-level failures and the status code each one maps to.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    MethodNotAllowed,
    MalformedRequest,
    MissingFile,
    UnsupportedFormat {
        extension: String,
        allowed: Vec<String>,
    },
    FileTooLarge {
        limit: u64,
    },
    TranscriptionFailed,
    MissingJobId,
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MalformedRequest
            | Self::MissingFile
            | Self::UnsupportedFormat { .. }
            | Self::FileTooLarge { .. }
            | Self::MissingJobId => StatusCode::BAD_REQUEST,
            Self::TranscriptionFailed => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::MethodNotAllowed => "Method not allowed".to_string(),
            Self::MalformedRequest => "Failed to parse form data".to_string(),
            Self::MissingFile => "No audio file provided".to_string(),
            Self::UnsupportedFormat { extension, allowed } => {
                let allowed: Vec<String> = allowed.iter().map(|f| format!(".{}", f)).collect();
                let extension = if extension.is_empty() {
                    "(none)".to_string()
                } else {
                    format!(".{}", extension)
                };
                format!(
                    "Unsupported audio format: {}. Allowed formats: {}",
                    extension,
                    allowed.join(", ")
                )
            }
            Self::FileTooLarge { limit } => format!(
                "File size exceeds maximum of {} MB ({} bytes)",
                limit / MIB,
                limit
            ),
            Self::TranscriptionFailed => "Transcription failed".to_string(),
            Self::MissingJobId => "Job ID required".to_string(),
            Self::NotFound => "Not found".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message(),
        });
        (self.status(), body).into_response()
    }
}
