use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidFormat(String),

    #[error("{0}")]
    FileTooLarge(String),

    #[error("{0}")]
    InvalidText(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Upstream server URL not configured. Please set COLAB_URL in .env")]
    NotConfigured,

    #[error("Cannot connect to upstream server. Please check if it's running and the URL is correct.")]
    UpstreamUnreachable,

    #[error("Request timed out. The upstream server took too long to respond.")]
    UpstreamTimeout,

    #[error("Upstream server error: {detail}")]
    Upstream { status: StatusCode, detail: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure: human readable detail plus a stable code
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidFormat(_)
            | Self::FileTooLarge(_)
            | Self::InvalidText(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured | Self::UpstreamUnreachable => StatusCode::SERVICE_UNAVAILABLE,
            Self::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine readable code rendered next to the detail
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat(_) => "INVALID_FORMAT",
            Self::FileTooLarge(_) => "FILE_TOO_LARGE",
            Self::InvalidText(_) => "INVALID_TEXT",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotConfigured => "NOT_CONFIGURED",
            Self::UpstreamUnreachable => "UPSTREAM_UNREACHABLE",
            Self::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            detail: self.to_string(),
            code: self.code().to_string(),
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(
            error = %self,
            code = self.code(),
            status = %status.as_u16(),
            "Request failed"
        );

        (status, Json(self.to_response())).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
