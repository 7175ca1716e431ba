use crate::error::AppError;
use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum VoiceCloneError {
    #[error("invalid file format")]
    InvalidFormat,
    #[error("file too large (max {max_bytes} bytes)")]
    FileTooLarge { max_bytes: usize },
    #[error("invalid text: {0}")]
    InvalidText(String),
    #[error("upstream not configured")]
    NotConfigured,
    #[error("upstream unreachable: {0}")]
    Unreachable(String),
    #[error("upstream timed out")]
    Timeout,
    #[error("upstream returned {status}: {detail}")]
    Upstream { status: u16, detail: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<VoiceCloneError> for AppError {
    fn from(err: VoiceCloneError) -> Self {
        match err {
            VoiceCloneError::InvalidFormat => AppError::InvalidFormat(format!(
                "Invalid file format. Allowed: {}",
                super::validation::ALLOWED_EXTENSIONS.join(", ")
            )),
            VoiceCloneError::FileTooLarge { max_bytes } => AppError::FileTooLarge(format!(
                "File too large. Maximum size: {}MB",
                max_bytes / (1024 * 1024)
            )),
            VoiceCloneError::InvalidText(msg) => AppError::InvalidText(msg),
            VoiceCloneError::NotConfigured => AppError::NotConfigured,
            VoiceCloneError::Unreachable(_) => AppError::UpstreamUnreachable,
            VoiceCloneError::Timeout => AppError::UpstreamTimeout,
            VoiceCloneError::Upstream { status, detail } => AppError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                detail,
            },
            VoiceCloneError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
