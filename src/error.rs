use std::sync::OnceLock;

use axum::{
    Json,
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::{dto::ErrorResponse, pdf::PdfError};

static DEVELOPMENT_MODE: OnceLock<bool> = OnceLock::new();

/// Enables the `details` field on error responses. Only the first call wins.
pub fn set_development_mode(enabled: bool) {
    let _ = DEVELOPMENT_MODE.set(enabled);
}

fn development_mode() -> bool {
    DEVELOPMENT_MODE.get().copied().unwrap_or(false)
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    UnsupportedMedia(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Pdf(#[from] PdfError),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::UnsupportedMedia(_) | Self::Pdf(PdfError::Unparseable(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Pdf(PdfError::Generation(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client facing message; internals only show up in `details`.
    fn message(&self) -> String {
        match self {
            Self::Pdf(PdfError::Unparseable(_)) => "Invalid PDF file".to_string(),
            Self::Pdf(PdfError::Generation(_)) => "Failed to create PDF".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::Validation("File too large. Maximum size is 10MB.".to_string())
        } else {
            Self::Validation(format!("Invalid multipart body: {}", e.body_text()))
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        Self::Validation(format!("Invalid JSON body: {}", e.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        Self::Validation(format!("Invalid query string: {}", e.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        Self::Validation(format!("Invalid path parameter: {}", e.body_text()))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Internal(format!("background task failed: {e}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::warn!("request rejected: {}", self);
        }

        let body = ErrorResponse {
            success: false,
            message: self.message(),
            timestamp: Utc::now(),
            details: development_mode().then(|| self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}
