//! Error types for the RFQ API

use axum::{
    extract::multipart::MultipartError,
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rfq_store::StoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File missing on server")]
    FileMissing,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            StoreError::FileMissing(_) => ApiError::FileMissing,
            StoreError::NoExtractedData(_) => {
                ApiError::InvalidRequest("No extracted data".to_string())
            }
            StoreError::Validation(e) => ApiError::InvalidRequest(e.to_string()),
            StoreError::Pdf(e) => ApiError::UnreadableDocument(e.to_string()),
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::InvalidRequest(err.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Solicitation not found: {}", id))
            }
            ApiError::FileMissing => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::UnreadableDocument(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Could not read document: {}", msg),
            ),
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfq_core::{PdfError, ValidationError};

    fn status_of(err: StoreError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_store_errors_map_to_status_codes() {
        assert_eq!(status_of(StoreError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(StoreError::FileMissing("/x".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(StoreError::NoExtractedData("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(StoreError::Validation(ValidationError::Required("filename"))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(StoreError::Pdf(PdfError::NoPages)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(StoreError::Corrupt("bad row".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
