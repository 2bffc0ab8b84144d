//! Error types for rfq-store.

use rfq_core::{PdfError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("solicitation not found: {0}")]
    NotFound(String),

    #[error("no extracted data for solicitation {0}")]
    NoExtractedData(String),

    #[error("file missing on server: {0}")]
    FileMissing(String),

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
