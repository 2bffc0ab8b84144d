//! Uploaded RFQ documents and their lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lifecycle status of a document.
///
/// Variants are ordered by progress; a document's status only ever moves to a
/// later variant.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// File stored, nothing extracted yet.
    #[default]
    Uploaded,
    /// Fields have been extracted.
    Extracted,
    /// At least one price suggestion exists.
    Suggested,
}

impl DocumentStatus {
    /// Status after attempting to move to `next`. Never goes backwards.
    pub fn advance(self, next: DocumentStatus) -> DocumentStatus {
        self.max(next)
    }

    /// Numeric rank used for ordered comparisons in storage.
    pub fn rank(self) -> i64 {
        match self {
            DocumentStatus::Uploaded => 0,
            DocumentStatus::Extracted => 1,
            DocumentStatus::Suggested => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Uploaded => "uploaded",
            DocumentStatus::Extracted => "extracted",
            DocumentStatus::Suggested => "suggested",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uploaded" => Ok(DocumentStatus::Uploaded),
            "extracted" => Ok(DocumentStatus::Extracted),
            "suggested" => Ok(DocumentStatus::Suggested),
            other => Err(ValidationError::Unknown {
                kind: "document status",
                value: other.to_string(),
            }),
        }
    }
}

/// An uploaded RFQ document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Filename as supplied by the uploader.
    pub filename: String,

    /// Where the stored bytes live.
    pub file_path: String,

    /// Lifecycle status.
    pub status: DocumentStatus,

    /// Decoded text, when retained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}
