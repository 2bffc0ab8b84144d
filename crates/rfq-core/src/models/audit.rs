//! Audit trail entries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// State-changing action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Extracted,
    Suggested,
    Edited,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Extracted => "extracted",
            AuditAction::Suggested => "suggested",
            AuditAction::Edited => "edited",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extracted" => Ok(AuditAction::Extracted),
            "suggested" => Ok(AuditAction::Suggested),
            "edited" => Ok(AuditAction::Edited),
            other => Err(ValidationError::Unknown {
                kind: "audit action",
                value: other.to_string(),
            }),
        }
    }
}

/// One immutable audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: i64,

    /// Document the action was applied to.
    pub solicitation_id: String,

    pub action: AuditAction,

    /// JSON payload describing the action.
    pub details: serde_json::Value,

    pub created_at: DateTime<Utc>,
}
