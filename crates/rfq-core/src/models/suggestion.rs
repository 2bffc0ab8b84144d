//! Price-band suggestion models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Output of the price-band calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSuggestion {
    /// Lower bound of the suggested price.
    pub price_low: i64,

    /// Upper bound of the suggested price (never below `price_low`).
    pub price_high: i64,

    /// User-facing confidence, always within 60..=95.
    pub confidence_percent: i64,

    /// Human-readable reasons, in a fixed order.
    pub rationale: Vec<String>,

    /// Cost before margin and spread, rounded.
    pub base_cost: i64,

    /// Markup applied to the base cost, rounded to two decimals.
    pub margin_factor: f64,
}

/// A persisted suggestion. Suggestions are append-only; the newest one is
/// the one shown for a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRecord {
    pub id: i64,

    pub solicitation_id: String,

    #[serde(flatten)]
    pub suggestion: PriceSuggestion,

    pub created_at: DateTime<Utc>,
}
