//! Heuristic price-band calculation.
//!
//! The band is built from a fixed base unit cost scaled by complexity and
//! urgency, multiplied by quantity, marked up by a margin that grows as
//! extraction confidence falls, and finally spread into low and high bounds.

use serde::{Deserialize, Serialize};

use crate::extraction::rules::COMPLEXITY_KEYWORDS;
use crate::models::fields::ExtractedFields;
use crate::models::suggestion::PriceSuggestion;

/// Base cost of one unit before any factors.
pub const BASE_UNIT_COST: f64 = 50.0;

/// Multiplier when the description mentions complex work.
pub const COMPLEXITY_FACTOR: f64 = 1.4;

/// Multiplier for tight delivery.
pub const URGENCY_FACTOR: f64 = 1.2;

/// Delivery windows shorter than this many days count as tight.
pub const URGENT_DELIVERY_DAYS: u32 = 15;

const MARGIN_BASE: f64 = 0.15;
const MARGIN_UNCERTAINTY: f64 = 0.25;
const SPREAD_BASE: f64 = 0.10;
const SPREAD_UNCERTAINTY: f64 = 0.20;
const CONFIDENCE_PERCENT_FLOOR: f64 = 60.0;
const CONFIDENCE_PERCENT_RANGE: f64 = 35.0;

/// Typed input to the calculator.
///
/// Built once from loosely populated data; missing quantity defaults to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingInput {
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    #[serde(default)]
    pub delivery_days: Option<u32>,

    #[serde(default)]
    pub description: Option<String>,

    pub confidence_score: f64,
}

fn default_quantity() -> u32 {
    1
}

impl Default for PricingInput {
    fn default() -> Self {
        Self {
            quantity: default_quantity(),
            delivery_days: None,
            description: None,
            confidence_score: 0.0,
        }
    }
}

impl From<&ExtractedFields> for PricingInput {
    fn from(fields: &ExtractedFields) -> Self {
        Self {
            quantity: fields.quantity.unwrap_or_else(default_quantity),
            delivery_days: fields.delivery_days,
            description: fields.description.clone(),
            confidence_score: fields.confidence_score,
        }
    }
}

/// Intermediate values of one calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub complexity_factor: f64,
    pub urgency_factor: f64,
    pub base_unit_cost: f64,
    pub effective_quantity: u32,
    pub base_cost: f64,
    pub confidence: f64,
    pub margin_factor: f64,
    pub spread: f64,
}

impl PriceBreakdown {
    /// Compute the factors for `input`.
    pub fn compute(input: &PricingInput) -> Self {
        let complexity_factor = match &input.description {
            Some(description) if COMPLEXITY_KEYWORDS.is_match(description) => COMPLEXITY_FACTOR,
            _ => 1.0,
        };
        let urgency_factor = match input.delivery_days {
            Some(days) if days < URGENT_DELIVERY_DAYS => URGENCY_FACTOR,
            _ => 1.0,
        };

        let base_unit_cost = BASE_UNIT_COST * complexity_factor * urgency_factor;
        let effective_quantity = input.quantity.max(1);
        let base_cost = base_unit_cost * f64::from(effective_quantity);

        // NaN maps to 0 so the result stays defined
        let confidence = if input.confidence_score.is_nan() {
            0.0
        } else {
            input.confidence_score.clamp(0.0, 1.0)
        };
        let uncertainty = 1.0 - confidence;

        Self {
            complexity_factor,
            urgency_factor,
            base_unit_cost,
            effective_quantity,
            base_cost,
            confidence,
            margin_factor: MARGIN_BASE + uncertainty * MARGIN_UNCERTAINTY,
            spread: SPREAD_BASE + uncertainty * SPREAD_UNCERTAINTY,
        }
    }

    fn marked_up(&self) -> f64 {
        self.base_cost * (1.0 + self.margin_factor)
    }

    pub fn price_low(&self) -> i64 {
        (self.marked_up() * (1.0 - self.spread)).round() as i64
    }

    pub fn price_high(&self) -> i64 {
        (self.marked_up() * (1.0 + self.spread)).round() as i64
    }

    pub fn confidence_percent(&self) -> i64 {
        (CONFIDENCE_PERCENT_FLOOR + self.confidence * CONFIDENCE_PERCENT_RANGE).round() as i64
    }

    /// Reasons behind the band, in a fixed order.
    pub fn rationale(&self) -> Vec<String> {
        let mut rationale = Vec::with_capacity(4);
        if self.complexity_factor > 1.0 {
            rationale.push("Complexity/keywords increased base cost".to_string());
        }
        if self.urgency_factor > 1.0 {
            rationale.push("Tight delivery increased cost".to_string());
        }
        rationale.push(format!("Quantity considered: {}", self.effective_quantity));
        rationale.push(format!(
            "Confidence score: {}%",
            (self.confidence * 100.0).round() as i64
        ));
        rationale
    }

    pub fn into_suggestion(self) -> PriceSuggestion {
        PriceSuggestion {
            price_low: self.price_low(),
            price_high: self.price_high(),
            confidence_percent: self.confidence_percent(),
            rationale: self.rationale(),
            base_cost: self.base_cost.round() as i64,
            margin_factor: (self.margin_factor * 100.0).round() / 100.0,
        }
    }
}

/// Compute a price-band suggestion. Never fails.
pub fn suggest_price_band(input: &PricingInput) -> PriceSuggestion {
    PriceBreakdown::compute(input).into_suggestion()
}
