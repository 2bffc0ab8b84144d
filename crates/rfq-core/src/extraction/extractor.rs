//! Rule-based RFQ field extractor and confidence scoring.

use tracing::debug;

use crate::models::fields::ExtractedFields;

use super::rules::{
    DeliveryExtractor, DescriptionExtractor, FieldExtractor, NsnExtractor, QuantityExtractor,
};
use super::FieldsExtractor;

/// Confidence weights in percentage points. They sum to 100.
const NSN_POINTS: u32 = 35;
const QUANTITY_POINTS: u32 = 35;
const DELIVERY_POINTS: u32 = 20;
const DESCRIPTION_POINTS: u32 = 10;

/// Extracts RFQ fields with the built-in pattern rules.
pub struct RfqExtractor {
    nsn: NsnExtractor,
    quantity: QuantityExtractor,
    delivery: DeliveryExtractor,
    description: DescriptionExtractor,
}

impl RfqExtractor {
    /// Create a new extractor with default settings.
    pub fn new() -> Self {
        Self {
            nsn: NsnExtractor::new(),
            quantity: QuantityExtractor::new(),
            delivery: DeliveryExtractor::new(),
            description: DescriptionExtractor::new(),
        }
    }
}

impl Default for RfqExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldsExtractor for RfqExtractor {
    fn extract(&self, text: &str) -> ExtractedFields {
        let nsn = self.nsn.extract(text);
        let quantity = self.quantity.extract(text);
        let delivery_days = self.delivery.extract(text);
        let description = self.description.extract(text);

        let mut points = 0;
        if nsn.is_some() {
            points += NSN_POINTS;
        }
        if quantity.is_some() {
            points += QUANTITY_POINTS;
        }
        if delivery_days.is_some() {
            points += DELIVERY_POINTS;
        }
        if description.is_some() {
            points += DESCRIPTION_POINTS;
        }
        let confidence_score = confidence_from_points(points);

        debug!(
            "Extracted from {} chars: nsn={:?} quantity={:?} delivery_days={:?} confidence={}",
            text.len(),
            nsn,
            quantity,
            delivery_days,
            confidence_score
        );

        ExtractedFields {
            nsn,
            quantity,
            delivery_days,
            description,
            confidence_score,
        }
    }
}

/// Convert summed points to a score, clamped to [0, 1].
///
/// Summing in integer points keeps a full match at exactly 1.0.
fn confidence_from_points(points: u32) -> f64 {
    (f64::from(points) / 100.0).clamp(0.0, 1.0)
}
