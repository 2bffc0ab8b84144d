//! Quantity extraction.

use regex::Captures;

use super::patterns::{QTY_PATTERN, QUANTITY_PATTERN};
use super::FieldExtractor;

/// Quantity field extractor.
///
/// The `qty` label takes precedence over `quantity`: the first `qty` match
/// anywhere in the text wins even if a `quantity` label appears earlier.
pub struct QuantityExtractor;

impl QuantityExtractor {
    pub fn new() -> Self {
        Self
    }

    fn value(caps: &Captures<'_>) -> Option<u32> {
        // At most 7 digits, always fits in u32
        caps.get(1)?.as_str().parse().ok()
    }
}

impl Default for QuantityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for QuantityExtractor {
    type Output = u32;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        QTY_PATTERN
            .captures(text)
            .or_else(|| QUANTITY_PATTERN.captures(text))
            .and_then(|caps| Self::value(&caps))
    }
}

/// Extract the quantity from text.
pub fn extract_quantity(text: &str) -> Option<u32> {
    QuantityExtractor::new().extract(text)
}
