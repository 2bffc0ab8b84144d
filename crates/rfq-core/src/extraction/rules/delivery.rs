//! Delivery lead time extraction.

use regex::Captures;

use super::patterns::DELIVERY_PATTERN;
use super::FieldExtractor;

/// Delivery-days field extractor.
///
/// Matches `delivery` or `lead`, an optional `days`/`time` token, an optional
/// `:`/`=` and then the number of days. The number always comes from the
/// `days` capture, whichever optional tokens were present.
pub struct DeliveryExtractor;

impl DeliveryExtractor {
    pub fn new() -> Self {
        Self
    }

    fn value(caps: &Captures<'_>) -> Option<u32> {
        caps.name("days")?.as_str().parse().ok()
    }
}

impl Default for DeliveryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DeliveryExtractor {
    type Output = u32;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        DELIVERY_PATTERN
            .captures(text)
            .and_then(|caps| Self::value(&caps))
    }
}

/// Extract delivery days from text.
pub fn extract_delivery_days(text: &str) -> Option<u32> {
    DeliveryExtractor::new().extract(text)
}
