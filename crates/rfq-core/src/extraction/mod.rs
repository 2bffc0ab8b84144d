//! RFQ field extraction module.

mod extractor;
pub mod rules;

pub use extractor::RfqExtractor;

use crate::models::fields::ExtractedFields;

/// Trait for RFQ field extractors.
///
/// Extraction is total: text without recognizable content produces unset
/// fields and a zero score rather than an error.
pub trait FieldsExtractor {
    /// Extract fields from decoded document text.
    fn extract(&self, text: &str) -> ExtractedFields;
}

/// Extract fields from text with the default rules.
pub fn extract(text: &str) -> ExtractedFields {
    RfqExtractor::new().extract(text)
}
