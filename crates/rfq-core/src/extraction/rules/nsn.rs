//! NSN (National Stock Number) extraction.

use super::patterns::NSN_PATTERN;
use super::FieldExtractor;

/// NSN field extractor.
pub struct NsnExtractor;

impl NsnExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NsnExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NsnExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = NSN_PATTERN.captures(text)?;
        Some(caps.get(1)?.as_str().to_string())
    }
}

/// Extract the first NSN from text.
pub fn extract_nsn(text: &str) -> Option<String> {
    NsnExtractor::new().extract(text)
}
