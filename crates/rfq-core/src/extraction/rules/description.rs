//! Free-text description extraction.

use super::FieldExtractor;
use crate::models::fields::MAX_DESCRIPTION_CHARS;

/// Description extractor: the whole text, whitespace-compacted and truncated.
pub struct DescriptionExtractor;

impl DescriptionExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DescriptionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DescriptionExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let compact = compact_description(text, MAX_DESCRIPTION_CHARS);
        (!compact.is_empty()).then_some(compact)
    }
}

/// Collapse whitespace runs to single spaces, trim, and keep the first
/// `max_chars` characters.
pub fn compact_description(text: &str, max_chars: usize) -> String {
    let mut compact = String::with_capacity(text.len().min(max_chars * 4));
    let mut taken = 0;

    for word in text.split_whitespace() {
        if !compact.is_empty() {
            if taken == max_chars {
                break;
            }
            compact.push(' ');
            taken += 1;
        }
        for ch in word.chars() {
            if taken == max_chars {
                break;
            }
            compact.push(ch);
            taken += 1;
        }
    }

    compact
}
