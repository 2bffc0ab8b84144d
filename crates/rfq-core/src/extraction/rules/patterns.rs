//! Common regex patterns for RFQ field extraction.
//!
//! Digit classes are spelled `[0-9]` so that only ASCII digits match and every
//! capture parses as an integer.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // National Stock Number: 4-2-3-4 digit groups
    pub static ref NSN_PATTERN: Regex = Regex::new(
        r"\b([0-9]{4}-[0-9]{2}-[0-9]{3}-[0-9]{4})\b"
    ).unwrap();

    // Quantity, short label (tried first)
    pub static ref QTY_PATTERN: Regex = Regex::new(
        r"(?i)\bqty\s*[:=]?\s*([0-9]{1,7})\b"
    ).unwrap();

    // Quantity, long label
    pub static ref QUANTITY_PATTERN: Regex = Regex::new(
        r"(?i)\bquantity\s*[:=]?\s*([0-9]{1,7})\b"
    ).unwrap();

    // Delivery / lead time in days
    pub static ref DELIVERY_PATTERN: Regex = Regex::new(
        r"(?i)\b(?P<label>delivery|lead)\s*(?:days|time)?\s*[:=]?\s*(?P<days>[0-9]{1,5})\b"
    ).unwrap();

    // Keywords that mark a part as complex to produce
    pub static ref COMPLEXITY_KEYWORDS: Regex = Regex::new(
        r"(?i)repair|assembly|precision|aerospace"
    ).unwrap();
}
