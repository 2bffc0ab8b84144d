//! Rule-based field extractors for RFQ documents.

pub mod delivery;
pub mod description;
pub mod nsn;
pub mod patterns;
pub mod quantity;

pub use delivery::{extract_delivery_days, DeliveryExtractor};
pub use description::{compact_description, DescriptionExtractor};
pub use nsn::{extract_nsn, NsnExtractor};
pub use quantity::{extract_quantity, QuantityExtractor};
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}
