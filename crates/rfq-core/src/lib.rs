//! Core library for RFQ (request-for-quote) processing.
//!
//! This crate provides:
//! - PDF text decoding (lopdf + pdf-extract)
//! - Rule-based field extraction (NSN, quantity, delivery days, description)
//! - Heuristic price-band calculation
//! - Document, suggestion and audit data models shared by the store and API

pub mod error;
pub mod extraction;
pub mod models;
pub mod pdf;
pub mod pricing;

pub use error::{PdfError, Result, RfqError, ValidationError};
pub use extraction::{extract, FieldsExtractor, RfqExtractor};
pub use models::audit::{AuditAction, AuditEntry};
pub use models::config::RfqConfig;
pub use models::document::{Document, DocumentStatus};
pub use models::fields::{ExtractedFields, FieldsUpdate};
pub use models::suggestion::{PriceSuggestion, SuggestionRecord};
pub use pdf::{decode_text, AutoDecoder, PdfExtractor, PdfProcessor, TextDecoder};
pub use pricing::{suggest_price_band, PriceBreakdown, PricingInput};
