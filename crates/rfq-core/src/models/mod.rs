//! Data models for RFQ processing.

pub mod audit;
pub mod config;
pub mod document;
pub mod fields;
pub mod suggestion;
