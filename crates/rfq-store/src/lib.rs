//! Persistence and workflow for RFQ documents.
//!
//! - [`Database`]: SQLite pool and schema
//! - [`queries`]: row-level reads and writes
//! - [`FileStore`]: uploaded file storage
//! - [`RfqService`]: upload → extract → suggest with an audit trail

pub mod db;
pub mod error;
pub mod files;
pub mod queries;
pub mod workflow;

pub use db::Database;
pub use error::{Result, StoreError};
pub use files::FileStore;
pub use workflow::{DocumentDetail, DocumentUpdate, RfqService};
