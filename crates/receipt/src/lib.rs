//! Receipt - Comprobante de pago layout and rendering
//!
//! This crate provides:
//! - Receipt record types with JSON (de)serialization
//! - A fixed single-page layout producing drawing instructions
//! - PDF rendering of those instructions
//! - Folio numbering over pluggable storage
//! - A two-phase issuer that ties the pieces together
//!
//! # Example
//!
//! ```ignore
//! use receipt::{parse_record, InMemoryFolioCounter, ReceiptConfig, ReceiptIssuer};
//!
//! let record = parse_record(record_json)?;
//! let mut issuer = ReceiptIssuer::new(ReceiptConfig::default(), InMemoryFolioCounter::default());
//! if let Some(receipt) = issuer.issue(record)? {
//!     std::fs::write(&receipt.file_name, &receipt.pdf)?;
//! }
//! ```

mod config;
pub mod folio;
mod job;
mod layout;
pub mod parser;
mod renderer;
mod schema;
mod view;

pub use config::{IssuerConfig, ReceiptConfig};
pub use folio::{
    FolioCounter, InMemoryFolioCounter, JsonFileStore, KeyValueStore, MemoryStore,
    StoredFolioCounter,
};
pub use job::{receipt_file_name, PendingRender, ReceiptIssuer, RenderedReceipt};
pub use layout::{fit_description, measure_mm, table_columns, Column, LayoutEngine, ReceiptLayout};
pub use parser::{parse_record, record_from_value};
pub use renderer::PdfRenderer;
pub use schema::*;
pub use view::{InvoiceRow, InvoiceView};

use thiserror::Error;

/// Errors that can occur while laying out or issuing a receipt
#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error(transparent)]
    InvalidDate(#[from] chile_text::ChileTextError),

    #[error("Invalid folio: {0}")]
    InvalidFolio(String),

    #[error("Receipt does not fit on one page: ends at {end_y:.1} mm, limit {limit:.1} mm")]
    PageOverflow { end_y: f64, limit: f64 },

    #[error("Failed to parse receipt: {0}")]
    Parse(String),

    #[error("Folio storage error: {0}")]
    Storage(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for receipt operations
pub type Result<T> = std::result::Result<T, ReceiptError>;
