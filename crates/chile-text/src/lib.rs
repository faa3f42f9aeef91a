//! Chile Text - Chilean Spanish text formatting
//!
//! This crate provides:
//! - Peso amounts in words (CIEN, VEINTIUN, UN MILLON...)
//! - Peso currency formatting with es-CL thousands grouping
//! - `DD/MM/YYYY` date formatting from ISO dates
//!
//! # Example
//!
//! ```
//! use chile_text::{format_clp, format_date_cl, number_to_words};
//!
//! assert_eq!(number_to_words(24_500), "VEINTICUATRO MIL QUINIENTOS PESOS");
//! assert_eq!(format_clp(1_234_567.0), "$ 1.234.567");
//! assert_eq!(format_date_cl("2024-03-05").unwrap(), "05/03/2024");
//! ```

mod formatter;
mod words;

pub use formatter::ChileFormatter;

// Re-export commonly used formatting functions
pub use formatter::{format_clp, format_date_cl, format_thousands, round_amount};
pub use words::number_to_words;

use thiserror::Error;

/// Errors that can occur during Chilean text formatting
#[derive(Debug, Error)]
pub enum ChileTextError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type for Chilean text operations
pub type Result<T> = std::result::Result<T, ChileTextError>;
