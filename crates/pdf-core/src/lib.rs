//! PDF Core - Low-level PDF writing
//!
//! This crate provides functionality for:
//! - Composing blank-page PDF documents
//! - Measuring and placing text in the built-in Helvetica family
//! - Painting lines, rectangles and rounded rectangles
//! - Wrapping text to a measured width
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, BuiltinFont, PdfDocument};
//!
//! let mut doc = PdfDocument::with_page(612.0, 792.0);
//! doc.set_font(BuiltinFont::HelveticaBold, 12.0);
//! doc.insert_text("Hello, World!", 1, 100.0, 100.0, Align::Left)?;
//! doc.save("output.pdf")?;
//! ```

mod document;
mod font;
mod graphics;
mod text;

pub use document::{Color, PdfDocument};
pub use font::{encode_literal, win_ansi_byte, BuiltinFont};
pub use graphics::{
    generate_line_operators, generate_rect_operators, generate_rounded_rect_operators, PaintMode,
    PathStyle,
};
pub use text::{generate_text_operators, wrap_text_to_width, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Length conversions between millimetres and PDF points
pub mod units {
    /// Points per millimetre (72 pt per inch / 25.4 mm per inch)
    pub const PT_PER_MM: f64 = 72.0 / 25.4;

    /// Convert millimetres to points
    pub fn mm_to_pt(mm: f64) -> f64 {
        mm * PT_PER_MM
    }

    /// Convert points to millimetres
    pub fn pt_to_mm(pt: f64) -> f64 {
        pt / PT_PER_MM
    }
}
