//! Receipt data model and drawing instructions

use crate::parser::{lenient_number, lenient_string};
use serde::{Deserialize, Serialize};

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from 0-255 components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for pdf_core::Color {
    fn from(c: Color) -> Self {
        pdf_core::Color::from_rgb(c.r, c.g, c.b)
    }
}

/// Font style within the Helvetica family
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    /// The built-in PDF font used for this style
    pub fn builtin(self) -> pdf_core::BuiltinFont {
        match self {
            FontStyle::Regular => pdf_core::BuiltinFont::Helvetica,
            FontStyle::Bold => pdf_core::BuiltinFont::HelveticaBold,
            FontStyle::Italic => pdf_core::BuiltinFont::HelveticaOblique,
        }
    }
}

/// Text alignment relative to the text anchor
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl From<Align> for pdf_core::Align {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => pdf_core::Align::Left,
            Align::Center => pdf_core::Align::Center,
            Align::Right => pdf_core::Align::Right,
        }
    }
}

/// How a rectangle is painted
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RectMode {
    #[default]
    Stroke,
    Fill,
    FillStroke,
}

impl From<RectMode> for pdf_core::PaintMode {
    fn from(mode: RectMode) -> Self {
        match mode {
            RectMode::Stroke => pdf_core::PaintMode::Stroke,
            RectMode::Fill => pdf_core::PaintMode::Fill,
            RectMode::FillStroke => pdf_core::PaintMode::FillStroke,
        }
    }
}

/// Page dimensions in millimetres
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    /// US Letter (8.5 × 11 in)
    pub const LETTER: PageSize = PageSize {
        width_mm: 215.9,
        height_mm: 279.4,
    };

    /// ISO A4
    pub const A4: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

/// One row of the receipt
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    #[serde(default, alias = "codigo", deserialize_with = "lenient_string")]
    pub code: String,

    #[serde(default, alias = "detalle", deserialize_with = "lenient_string")]
    pub description: String,

    #[serde(default, alias = "cantidad", deserialize_with = "lenient_number")]
    pub quantity: f64,

    #[serde(default, alias = "precioUnitario", deserialize_with = "lenient_number")]
    pub unit_price: f64,

    /// Discount (positive) or surcharge (negative) subtracted from the row
    #[serde(default, alias = "recDesc", deserialize_with = "lenient_number")]
    pub discount: f64,
}

impl InvoiceLineItem {
    pub fn new(
        code: &str,
        description: &str,
        quantity: f64,
        unit_price: f64,
        discount: f64,
    ) -> Self {
        Self {
            code: code.to_string(),
            description: description.to_string(),
            quantity,
            unit_price,
            discount,
        }
    }

    /// Quantity, with non-finite values read as zero
    pub fn quantity(&self) -> f64 {
        finite_or_zero(self.quantity)
    }

    /// Unit price, with non-finite values read as zero
    pub fn unit_price(&self) -> f64 {
        finite_or_zero(self.unit_price)
    }

    /// Discount, with non-finite values read as zero
    pub fn discount(&self) -> f64 {
        finite_or_zero(self.discount)
    }

    /// `quantity * unit_price - discount`; negative when the discount is larger
    pub fn line_total(&self) -> f64 {
        self.quantity() * self.unit_price() - self.discount()
    }
}

fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Everything printed on one receipt
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    /// Señor(es)
    #[serde(default, alias = "senor", deserialize_with = "lenient_string")]
    pub recipient_name: String,

    /// Recipient RUT
    #[serde(default, alias = "rutCliente", deserialize_with = "lenient_string")]
    pub recipient_tax_id: String,

    /// ISO `YYYY-MM-DD` date, or empty
    #[serde(default, alias = "fechaDocumento", deserialize_with = "lenient_string")]
    pub document_date: String,

    #[serde(default, alias = "comentario", deserialize_with = "lenient_string")]
    pub comment: String,

    #[serde(default)]
    pub line_items: Vec<InvoiceLineItem>,

    /// Receipt number; stamped by the issuer when left at zero
    #[serde(default, alias = "folioNumero")]
    pub folio_number: u64,
}

impl InvoiceRecord {
    /// Sum of line totals, accumulated left to right in row order
    pub fn grand_total(&self) -> f64 {
        self.line_items
            .iter()
            .fold(0.0, |total, item| total + item.line_total())
    }
}

/// A positioned drawing operation in millimetres from the top-left corner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DrawInstruction {
    /// Single line of text; `y` is the baseline
    Text {
        content: String,
        x: f64,
        y: f64,
        font: FontStyle,
        size: f64,
        color: Color,
        align: Align,
    },

    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f64,
    },

    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        stroke_color: Color,
        fill_color: Color,
        mode: RectMode,
        line_width: f64,
    },

    RoundedRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        stroke_color: Color,
        fill_color: Color,
        mode: RectMode,
        line_width: f64,
    },
}

impl DrawInstruction {
    /// Text content when this is a text instruction
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawInstruction::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Top edge in millimetres (baseline for text)
    pub fn top(&self) -> f64 {
        match self {
            DrawInstruction::Text { y, .. } => *y,
            DrawInstruction::Line { y1, y2, .. } => y1.min(*y2),
            DrawInstruction::Rect { y, .. } | DrawInstruction::RoundedRect { y, .. } => *y,
        }
    }

    /// Bottom edge in millimetres (baseline for text)
    pub fn bottom(&self) -> f64 {
        match self {
            DrawInstruction::Text { y, .. } => *y,
            DrawInstruction::Line { y1, y2, .. } => y1.max(*y2),
            DrawInstruction::Rect { y, h, .. } | DrawInstruction::RoundedRect { y, h, .. } => {
                y + h
            }
        }
    }
}
