//! Receipt page layout
//!
//! The layout runs top to bottom as a chain of step functions. Each step
//! receives the vertical cursor (mm from the top edge), pushes its drawing
//! instructions onto a [`Sheet`], and returns where the next step starts.

use crate::config::{IssuerConfig, ReceiptConfig};
use crate::schema::*;
use crate::{ReceiptError, Result};
use chile_text::{format_clp, format_date_cl, number_to_words, round_amount};
use pdf_core::{units, wrap_text_to_width};
use serde::{Deserialize, Serialize};

const SLATE_800: Color = Color::rgb(30, 41, 59);
const SLATE_600: Color = Color::rgb(71, 85, 105);
const SLATE_500: Color = Color::rgb(100, 116, 139);
const SLATE_200: Color = Color::rgb(226, 232, 240);
const SLATE_100: Color = Color::rgb(241, 245, 249);
const RED_600: Color = Color::rgb(220, 38, 38);

const RULE_WIDTH: f64 = 0.3;
const ROW_HEIGHT: f64 = 7.0;
const CELL_PADDING: f64 = 2.0;
const LINE_HEIGHT_FACTOR: f64 = 1.15;

const FOLIO_BOX_WIDTH: f64 = 62.0;
const FOLIO_BOX_HEIGHT: f64 = 26.0;

const TOTAL_BOX_WIDTH: f64 = 65.0;
const TOTAL_BOX_HEIGHT: f64 = 14.0;
const TOTAL_BOX_RADIUS: f64 = 2.0;

const DESCRIPTION_MAX_CHARS: usize = 40;
const COMMENT_WIDTH_RATIO: f64 = 0.55;

/// Font, size and color of a text run
#[derive(Debug, Clone, Copy)]
struct TextStyle {
    font: FontStyle,
    size: f64,
    color: Color,
}

impl TextStyle {
    const fn new(font: FontStyle, size: f64, color: Color) -> Self {
        Self { font, size, color }
    }

    /// Width of `text` in millimetres
    fn measure(&self, text: &str) -> f64 {
        measure_mm(text, self.font, self.size)
    }
}

const ISSUER_NAME: TextStyle = TextStyle::new(FontStyle::Bold, 13.0, SLATE_800);
const ISSUER_DETAIL: TextStyle = TextStyle::new(FontStyle::Regular, 7.5, SLATE_600);
const FOLIO_TAX_ID: TextStyle = TextStyle::new(FontStyle::Bold, 11.0, RED_600);
const FOLIO_TITLE: TextStyle = TextStyle::new(FontStyle::Bold, 9.0, RED_600);
const FOLIO_NUMBER: TextStyle = TextStyle::new(FontStyle::Bold, 10.0, RED_600);
const OFFICE: TextStyle = TextStyle::new(FontStyle::Regular, 8.0, SLATE_600);
const LABEL: TextStyle = TextStyle::new(FontStyle::Bold, 7.0, SLATE_500);
const VALUE: TextStyle = TextStyle::new(FontStyle::Regular, 10.0, SLATE_800);
const TABLE_HEAD: TextStyle = TextStyle::new(FontStyle::Bold, 7.0, SLATE_600);
const CELL: TextStyle = TextStyle::new(FontStyle::Regular, 9.0, SLATE_800);
const CELL_TOTAL: TextStyle = TextStyle::new(FontStyle::Bold, 9.0, SLATE_800);
const COMMENT: TextStyle = TextStyle::new(FontStyle::Regular, 9.0, SLATE_600);
const TOTAL_LABEL: TextStyle = TextStyle::new(FontStyle::Bold, 9.0, SLATE_600);
const TOTAL_AMOUNT: TextStyle = TextStyle::new(FontStyle::Bold, 12.0, SLATE_800);
const AMOUNT_WORDS: TextStyle = TextStyle::new(FontStyle::Italic, 8.0, SLATE_500);

/// Width of `text` in millimetres, Helvetica metrics without kerning
pub fn measure_mm(text: &str, font: FontStyle, size: f64) -> f64 {
    units::pt_to_mm(font.builtin().text_width_points(text, size as f32))
}

/// One column of the line-items table
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: &'static str,
    /// Offset from the left margin in mm
    pub x: f64,
    pub width: f64,
    pub align: Align,
}

impl Column {
    /// Anchor x for cell text, relative to the left margin
    pub fn text_x(&self) -> f64 {
        match self.align {
            Align::Left => self.x + CELL_PADDING,
            Align::Center => self.x + self.width / 2.0,
            Align::Right => self.x + self.width - CELL_PADDING,
        }
    }
}

/// Table columns for a given content width
///
/// Every column but the last has a fixed width; Total takes what is left so
/// the columns always span the content width.
pub fn table_columns(content_width: f64) -> Vec<Column> {
    const FIXED: [(&str, f64, Align); 6] = [
        ("Item", 12.0, Align::Center),
        ("Código", 22.0, Align::Left),
        ("Detalle", 70.0, Align::Left),
        ("Cant.", 18.0, Align::Right),
        ("P. Unitario", 24.0, Align::Right),
        ("Rec/Desc", 20.0, Align::Right),
    ];

    let mut columns = Vec::with_capacity(FIXED.len() + 1);
    let mut x = 0.0;
    for (label, width, align) in FIXED {
        columns.push(Column {
            label,
            x,
            width,
            align,
        });
        x += width;
    }

    columns.push(Column {
        label: "Total",
        x,
        width: (content_width - x).max(0.0),
        align: Align::Right,
    });
    columns
}

/// Output of a layout pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLayout {
    pub instructions: Vec<DrawInstruction>,
    pub grand_total: f64,
    /// Empty unless the grand total is positive
    pub total_in_words: String,
    /// Final cursor position in mm
    pub end_y: f64,
}

impl ReceiptLayout {
    /// Text contents in emission order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().filter_map(DrawInstruction::text)
    }
}

/// Instruction accumulator with page geometry
struct Sheet {
    page: PageSize,
    margin: f64,
    instructions: Vec<DrawInstruction>,
}

impl Sheet {
    fn new(page: PageSize, margin: f64) -> Self {
        Self {
            page,
            margin,
            instructions: Vec::new(),
        }
    }

    fn content_width(&self) -> f64 {
        self.page.width_mm - 2.0 * self.margin
    }

    fn right_edge(&self) -> f64 {
        self.page.width_mm - self.margin
    }

    fn text(&mut self, style: TextStyle, content: impl Into<String>, x: f64, y: f64, align: Align) {
        self.instructions.push(DrawInstruction::Text {
            content: content.into(),
            x,
            y,
            font: style.font,
            size: style.size,
            color: style.color,
            align,
        });
    }

    fn rule(&mut self, y: f64, color: Color) {
        self.instructions.push(DrawInstruction::Line {
            x1: self.margin,
            y1: y,
            x2: self.right_edge(),
            y2: y,
            color,
            width: RULE_WIDTH,
        });
    }
}

/// Lays out a receipt as drawing instructions
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: ReceiptConfig,
}

impl LayoutEngine {
    pub fn new(config: ReceiptConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReceiptConfig {
        &self.config
    }

    /// Lay out on the configured page
    pub fn layout_default(&self, record: &InvoiceRecord) -> Result<ReceiptLayout> {
        self.layout(record, self.config.page)
    }

    /// Produce the full instruction list for one receipt
    ///
    /// Fails with [`ReceiptError::InvalidFolio`] for a zero folio,
    /// [`ReceiptError::InvalidDate`] for a malformed date, and
    /// [`ReceiptError::PageOverflow`] when the content would run past the
    /// bottom margin.
    pub fn layout(&self, record: &InvoiceRecord, page: PageSize) -> Result<ReceiptLayout> {
        if record.folio_number == 0 {
            return Err(ReceiptError::InvalidFolio(record.folio_number.to_string()));
        }
        let date = format_date_cl(&record.document_date)?;

        let margin = self.config.margin_mm;
        let mut sheet = Sheet::new(page, margin);

        let y = draw_header(&mut sheet, &self.config.issuer, record.folio_number, margin);
        let y = draw_separator(&mut sheet, y);
        let y = draw_customer(&mut sheet, record, &date, y);
        let (y, grand_total) = draw_items(&mut sheet, &record.line_items, y);
        let (y, has_comment) = draw_comment(&mut sheet, &record.comment, y);
        let y = draw_total_box(&mut sheet, grand_total, has_comment, y);
        let total_in_words = draw_amount_in_words(&mut sheet, grand_total, y);

        let limit = page.height_mm - margin;
        if y > limit {
            return Err(ReceiptError::PageOverflow { end_y: y, limit });
        }

        tracing::debug!(
            folio = record.folio_number,
            instructions = sheet.instructions.len(),
            end_y = y,
            "receipt laid out"
        );

        Ok(ReceiptLayout {
            instructions: sheet.instructions,
            grand_total,
            total_in_words,
            end_y: y,
        })
    }
}

fn draw_header(sheet: &mut Sheet, issuer: &IssuerConfig, folio: u64, y: f64) -> f64 {
    let margin = sheet.margin;

    sheet.text(ISSUER_NAME, &issuer.name, margin, y + 5.0, Align::Left);

    const DETAIL_OFFSETS: [f64; 5] = [10.0, 13.5, 17.5, 21.0, 24.5];
    let mut offset = DETAIL_OFFSETS[0];
    for (i, line) in issuer.detail_lines.iter().enumerate() {
        offset = DETAIL_OFFSETS.get(i).copied().unwrap_or(offset + 3.5);
        sheet.text(ISSUER_DETAIL, line, margin, y + offset, Align::Left);
    }

    let box_x = sheet.right_edge() - FOLIO_BOX_WIDTH;
    sheet.instructions.push(DrawInstruction::Rect {
        x: box_x,
        y,
        w: FOLIO_BOX_WIDTH,
        h: FOLIO_BOX_HEIGHT,
        stroke_color: RED_600,
        fill_color: Color::rgb(255, 255, 255),
        mode: RectMode::Stroke,
        line_width: 0.8,
    });

    let center = box_x + FOLIO_BOX_WIDTH / 2.0;
    let tax_id = format!("R.U.T: {}", issuer.tax_id);
    sheet.text(FOLIO_TAX_ID, tax_id, center, y + 7.0, Align::Center);
    sheet.text(FOLIO_TITLE, "COMPROBANTE DE PAGO", center, y + 13.0, Align::Center);
    let number = format!("Folio N° {}", folio);
    sheet.text(FOLIO_NUMBER, number, center, y + 19.0, Align::Center);
    sheet.text(OFFICE, &issuer.office, center, y + FOLIO_BOX_HEIGHT + 5.0, Align::Center);

    y + FOLIO_BOX_HEIGHT + 12.0
}

fn draw_separator(sheet: &mut Sheet, y: f64) -> f64 {
    sheet.rule(y, SLATE_200);
    y + 6.0
}

fn draw_customer(sheet: &mut Sheet, record: &InvoiceRecord, date: &str, y: f64) -> f64 {
    let column_width = sheet.content_width() / 3.0;
    let fields = [
        ("SEÑOR (ES)", record.recipient_name.as_str()),
        ("R.U.T", record.recipient_tax_id.as_str()),
        ("FECHA DOCUMENTO", date),
    ];

    for (i, (label, _)) in fields.iter().enumerate() {
        let x = sheet.margin + column_width * i as f64;
        sheet.text(LABEL, *label, x, y, Align::Left);
    }

    let y = y + 5.0;
    for (i, (_, value)) in fields.iter().enumerate() {
        let x = sheet.margin + column_width * i as f64;
        sheet.text(VALUE, *value, x, y, Align::Left);
    }

    draw_separator(sheet, y + 8.0)
}

/// Table header, one row per item and the bottom border
///
/// Returns the next cursor and the running sum of line totals.
fn draw_items(sheet: &mut Sheet, items: &[InvoiceLineItem], y: f64) -> (f64, f64) {
    let width = sheet.content_width();
    let columns = table_columns(width);
    let margin = sheet.margin;

    sheet.instructions.push(DrawInstruction::Rect {
        x: margin,
        y,
        w: width,
        h: ROW_HEIGHT,
        stroke_color: SLATE_100,
        fill_color: SLATE_100,
        mode: RectMode::Fill,
        line_width: RULE_WIDTH,
    });
    for column in &columns {
        let label = column.label.to_uppercase();
        sheet.text(TABLE_HEAD, label, margin + column.text_x(), y + 4.5, column.align);
    }
    sheet.rule(y + ROW_HEIGHT, SLATE_200);

    let mut y = y + ROW_HEIGHT;
    let mut grand_total = 0.0;
    for (index, item) in items.iter().enumerate() {
        let line_total = item.line_total();
        grand_total += line_total;

        let cells = [
            (index + 1).to_string(),
            item.code.clone(),
            fit_description(&item.description, columns[2].width - 2.0 * CELL_PADDING),
            non_zero(item.quantity(), |q| q.to_string()),
            non_zero(item.unit_price(), format_clp),
            non_zero(item.discount(), format_clp),
        ];
        for (column, content) in columns.iter().zip(cells) {
            sheet.text(CELL, content, margin + column.text_x(), y + 4.5, column.align);
        }

        let total_column = &columns[6];
        sheet.text(
            CELL_TOTAL,
            format_clp(line_total),
            margin + total_column.text_x(),
            y + 4.5,
            total_column.align,
        );

        sheet.rule(y + ROW_HEIGHT, SLATE_100);
        y += ROW_HEIGHT;
    }

    sheet.rule(y, SLATE_200);
    (y + 10.0, grand_total)
}

/// Description as printed: cut to 40 characters plus `...` when too wide
pub fn fit_description(description: &str, max_width: f64) -> String {
    if CELL.measure(description) > max_width {
        let head: String = description.chars().take(DESCRIPTION_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        description.to_string()
    }
}

pub(crate) fn non_zero(n: f64, format: impl Fn(f64) -> String) -> String {
    if n != 0.0 {
        format(n)
    } else {
        String::new()
    }
}

/// Comment heading and wrapped body; skipped entirely when empty
fn draw_comment(sheet: &mut Sheet, comment: &str, y: f64) -> (f64, bool) {
    if comment.is_empty() {
        return (y, false);
    }

    sheet.text(LABEL, "COMENTARIO", sheet.margin, y, Align::Left);
    let y = y + 4.0;

    let max_width = sheet.content_width() * COMMENT_WIDTH_RATIO;
    let lines = wrap_text_to_width(comment, max_width, |s| COMMENT.measure(s));
    let spacing = units::pt_to_mm(COMMENT.size * LINE_HEIGHT_FACTOR);
    for (i, line) in lines.iter().enumerate() {
        sheet.text(COMMENT, line, sheet.margin, y + spacing * i as f64, Align::Left);
    }

    (y + lines.len() as f64 * 4.0 + 4.0, true)
}

fn draw_total_box(sheet: &mut Sheet, grand_total: f64, has_comment: bool, y: f64) -> f64 {
    let x = sheet.right_edge() - TOTAL_BOX_WIDTH;
    let top = if has_comment { y } else { y - 2.0 };

    sheet.instructions.push(DrawInstruction::RoundedRect {
        x,
        y: top,
        w: TOTAL_BOX_WIDTH,
        h: TOTAL_BOX_HEIGHT,
        radius: TOTAL_BOX_RADIUS,
        stroke_color: SLATE_200,
        fill_color: SLATE_100,
        mode: RectMode::FillStroke,
        line_width: RULE_WIDTH,
    });
    sheet.text(TOTAL_LABEL, "Total", x + 6.0, top + 9.0, Align::Left);
    sheet.text(
        TOTAL_AMOUNT,
        format_clp(grand_total),
        x + TOTAL_BOX_WIDTH - 6.0,
        top + 9.0,
        Align::Right,
    );

    top + 18.0
}

/// Words line under the total box, only for totals that round to a positive peso
fn draw_amount_in_words(sheet: &mut Sheet, grand_total: f64, y: f64) -> String {
    let amount = round_amount(grand_total);
    if amount <= 0 {
        return String::new();
    }

    let words = number_to_words(amount);
    sheet.text(AMOUNT_WORDS, &words, sheet.right_edge(), y, Align::Right);
    words
}
