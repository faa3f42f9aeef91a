//! PDF rendering of laid-out receipts

use crate::schema::*;
use crate::{ReceiptLayout, Result};
use pdf_core::units::mm_to_pt;
use pdf_core::PdfDocument;

/// Paints [`DrawInstruction`]s onto a single PDF page
pub struct PdfRenderer {
    /// Compress page content streams
    compress: bool,
    /// Document title written to the info dictionary
    title: Option<String>,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfRenderer {
    /// Create a new renderer with compression on
    pub fn new() -> Self {
        Self {
            compress: true,
            title: None,
        }
    }

    /// Toggle content stream compression
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the document title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Render a layout to PDF bytes
    pub fn render(&self, layout: &ReceiptLayout, page: PageSize) -> Result<Vec<u8>> {
        let doc = self.render_document(&layout.instructions, page)?;
        Ok(doc.to_bytes()?)
    }

    /// Paint instructions onto a fresh one-page document
    pub fn render_document(
        &self,
        instructions: &[DrawInstruction],
        page: PageSize,
    ) -> Result<PdfDocument> {
        let mut doc = PdfDocument::with_page(mm_to_pt(page.width_mm), mm_to_pt(page.height_mm));
        doc.set_compression(self.compress);
        if let Some(title) = &self.title {
            doc.set_title(title);
        }

        for instruction in instructions {
            self.paint(&mut doc, instruction)?;
        }

        Ok(doc)
    }

    /// Paint a single instruction on page 1
    fn paint(&self, doc: &mut PdfDocument, instruction: &DrawInstruction) -> Result<()> {
        match instruction {
            DrawInstruction::Text {
                content,
                x,
                y,
                font,
                size,
                color,
                align,
            } => {
                doc.set_font(font.builtin(), *size as f32);
                doc.set_text_color((*color).into());
                doc.insert_text(content, 1, mm_to_pt(*x), mm_to_pt(*y), (*align).into())?;
            }
            DrawInstruction::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => {
                doc.set_draw_color((*color).into());
                doc.set_line_width(mm_to_pt(*width));
                doc.draw_line(
                    1,
                    mm_to_pt(*x1),
                    mm_to_pt(*y1),
                    mm_to_pt(*x2),
                    mm_to_pt(*y2),
                )?;
            }
            DrawInstruction::Rect {
                x,
                y,
                w,
                h,
                stroke_color,
                fill_color,
                mode,
                line_width,
            } => {
                set_path_style(doc, *stroke_color, *fill_color, *line_width);
                doc.draw_rect(
                    1,
                    mm_to_pt(*x),
                    mm_to_pt(*y),
                    mm_to_pt(*w),
                    mm_to_pt(*h),
                    (*mode).into(),
                )?;
            }
            DrawInstruction::RoundedRect {
                x,
                y,
                w,
                h,
                radius,
                stroke_color,
                fill_color,
                mode,
                line_width,
            } => {
                set_path_style(doc, *stroke_color, *fill_color, *line_width);
                doc.draw_rounded_rect(
                    1,
                    mm_to_pt(*x),
                    mm_to_pt(*y),
                    mm_to_pt(*w),
                    mm_to_pt(*h),
                    mm_to_pt(*radius),
                    (*mode).into(),
                )?;
            }
        }

        Ok(())
    }
}

fn set_path_style(doc: &mut PdfDocument, stroke: Color, fill: Color, line_width: f64) {
    doc.set_draw_color(stroke.into());
    doc.set_fill_color(fill.into());
    doc.set_line_width(mm_to_pt(line_width));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str, font: FontStyle, align: Align) -> DrawInstruction {
        DrawInstruction::Text {
            content: content.to_string(),
            x: 14.0,
            y: 19.0,
            font,
            size: 13.0,
            color: Color::rgb(30, 41, 59),
            align,
        }
    }

    fn content(doc: &PdfDocument) -> String {
        String::from_utf8_lossy(doc.page_content(1).unwrap()).into_owned()
    }

    #[test]
    fn test_page_size_in_points() {
        let doc = PdfRenderer::new()
            .render_document(&[], PageSize::LETTER)
            .unwrap();
        let (w, h) = doc.page_size(1).unwrap();
        assert!((w - 612.0).abs() < 1e-6);
        assert!((h - 792.0).abs() < 1e-6);
    }

    #[test]
    fn test_text_converted_to_points() {
        let doc = PdfRenderer::new()
            .render_document(
                &[text("PRO HOME SPA", FontStyle::Bold, Align::Left)],
                PageSize::LETTER,
            )
            .unwrap();

        let ops = content(&doc);
        assert!(ops.contains("(PRO HOME SPA) Tj"));
        assert!(ops.contains("/F1 13 Tf"));
        // 14 mm = 39.685 pt; baseline 19 mm from the top of 792 pt
        assert!(ops.contains("39.685 738.142 Td"));
    }

    #[test]
    fn test_fonts_per_style() {
        let doc = PdfRenderer::new()
            .render_document(
                &[
                    text("a", FontStyle::Regular, Align::Left),
                    text("b", FontStyle::Bold, Align::Center),
                    text("c", FontStyle::Italic, Align::Right),
                ],
                PageSize::LETTER,
            )
            .unwrap();

        let ops = content(&doc);
        assert!(ops.contains("/F1 13 Tf"));
        assert!(ops.contains("/F2 13 Tf"));
        assert!(ops.contains("/F3 13 Tf"));
    }

    #[test]
    fn test_shapes() {
        let instructions = [
            DrawInstruction::Line {
                x1: 0.0,
                y1: 0.0,
                x2: 25.4,
                y2: 0.0,
                color: Color::rgb(226, 232, 240),
                width: 0.3,
            },
            DrawInstruction::RoundedRect {
                x: 0.0,
                y: 0.0,
                w: 65.0,
                h: 14.0,
                radius: 2.0,
                stroke_color: Color::rgb(226, 232, 240),
                fill_color: Color::rgb(241, 245, 249),
                mode: RectMode::FillStroke,
                line_width: 0.3,
            },
        ];
        let doc = PdfRenderer::new()
            .render_document(&instructions, PageSize::LETTER)
            .unwrap();

        let ops = content(&doc);
        assert!(ops.contains("0 792 m\n72 792 l\nS"));
        assert!(ops.contains("B\n"));
    }

    #[test]
    fn test_render_bytes() {
        let layout = ReceiptLayout {
            instructions: vec![text("Total", FontStyle::Bold, Align::Left)],
            grand_total: 0.0,
            total_in_words: String::new(),
            end_y: 19.0,
        };
        let bytes = PdfRenderer::new()
            .with_title("Comprobante")
            .render(&layout, PageSize::LETTER)
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
    }
}
