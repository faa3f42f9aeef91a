//! PDF Document builder

use crate::font::{encode_literal, BuiltinFont};
use crate::graphics::{
    generate_line_operators, generate_rect_operators, generate_rounded_rect_operators, PaintMode,
    PathStyle,
};
use crate::text::{generate_text_operators, TextRenderContext};
use crate::{Align, PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Red color
    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// A page being composed
#[derive(Debug, Clone)]
struct PageState {
    /// Width in points
    width: f64,
    /// Height in points
    height: f64,
    /// Buffered content operators
    content: Vec<u8>,
    /// Fonts referenced on this page (resource name -> font)
    fonts: BTreeMap<String, BuiltinFont>,
}

/// PDF document builder providing high-level drawing operations
///
/// Coordinates passed to the drawing methods are in points with the origin at
/// the top-left corner of the page; they are flipped to PDF's bottom-left
/// origin when operators are generated. Nothing is written to a `lopdf`
/// document until [`PdfDocument::to_bytes`] or [`PdfDocument::save`].
pub struct PdfDocument {
    /// Pages in order (page numbers are 1-indexed)
    pages: Vec<PageState>,
    /// Current font
    current_font: BuiltinFont,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Current stroke color
    current_draw_color: Color,
    /// Current fill color
    current_fill_color: Color,
    /// Current line width in points
    current_line_width: f64,
    /// Font resource names shared by all pages
    font_resources: HashMap<BuiltinFont, String>,
    /// Next font resource number
    next_font_resource: u32,
    /// Compress content streams with FlateDecode
    compress: bool,
    /// Optional document title for the Info dictionary
    title: Option<String>,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    /// Create an empty document without pages
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            current_font: BuiltinFont::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            current_draw_color: Color::default(),
            current_fill_color: Color::default(),
            current_line_width: 0.567,
            font_resources: HashMap::new(),
            next_font_resource: 1,
            compress: true,
            title: None,
        }
    }

    /// Create a document with a single blank page
    ///
    /// # Arguments
    /// * `width` - Page width in points
    /// * `height` - Page height in points
    pub fn with_page(width: f64, height: f64) -> Self {
        let mut doc = Self::new();
        doc.add_page(width, height);
        doc
    }

    /// Append a blank page and return its page number (1-indexed)
    pub fn add_page(&mut self, width: f64, height: f64) -> usize {
        self.pages.push(PageState {
            width,
            height,
            content: Vec::new(),
            fonts: BTreeMap::new(),
        });
        self.pages.len()
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page size in points as `(width, height)`
    pub fn page_size(&self, page: usize) -> Result<(f64, f64)> {
        let state = self.page(page)?;
        Ok((state.width, state.height))
    }

    /// Enable or disable FlateDecode compression of content streams
    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    /// Set the document title written to the Info dictionary
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    /// Set current font and size for subsequent text insertions
    pub fn set_font(&mut self, font: BuiltinFont, size: f32) {
        self.current_font = font;
        self.current_font_size = size;
    }

    /// Set text color for subsequent text insertions
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Set stroke color for lines and outlines
    pub fn set_draw_color(&mut self, color: Color) {
        self.current_draw_color = color;
    }

    /// Set fill color for filled shapes
    pub fn set_fill_color(&mut self, color: Color) {
        self.current_fill_color = color;
    }

    /// Set line width in points
    pub fn set_line_width(&mut self, width: f64) {
        self.current_line_width = width;
    }

    /// Width of `text` in points with the current font and size
    pub fn get_text_width(&self, text: &str) -> f64 {
        self.current_font
            .text_width_points(text, self.current_font_size)
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points (alignment anchor)
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Text alignment
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let page_height = self.page(page)?.height;

        // Skip empty text - nothing to render
        if text.is_empty() {
            return Ok(());
        }

        let font = self.current_font;
        let font_name = self.get_or_create_font_ref(font, page)?;
        let ctx = TextRenderContext {
            font_name,
            font_size: self.current_font_size,
            text_width: self.get_text_width(text),
            color: self.current_text_color,
        };

        let ops = generate_text_operators(&encode_literal(text), x, page_height - y, align, &ctx);
        self.buffer_content(page, &ops)
    }

    /// Draw a straight line with the current draw color and line width
    pub fn draw_line(&mut self, page: usize, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        let page_height = self.page(page)?.height;
        let ops = generate_line_operators(
            x1,
            page_height - y1,
            x2,
            page_height - y2,
            self.current_draw_color,
            self.current_line_width,
        );
        self.buffer_content(page, &ops)
    }

    /// Draw a rectangle whose top-left corner is at `(x, y)`
    pub fn draw_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mode: PaintMode,
    ) -> Result<()> {
        let page_height = self.page(page)?.height;
        let ops = generate_rect_operators(
            x,
            page_height - y - height,
            width,
            height,
            &self.path_style(),
            mode,
        );
        self.buffer_content(page, &ops)
    }

    /// Draw a rounded rectangle whose top-left corner is at `(x, y)`
    #[allow(clippy::too_many_arguments)]
    pub fn draw_rounded_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        mode: PaintMode,
    ) -> Result<()> {
        let page_height = self.page(page)?.height;
        let ops = generate_rounded_rect_operators(
            x,
            page_height - y - height,
            width,
            height,
            radius,
            &self.path_style(),
            mode,
        );
        self.buffer_content(page, &ops)
    }

    /// Get or create the resource name of a font for a page
    pub fn get_or_create_font_ref(&mut self, font: BuiltinFont, page: usize) -> Result<String> {
        self.page(page)?;

        let name = match self.font_resources.get(&font) {
            Some(name) => name.clone(),
            None => {
                let name = format!("F{}", self.next_font_resource);
                self.next_font_resource += 1;
                self.font_resources.insert(font, name.clone());
                name
            }
        };

        self.pages[page - 1].fonts.insert(name.clone(), font);
        Ok(name)
    }

    /// Save the document to a file
    ///
    /// # Arguments
    /// * `path` - Output file path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize the document to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut doc = self.build()?;
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(buffer)
    }

    /// Assemble the `lopdf` object graph
    fn build(&self) -> Result<Document> {
        if self.pages.is_empty() {
            return Err(PdfError::SaveError("Document has no pages".to_string()));
        }

        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        // One font object per font, shared between pages
        let mut font_ids: HashMap<BuiltinFont, ObjectId> = HashMap::new();
        for font in self.pages.iter().flat_map(|p| p.fonts.values()) {
            if !font_ids.contains_key(font) {
                let id = doc.add_object(font.to_pdf_dictionary());
                font_ids.insert(*font, id);
            }
        }

        let mut kids = Vec::with_capacity(self.pages.len());
        for state in &self.pages {
            let contents_id = doc.add_object(self.content_stream(&state.content)?);

            let mut font_dict = Dictionary::new();
            for (resource_name, font) in &state.fonts {
                if let Some(id) = font_ids.get(font) {
                    font_dict.set(resource_name.as_bytes().to_vec(), Object::Reference(*id));
                }
            }
            let mut resources = Dictionary::new();
            resources.set("Font", Object::Dictionary(font_dict));

            let mut page_dict = Dictionary::new();
            page_dict.set("Type", Object::Name(b"Page".to_vec()));
            page_dict.set("Parent", Object::Reference(pages_id));
            page_dict.set(
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(state.width as f32),
                    Object::Real(state.height as f32),
                ]),
            );
            page_dict.set("Resources", Object::Dictionary(resources));
            page_dict.set("Contents", Object::Reference(contents_id));

            kids.push(Object::Reference(doc.add_object(page_dict)));
        }

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Count", Object::Integer(kids.len() as i64));
        pages_dict.set("Kids", Object::Array(kids));
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut info = Dictionary::new();
        info.set("Producer", Object::string_literal("rscomprobante"));
        if let Some(title) = &self.title {
            info.set("Title", Object::string_literal(title.as_str()));
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", Object::Reference(info_id));

        Ok(doc)
    }

    /// Wrap buffered operators in a (optionally compressed) stream
    fn content_stream(&self, content: &[u8]) -> Result<Stream> {
        if !self.compress {
            return Ok(Stream::new(Dictionary::new(), content.to_vec()));
        }

        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(content)?;
        let data = encoder.finish()?;

        let mut dict = Dictionary::new();
        dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
        let mut stream = Stream::new(dict, data);
        // Already encoded; keep lopdf from compressing it again
        stream.allows_compression = false;
        Ok(stream)
    }

    fn path_style(&self) -> PathStyle {
        PathStyle {
            stroke: self.current_draw_color,
            fill: self.current_fill_color,
            line_width: self.current_line_width,
        }
    }

    fn page(&self, page: usize) -> Result<&PageState> {
        if page == 0 || page > self.pages.len() {
            return Err(PdfError::InvalidPage(page, self.pages.len()));
        }
        Ok(&self.pages[page - 1])
    }

    /// Buffer content for a page
    fn buffer_content(&mut self, page: usize, content: &[u8]) -> Result<()> {
        self.page(page)?;
        self.pages[page - 1].content.extend_from_slice(content);
        Ok(())
    }

    /// Raw (uncompressed) operators buffered for a page
    pub fn page_content(&self, page: usize) -> Result<&[u8]> {
        Ok(&self.page(page)?.content)
    }
}
