//! PDF Document builder

use crate::text::{encode_win_ansi, fmt_num, generate_text_operators, wrap_text_to_width};
use crate::text::TextRenderContext;
use crate::{Align, Border, CellAlign, FontStyle, PdfError, RectStyle, Result, StandardFont};
use crate::{Unit, VAlign};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{Dictionary, Document, Object, Stream};
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

    fn operands(&self) -> String {
        format!(
            "{} {} {}",
            fmt_num(self.r as f64),
            fmt_num(self.g as f64),
            fmt_num(self.b as f64)
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Default line width: 0.2 mm
const DEFAULT_LINE_WIDTH_PT: f64 = 0.567;

/// Horizontal padding inside cells: 1 mm
const CELL_MARGIN_PT: f64 = 2.835;

/// Default page margins: 1 cm
const DEFAULT_MARGIN_PT: f64 = 28.35;

/// PDF document builder with a current-position drawing model
///
/// All coordinates and lengths are in the document unit, measured from the
/// top-left corner of the page. Font sizes are always in points.
pub struct PdfDocument {
    /// Document unit
    unit: Unit,
    /// Points per unit
    k: f64,
    /// Page width in units
    page_width: f64,
    /// Page height in units
    page_height: f64,
    /// Content operators per page
    pages: Vec<Vec<u8>>,
    /// Current position
    x: f64,
    y: f64,
    left_margin: f64,
    top_margin: f64,
    right_margin: f64,
    /// Horizontal text padding inside cells
    cell_margin: f64,
    auto_page_break: bool,
    /// Distance from the bottom edge that triggers a page break
    break_margin: f64,
    /// Current font
    current_font: Option<(StandardFont, FontStyle)>,
    /// Current font size in points
    current_font_size: f64,
    /// Resource name of the current font
    current_font_resource: Option<String>,
    current_text_color: Color,
    current_fill_color: Color,
    current_draw_color: Color,
    current_line_width: f64,
    /// Fonts used so far; resource name is `F{index + 1}`
    font_resources: Vec<(StandardFont, FontStyle)>,
}

impl PdfDocument {
    /// Create a document with one empty page
    ///
    /// # Arguments
    /// * `unit` - User-space unit for every coordinate and length
    /// * `page_width` - Page width in `unit`
    /// * `page_height` - Page height in `unit`
    pub fn new(unit: Unit, page_width: f64, page_height: f64) -> Self {
        let k = unit.scale();
        let margin = DEFAULT_MARGIN_PT / k;

        let mut doc = Self {
            unit,
            k,
            page_width,
            page_height,
            pages: Vec::new(),
            x: margin,
            y: margin,
            left_margin: margin,
            top_margin: margin,
            right_margin: margin,
            cell_margin: CELL_MARGIN_PT / k,
            auto_page_break: true,
            break_margin: 2.0 * margin,
            current_font: None,
            current_font_size: 12.0,
            current_font_resource: None,
            current_text_color: Color::black(),
            current_fill_color: Color::black(),
            current_draw_color: Color::black(),
            current_line_width: DEFAULT_LINE_WIDTH_PT / k,
            font_resources: Vec::new(),
        };
        doc.add_page();
        doc
    }

    /// Document unit
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Page size in document units
    pub fn page_size(&self) -> (f64, f64) {
        (self.page_width, self.page_height)
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Set left, top and right margins
    pub fn set_margins(&mut self, left: f64, top: f64, right: f64) {
        self.left_margin = left;
        self.top_margin = top;
        self.right_margin = right;
        if self.pages.len() == 1 && self.pages[0].is_empty() {
            self.x = left;
            self.y = top;
        }
    }

    /// Enable or disable automatic page breaks `margin` units above the bottom edge
    pub fn set_auto_page_break(&mut self, enabled: bool, margin: f64) {
        self.auto_page_break = enabled;
        self.break_margin = margin;
    }

    /// Start a new page of the same size
    ///
    /// Line width and colours carry over; the position moves to the top-left margin.
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Vec::new());
        self.x = self.left_margin;
        self.y = self.top_margin;

        if self.pages.len() > 1 {
            let restore = format!(
                "{} w\n{} RG\n{} rg\n",
                fmt_num(self.current_line_width * self.k),
                self.current_draw_color.operands(),
                self.current_fill_color.operands()
            );
            self.buffer_content(restore.as_bytes());
        }

        self.pages.len()
    }

    /// Select a standard font
    ///
    /// # Arguments
    /// * `family` - Family name (`Helvetica`, `Arial`, `Times`, `Courier`, ...)
    /// * `style` - Style flags
    /// * `size` - Size in points
    pub fn set_font(&mut self, family: &str, style: FontStyle, size: f64) -> Result<()> {
        let font = StandardFont::from_family(family)?;
        let index = match self
            .font_resources
            .iter()
            .position(|&used| used == (font, style))
        {
            Some(index) => index,
            None => {
                self.font_resources.push((font, style));
                self.font_resources.len() - 1
            }
        };

        self.current_font = Some((font, style));
        self.current_font_size = size;
        self.current_font_resource = Some(format!("F{}", index + 1));
        Ok(())
    }

    /// Current font size in points
    pub fn font_size(&self) -> f64 {
        self.current_font_size
    }

    /// Set the colour used for text
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Set the colour used to fill shapes and cells
    pub fn set_fill_color(&mut self, color: Color) {
        self.current_fill_color = color;
        let op = format!("{} rg\n", color.operands());
        self.buffer_content(op.as_bytes());
    }

    /// Set the colour used for lines, outlines and cell borders
    pub fn set_draw_color(&mut self, color: Color) {
        self.current_draw_color = color;
        let op = format!("{} RG\n", color.operands());
        self.buffer_content(op.as_bytes());
    }

    /// Set the line width in document units
    pub fn set_line_width(&mut self, width: f64) {
        self.current_line_width = width;
        let op = format!("{} w\n", fmt_num(width * self.k));
        self.buffer_content(op.as_bytes());
    }

    /// Move the current position
    pub fn set_xy(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn get_x(&self) -> f64 {
        self.x
    }

    pub fn get_y(&self) -> f64 {
        self.y
    }

    /// Draw a rectangle; a negative height extends upwards from `y`
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: RectStyle) {
        let op = format!(
            "{} {} {} {} re {}\n",
            fmt_num(x * self.k),
            fmt_num((self.page_height - y) * self.k),
            fmt_num(w * self.k),
            fmt_num(-h * self.k),
            style.operator()
        );
        self.buffer_content(op.as_bytes());
    }

    /// Draw a straight line with the current draw colour and line width
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let op = format!(
            "{} {} m {} {} l S\n",
            fmt_num(x1 * self.k),
            fmt_num((self.page_height - y1) * self.k),
            fmt_num(x2 * self.k),
            fmt_num((self.page_height - y2) * self.k)
        );
        self.buffer_content(op.as_bytes());
    }

    /// Get current font's text width for a string, in document units
    ///
    /// # Example
    /// ```ignore
    /// doc.set_font("Helvetica", FontStyle::Regular, 12.0)?;
    /// let width = doc.get_string_width("Hello")?;
    /// ```
    pub fn get_string_width(&self, text: &str) -> Result<f64> {
        let (font, style) = self.current_font.ok_or(PdfError::NoFontSelected)?;
        Ok(font.text_width_points(style, text, self.current_font_size) / self.k)
    }

    /// Draw a single-line cell at the current position
    ///
    /// The cell is `w` wide and `h` tall; the current position moves to its
    /// right edge afterwards. A zero width extends the cell to the right margin.
    pub fn cell(
        &mut self,
        w: f64,
        h: f64,
        text: &str,
        border: &Border,
        align: CellAlign,
        fill: bool,
    ) -> Result<()> {
        if h < 0.0 {
            return Err(PdfError::InvalidGeometry(format!(
                "cell height must not be negative, got {h}"
            )));
        }

        if self.auto_page_break && self.y + h > self.page_height - self.break_margin {
            let x = self.x;
            self.add_page();
            self.x = x;
        }

        let w = if w == 0.0 {
            self.page_width - self.right_margin - self.x
        } else {
            w
        };
        let (x, y) = (self.x, self.y);

        if fill || border.is_full() {
            let style = match (fill, border.is_full()) {
                (true, true) => RectStyle::FillDraw,
                (true, false) => RectStyle::Fill,
                _ => RectStyle::Draw,
            };
            self.rect(x, y, w, h, style);
        }

        if !border.is_none() && !border.is_full() {
            if border.left {
                self.line(x, y, x, y + h);
            }
            if border.top {
                self.line(x, y, x + w, y);
            }
            if border.right {
                self.line(x + w, y, x + w, y + h);
            }
            if border.bottom {
                self.line(x, y + h, x + w, y + h);
            }
        }

        if !text.is_empty() {
            self.draw_cell_text(x, y, w, h, text, align)?;
        }

        self.x = x + w;
        Ok(())
    }

    /// Draw text wrapped into lines of height `h` within width `w`
    ///
    /// The box grows downwards to fit every line. Afterwards the position is at
    /// the starting x, just below the box.
    pub fn multi_cell(
        &mut self,
        w: f64,
        h: f64,
        text: &str,
        border: &Border,
        align: CellAlign,
        fill: bool,
    ) -> Result<()> {
        let start_x = self.x;
        let w = if w == 0.0 {
            self.page_width - self.right_margin - start_x
        } else {
            w
        };

        let lines = if text.is_empty() {
            vec![String::new()]
        } else {
            let available = w - 2.0 * self.cell_margin;
            let (font, style) = self.current_font.ok_or(PdfError::NoFontSelected)?;
            let size = self.current_font_size;
            let k = self.k;
            wrap_text_to_width(text, available, |s| {
                font.text_width_points(style, s, size) / k
            })
        };

        let last = lines.len() - 1;
        for (i, line) in lines.iter().enumerate() {
            let line_border = Border {
                left: border.left,
                right: border.right,
                top: border.top && i == 0,
                bottom: border.bottom && i == last,
            };
            self.x = start_x;
            self.cell(w, h, line, &line_border, align, fill)?;
            self.y += h;
        }

        self.x = start_x;
        Ok(())
    }

    /// Place text inside a cell box according to `align`
    fn draw_cell_text(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        text: &str,
        align: CellAlign,
    ) -> Result<()> {
        let font_name = self
            .current_font_resource
            .clone()
            .ok_or(PdfError::NoFontSelected)?;
        let text_width = self.get_string_width(text)?;
        let font_size = self.current_font_size / self.k;

        let dx = match align.horizontal {
            Align::Left => self.cell_margin,
            Align::Center => (w - text_width) / 2.0,
            Align::Right => w - self.cell_margin - text_width,
        };
        let baseline = match align.vertical {
            VAlign::Top => y + 0.8 * font_size,
            VAlign::Middle => y + 0.5 * h + 0.3 * font_size,
            VAlign::Bottom => y + h - 0.2 * font_size,
            VAlign::Baseline => y + h,
        };

        let ctx = TextRenderContext {
            font_name,
            font_size: self.current_font_size,
            color: self.current_text_color,
        };
        let ops = generate_text_operators(
            &encode_win_ansi(text),
            (x + dx) * self.k,
            (self.page_height - baseline) * self.k,
            &ctx,
        );
        self.buffer_content(&ops);
        Ok(())
    }

    /// Append operators to the current page
    fn buffer_content(&mut self, content: &[u8]) {
        if let Some(page) = self.pages.last_mut() {
            page.extend_from_slice(content);
        }
    }

    /// Raw (uncompressed) content operators of a page (1-indexed)
    pub fn page_content(&self, page: usize) -> Result<&[u8]> {
        self.pages
            .get(page.wrapping_sub(1))
            .map(Vec::as_slice)
            .ok_or(PdfError::InvalidPage(page, self.pages.len()))
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

    /// Save the document to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        // 1. Font dictionaries shared by every page
        let mut font_dict = Dictionary::new();
        for (i, (font, style)) in self.font_resources.iter().enumerate() {
            let font_id = doc.add_object(font.to_pdf_dictionary(*style));
            font_dict.set(format!("F{}", i + 1).into_bytes(), Object::Reference(font_id));
        }
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(font_dict));
        let resources_id = doc.add_object(resources);

        // 2. One compressed content stream per page
        let media_box = vec![
            Object::Real(0.0),
            Object::Real(0.0),
            Object::Real((self.page_width * self.k) as f32),
            Object::Real((self.page_height * self.k) as f32),
        ];
        let mut kids = Vec::with_capacity(self.pages.len());
        for content in &self.pages {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(content)?;
            let compressed = encoder.finish()?;

            let mut stream_dict = Dictionary::new();
            stream_dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
            let contents_id = doc.add_object(Stream::new(stream_dict, compressed));

            let mut page_dict = Dictionary::new();
            page_dict.set("Type", Object::Name(b"Page".to_vec()));
            page_dict.set("Parent", Object::Reference(pages_id));
            page_dict.set("MediaBox", Object::Array(media_box.clone()));
            page_dict.set("Resources", Object::Reference(resources_id));
            page_dict.set("Contents", Object::Reference(contents_id));
            kids.push(Object::Reference(doc.add_object(page_dict)));
        }

        // 3. Page tree and catalog
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

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(doc: &PdfDocument) -> String {
        String::from_utf8_lossy(doc.page_content(1).unwrap()).into_owned()
    }

    #[test]
    fn test_color_from_rgb() {
        let c = Color::from_rgb(255, 0, 51);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_new_document_has_one_page() {
        let doc = PdfDocument::new(Unit::Pt, 595.28, 841.89);
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.page_size(), (595.28, 841.89));
    }

    #[test]
    fn test_rect_flips_y_axis() {
        let mut doc = PdfDocument::new(Unit::Pt, 200.0, 100.0);
        doc.rect(10.0, 20.0, 30.0, 40.0, RectStyle::Fill);
        assert!(content(&doc).contains("10 80 30 -40 re f"));
    }

    #[test]
    fn test_line_in_inches() {
        let mut doc = PdfDocument::new(Unit::In, 10.0, 10.0);
        doc.line(1.0, 1.0, 2.0, 1.0);
        assert!(content(&doc).contains("72 648 m 144 648 l S"));
    }

    #[test]
    fn test_string_width_requires_font() {
        let doc = PdfDocument::new(Unit::Pt, 100.0, 100.0);
        assert!(matches!(
            doc.get_string_width("x"),
            Err(PdfError::NoFontSelected)
        ));
    }

    #[test]
    fn test_string_width_in_units() {
        let mut doc = PdfDocument::new(Unit::In, 8.5, 11.0);
        doc.set_font("Courier", FontStyle::Regular, 12.0).unwrap();
        // 3 chars * 600/1000 * 12pt = 21.6pt = 0.3in
        assert!((doc.get_string_width("abc").unwrap() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_font_family() {
        let mut doc = PdfDocument::new(Unit::Pt, 100.0, 100.0);
        let err = doc.set_font("Comic Sans", FontStyle::Regular, 9.0);
        assert!(matches!(err, Err(PdfError::FontNotFound(_))));
    }

    #[test]
    fn test_cell_advances_x() {
        let mut doc = PdfDocument::new(Unit::Pt, 300.0, 300.0);
        doc.set_font("Helvetica", FontStyle::Regular, 9.0).unwrap();
        doc.set_xy(10.0, 10.0);
        doc.cell(50.0, 12.0, "A", &Border::none(), CellAlign::default(), false)
            .unwrap();
        assert_eq!(doc.get_x(), 60.0);
        assert_eq!(doc.get_y(), 10.0);
        assert!(content(&doc).contains("(A) Tj"));
    }

    #[test]
    fn test_cell_full_border_with_fill() {
        let mut doc = PdfDocument::new(Unit::Pt, 300.0, 300.0);
        doc.set_font("Helvetica", FontStyle::Regular, 9.0).unwrap();
        doc.set_xy(0.0, 0.0);
        doc.cell(50.0, 10.0, "", &Border::all(), CellAlign::default(), true)
            .unwrap();
        assert!(content(&doc).contains("0 300 50 -10 re B"));
    }

    #[test]
    fn test_cell_partial_border_draws_lines() {
        let mut doc = PdfDocument::new(Unit::Pt, 100.0, 100.0);
        doc.set_xy(0.0, 0.0);
        let border = Border::parse("B").unwrap();
        doc.cell(20.0, 10.0, "", &border, CellAlign::default(), false)
            .unwrap();
        let ops = content(&doc);
        assert!(ops.contains("0 90 m 20 90 l S"));
        assert!(!ops.contains("re"));
    }

    #[test]
    fn test_multi_cell_wraps_and_moves_down() {
        let mut doc = PdfDocument::new(Unit::Pt, 500.0, 500.0);
        doc.set_font("Courier", FontStyle::Regular, 10.0).unwrap();
        doc.set_xy(20.0, 20.0);
        // 6pt per char; 60pt wide minus 2 * 2.835pt padding leaves room for 9 chars
        doc.multi_cell(
            60.0,
            12.0,
            "aaaa bbbb cccc",
            &Border::none(),
            CellAlign::default(),
            false,
        )
        .unwrap();
        assert_eq!(doc.get_x(), 20.0);
        assert_eq!(doc.get_y(), 20.0 + 2.0 * 12.0);
    }

    #[test]
    fn test_auto_page_break() {
        let mut doc = PdfDocument::new(Unit::Pt, 100.0, 100.0);
        doc.set_auto_page_break(true, 2.0);
        doc.set_font("Helvetica", FontStyle::Regular, 9.0).unwrap();
        doc.set_xy(10.0, 90.0);
        doc.cell(20.0, 12.0, "x", &Border::none(), CellAlign::default(), false)
            .unwrap();
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_negative_cell_height_is_rejected() {
        let mut doc = PdfDocument::new(Unit::Pt, 100.0, 100.0);
        let err = doc.cell(10.0, -1.0, "", &Border::none(), CellAlign::default(), false);
        assert!(matches!(err, Err(PdfError::InvalidGeometry(_))));
    }

    #[test]
    fn test_to_bytes_produces_pdf_header() {
        let mut doc = PdfDocument::new(Unit::Pt, 100.0, 100.0);
        doc.set_font("Helvetica", FontStyle::Bold, 9.0).unwrap();
        doc.set_xy(10.0, 10.0);
        doc.cell(40.0, 10.0, "Hi", &Border::all(), CellAlign::default(), false)
            .unwrap();
        let bytes = doc.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
    }
}
