//! Drawing surface abstraction
//!
//! Renderers never talk to a PDF library directly. They emit primitive
//! drawing calls against [`Canvas`], which is implemented by
//! [`pdf_core::PdfDocument`] and by [`RecordingCanvas`], an in-memory
//! instruction list used for testing and for parallel rendering.

use crate::{Color, Result};
use pdf_core::{Border, CellAlign, FontStyle, PdfDocument, RectStyle, StandardFont, Unit};

/// Primitive drawing vocabulary
///
/// Coordinates are in page units with the origin at the top-left corner;
/// font sizes are in points.
pub trait Canvas {
    fn set_font(&mut self, family: &str, style: FontStyle, size: f64) -> Result<()>;

    fn set_text_color(&mut self, color: Color) -> Result<()>;

    fn set_fill_color(&mut self, color: Color) -> Result<()>;

    fn set_draw_color(&mut self, color: Color) -> Result<()>;

    fn set_line_width(&mut self, width: f64) -> Result<()>;

    /// Move the current position
    fn move_to(&mut self, x: f64, y: f64) -> Result<()>;

    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: RectStyle) -> Result<()>;

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()>;

    /// Wrapped text at the current position, one `line_height` per line
    fn draw_multi_line_text(
        &mut self,
        width: f64,
        line_height: f64,
        text: &str,
        border: Border,
        align: CellAlign,
        filled: bool,
    ) -> Result<()>;

    /// Single-line cell at the current position
    fn draw_cell(
        &mut self,
        width: f64,
        height: f64,
        text: &str,
        border: Border,
        align: CellAlign,
        filled: bool,
    ) -> Result<()>;

    /// Width of `text` in the current font, in page units
    fn measure_text_width(&self, text: &str) -> Result<f64>;
}

/// A recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SetFont {
        family: String,
        style: FontStyle,
        size: f64,
    },
    SetTextColor(Color),
    SetFillColor(Color),
    SetDrawColor(Color),
    SetLineWidth(f64),
    MoveTo {
        x: f64,
        y: f64,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        style: RectStyle,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    MultiLineText {
        width: f64,
        line_height: f64,
        text: String,
        border: Border,
        align: CellAlign,
        filled: bool,
    },
    Cell {
        width: f64,
        height: f64,
        text: String,
        border: Border,
        align: CellAlign,
        filled: bool,
    },
}

impl DrawOp {
    /// Replay this call against another canvas
    pub fn apply(&self, canvas: &mut dyn Canvas) -> Result<()> {
        match self {
            DrawOp::SetFont { family, style, size } => canvas.set_font(family, *style, *size),
            DrawOp::SetTextColor(c) => canvas.set_text_color(*c),
            DrawOp::SetFillColor(c) => canvas.set_fill_color(*c),
            DrawOp::SetDrawColor(c) => canvas.set_draw_color(*c),
            DrawOp::SetLineWidth(w) => canvas.set_line_width(*w),
            DrawOp::MoveTo { x, y } => canvas.move_to(*x, *y),
            DrawOp::Rect { x, y, w, h, style } => canvas.draw_rect(*x, *y, *w, *h, *style),
            DrawOp::Line { x1, y1, x2, y2 } => canvas.draw_line(*x1, *y1, *x2, *y2),
            DrawOp::MultiLineText {
                width,
                line_height,
                text,
                border,
                align,
                filled,
            } => canvas.draw_multi_line_text(*width, *line_height, text, *border, *align, *filled),
            DrawOp::Cell {
                width,
                height,
                text,
                border,
                align,
                filled,
            } => canvas.draw_cell(*width, *height, text, *border, *align, *filled),
        }
    }
}

/// Replay a list of calls in order, stopping at the first failure
pub fn replay(ops: &[DrawOp], canvas: &mut dyn Canvas) -> Result<()> {
    ops.iter().try_for_each(|op| op.apply(canvas))
}

/// Canvas that records every call instead of drawing
///
/// Text is measured with the same standard-font metrics the PDF canvas uses,
/// so layouts computed against a recording match the real document.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    unit: Unit,
    font: Option<(StandardFont, FontStyle, f64)>,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new(unit: Unit) -> Self {
        Self {
            unit,
            font: None,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Drop recorded calls and the selected font
    pub fn clear(&mut self) {
        self.ops.clear();
        self.font = None;
    }
}

impl Canvas for RecordingCanvas {
    fn set_font(&mut self, family: &str, style: FontStyle, size: f64) -> Result<()> {
        let font = StandardFont::from_family(family)?;
        self.font = Some((font, style, size));
        self.ops.push(DrawOp::SetFont {
            family: family.to_string(),
            style,
            size,
        });
        Ok(())
    }

    fn set_text_color(&mut self, color: Color) -> Result<()> {
        self.ops.push(DrawOp::SetTextColor(color));
        Ok(())
    }

    fn set_fill_color(&mut self, color: Color) -> Result<()> {
        self.ops.push(DrawOp::SetFillColor(color));
        Ok(())
    }

    fn set_draw_color(&mut self, color: Color) -> Result<()> {
        self.ops.push(DrawOp::SetDrawColor(color));
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) -> Result<()> {
        self.ops.push(DrawOp::SetLineWidth(width));
        Ok(())
    }

    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.ops.push(DrawOp::MoveTo { x, y });
        Ok(())
    }

    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: RectStyle) -> Result<()> {
        self.ops.push(DrawOp::Rect { x, y, w, h, style });
        Ok(())
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2 });
        Ok(())
    }

    fn draw_multi_line_text(
        &mut self,
        width: f64,
        line_height: f64,
        text: &str,
        border: Border,
        align: CellAlign,
        filled: bool,
    ) -> Result<()> {
        self.ops.push(DrawOp::MultiLineText {
            width,
            line_height,
            text: text.to_string(),
            border,
            align,
            filled,
        });
        Ok(())
    }

    fn draw_cell(
        &mut self,
        width: f64,
        height: f64,
        text: &str,
        border: Border,
        align: CellAlign,
        filled: bool,
    ) -> Result<()> {
        self.ops.push(DrawOp::Cell {
            width,
            height,
            text: text.to_string(),
            border,
            align,
            filled,
        });
        Ok(())
    }

    fn measure_text_width(&self, text: &str) -> Result<f64> {
        let (font, style, size) = self.font.ok_or(pdf_core::PdfError::NoFontSelected)?;
        Ok(font.text_width_points(style, text, size) / self.unit.scale())
    }
}

impl Canvas for PdfDocument {
    fn set_font(&mut self, family: &str, style: FontStyle, size: f64) -> Result<()> {
        PdfDocument::set_font(self, family, style, size)?;
        Ok(())
    }

    fn set_text_color(&mut self, color: Color) -> Result<()> {
        PdfDocument::set_text_color(self, color.into());
        Ok(())
    }

    fn set_fill_color(&mut self, color: Color) -> Result<()> {
        PdfDocument::set_fill_color(self, color.into());
        Ok(())
    }

    fn set_draw_color(&mut self, color: Color) -> Result<()> {
        PdfDocument::set_draw_color(self, color.into());
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) -> Result<()> {
        PdfDocument::set_line_width(self, width);
        Ok(())
    }

    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.set_xy(x, y);
        Ok(())
    }

    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: RectStyle) -> Result<()> {
        self.rect(x, y, w, h, style);
        Ok(())
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        self.line(x1, y1, x2, y2);
        Ok(())
    }

    fn draw_multi_line_text(
        &mut self,
        width: f64,
        line_height: f64,
        text: &str,
        border: Border,
        align: CellAlign,
        filled: bool,
    ) -> Result<()> {
        self.multi_cell(width, line_height, text, &border, align, filled)?;
        Ok(())
    }

    fn draw_cell(
        &mut self,
        width: f64,
        height: f64,
        text: &str,
        border: Border,
        align: CellAlign,
        filled: bool,
    ) -> Result<()> {
        self.cell(width, height, text, &border, align, filled)?;
        Ok(())
    }

    fn measure_text_width(&self, text: &str) -> Result<f64> {
        Ok(self.get_string_width(text)?)
    }
}
