//! PDF Core - Low-level PDF canvas
//!
//! This crate provides functionality for:
//! - Creating PDF documents with pages in points, millimetres, centimetres or inches
//! - Selecting the standard (base-14) fonts and measuring text with their metrics
//! - Drawing rectangles, lines, single-line cells and wrapped multi-line cells
//! - Saving the result to a file or to bytes
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{CellAlign, Border, PdfDocument, Unit};
//!
//! let mut doc = PdfDocument::new(Unit::Mm, 210.0, 297.0);
//! doc.set_font("Helvetica", FontStyle::Bold, 12.0)?;
//! doc.set_xy(20.0, 20.0);
//! doc.cell(60.0, 8.0, "Hello, World!", &Border::all(), CellAlign::default(), false)?;
//! doc.save("output.pdf")?;
//! ```

mod document;
mod font;
mod text;

pub use document::{Color, PdfDocument};
pub use font::{FontStyle, StandardFont};
pub use text::{encode_win_ansi, wrap_text_to_width};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("No font selected")]
    NoFontSelected,

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Measurement unit of a document's user space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Unit {
    #[default]
    Pt,
    Mm,
    Cm,
    In,
}

impl Unit {
    /// Parse a unit code (`pt`, `mm`, `cm`, `in`)
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "pt" => Some(Unit::Pt),
            "mm" => Some(Unit::Mm),
            "cm" => Some(Unit::Cm),
            "in" => Some(Unit::In),
            _ => None,
        }
    }

    /// Number of points in one unit
    pub fn scale(self) -> f64 {
        match self {
            Unit::Pt => 1.0,
            Unit::Mm => 72.0 / 25.4,
            Unit::Cm => 72.0 / 2.54,
            Unit::In => 72.0,
        }
    }

    /// Convert a length in points into this unit
    pub fn from_points(self, points: f64) -> f64 {
        points / self.scale()
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment inside a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
    Baseline,
}

/// Combined cell alignment, written as two letters such as `"CM"` or `"LT"`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellAlign {
    pub horizontal: Align,
    pub vertical: VAlign,
}

impl CellAlign {
    pub fn new(horizontal: Align, vertical: VAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Parse an alignment code; each axis may be given at most once, in any order
    pub fn parse(code: &str) -> Option<Self> {
        let mut horizontal = None;
        let mut vertical = None;

        for ch in code.chars() {
            let (slot_h, slot_v) = match ch.to_ascii_uppercase() {
                'L' => (Some(Align::Left), None),
                'C' => (Some(Align::Center), None),
                'R' => (Some(Align::Right), None),
                'T' => (None, Some(VAlign::Top)),
                'M' => (None, Some(VAlign::Middle)),
                'B' => (None, Some(VAlign::Bottom)),
                'A' => (None, Some(VAlign::Baseline)),
                _ => return None,
            };
            if let Some(h) = slot_h {
                if horizontal.replace(h).is_some() {
                    return None;
                }
            }
            if let Some(v) = slot_v {
                if vertical.replace(v).is_some() {
                    return None;
                }
            }
        }

        Some(Self {
            horizontal: horizontal.unwrap_or_default(),
            vertical: vertical.unwrap_or_default(),
        })
    }

    /// Canonical two-letter code
    pub fn code(&self) -> String {
        let h = match self.horizontal {
            Align::Left => 'L',
            Align::Center => 'C',
            Align::Right => 'R',
        };
        let v = match self.vertical {
            VAlign::Top => 'T',
            VAlign::Middle => 'M',
            VAlign::Bottom => 'B',
            VAlign::Baseline => 'A',
        };
        format!("{h}{v}")
    }
}

/// Which edges of a cell get a border line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Border {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl Border {
    /// No border
    pub fn none() -> Self {
        Self::default()
    }

    /// Full frame
    pub fn all() -> Self {
        Self {
            left: true,
            top: true,
            right: true,
            bottom: true,
        }
    }

    /// Parse a border code: `"0"` or `""` for none, `"1"` for a frame, or letters from `LTRB`
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "" | "0" => return Some(Self::none()),
            "1" => return Some(Self::all()),
            _ => {}
        }

        let mut border = Self::none();
        for ch in code.chars() {
            match ch.to_ascii_uppercase() {
                'L' => border.left = true,
                'T' => border.top = true,
                'R' => border.right = true,
                'B' => border.bottom = true,
                _ => return None,
            }
        }
        Some(border)
    }

    pub fn is_none(&self) -> bool {
        !(self.left || self.top || self.right || self.bottom)
    }

    pub fn is_full(&self) -> bool {
        self.left && self.top && self.right && self.bottom
    }

    /// Canonical code, the inverse of [`Border::parse`]
    pub fn code(&self) -> String {
        if self.is_none() {
            return "0".to_string();
        }
        if self.is_full() {
            return "1".to_string();
        }
        let mut code = String::new();
        for (set, ch) in [
            (self.left, 'L'),
            (self.top, 'T'),
            (self.right, 'R'),
            (self.bottom, 'B'),
        ] {
            if set {
                code.push(ch);
            }
        }
        code
    }
}

/// How a rectangle is painted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RectStyle {
    /// Outline only (`D`)
    #[default]
    Draw,
    /// Fill only (`F`)
    Fill,
    /// Fill and outline (`FD` or `DF`)
    FillDraw,
}

impl RectStyle {
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "D" => Some(RectStyle::Draw),
            "F" => Some(RectStyle::Fill),
            "FD" | "DF" => Some(RectStyle::FillDraw),
            _ => None,
        }
    }

    /// PDF painting operator
    pub fn operator(self) -> &'static str {
        match self {
            RectStyle::Draw => "S",
            RectStyle::Fill => "f",
            RectStyle::FillDraw => "B",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_default() {
        assert_eq!(Align::default(), Align::Left);
        assert_eq!(CellAlign::default().code(), "LM");
    }

    #[test]
    fn test_cell_align_parse() {
        assert_eq!(
            CellAlign::parse("CM"),
            Some(CellAlign::new(Align::Center, VAlign::Middle))
        );
        assert_eq!(
            CellAlign::parse("br"),
            Some(CellAlign::new(Align::Right, VAlign::Bottom))
        );
        assert_eq!(
            CellAlign::parse("C"),
            Some(CellAlign::new(Align::Center, VAlign::Middle))
        );
        assert_eq!(CellAlign::parse("LR"), None);
        assert_eq!(CellAlign::parse("X"), None);
    }

    #[test]
    fn test_border_codes() {
        assert!(Border::parse("0").unwrap().is_none());
        assert!(Border::parse("").unwrap().is_none());
        assert!(Border::parse("1").unwrap().is_full());
        let lb = Border::parse("LB").unwrap();
        assert!(lb.left && lb.bottom && !lb.top && !lb.right);
        assert_eq!(lb.code(), "LB");
        assert_eq!(Border::parse("LTRB").unwrap().code(), "1");
        assert_eq!(Border::parse("Q"), None);
    }

    #[test]
    fn test_rect_style() {
        assert_eq!(RectStyle::parse("fd"), Some(RectStyle::FillDraw));
        assert_eq!(RectStyle::parse("DF"), Some(RectStyle::FillDraw));
        assert_eq!(RectStyle::parse("F").unwrap().operator(), "f");
        assert_eq!(RectStyle::parse("nope"), None);
    }

    #[test]
    fn test_unit_scale() {
        assert_eq!(Unit::Pt.scale(), 1.0);
        assert_eq!(Unit::In.scale(), 72.0);
        assert_eq!(Unit::parse("mm"), Some(Unit::Mm));
        assert_eq!(Unit::parse("px"), None);
        assert!((Unit::Mm.from_points(72.0) - 25.4).abs() < 1e-9);
    }
}
