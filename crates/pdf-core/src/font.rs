//! Standard (base-14) font handling for PDF documents
//!
//! The standard fonts are never embedded; a reader supplies them. Their
//! advance widths (in 1/1000 em) are still needed to measure and wrap text.

use crate::{PdfError, Result};
use lopdf::{Dictionary, Object};

/// Font style flags, written as `""`, `"B"`, `"I"`, `"BI"` or `"IB"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    /// Parse a style code. Anything outside the enumerated set is rejected.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "" => Some(FontStyle::Regular),
            "B" => Some(FontStyle::Bold),
            "I" => Some(FontStyle::Italic),
            "BI" | "IB" => Some(FontStyle::BoldItalic),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            FontStyle::Regular => "",
            FontStyle::Bold => "B",
            FontStyle::Italic => "I",
            FontStyle::BoldItalic => "BI",
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }
}

/// Standard font families every PDF reader provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    Times,
    Courier,
    Symbol,
    ZapfDingbats,
}

impl StandardFont {
    /// Look up a family by name (case-insensitive, `Arial` maps to Helvetica)
    pub fn from_family(family: &str) -> Result<Self> {
        match family.trim().to_ascii_lowercase().as_str() {
            "helvetica" | "arial" => Ok(StandardFont::Helvetica),
            "times" | "times-roman" => Ok(StandardFont::Times),
            "courier" => Ok(StandardFont::Courier),
            "symbol" => Ok(StandardFont::Symbol),
            "zapfdingbats" => Ok(StandardFont::ZapfDingbats),
            _ => Err(PdfError::FontNotFound(family.to_string())),
        }
    }

    /// PostScript name of the variant, e.g. `Helvetica-BoldOblique`
    pub fn base_font_name(self, style: FontStyle) -> &'static str {
        match (self, style) {
            (StandardFont::Helvetica, FontStyle::Regular) => "Helvetica",
            (StandardFont::Helvetica, FontStyle::Bold) => "Helvetica-Bold",
            (StandardFont::Helvetica, FontStyle::Italic) => "Helvetica-Oblique",
            (StandardFont::Helvetica, FontStyle::BoldItalic) => "Helvetica-BoldOblique",
            (StandardFont::Times, FontStyle::Regular) => "Times-Roman",
            (StandardFont::Times, FontStyle::Bold) => "Times-Bold",
            (StandardFont::Times, FontStyle::Italic) => "Times-Italic",
            (StandardFont::Times, FontStyle::BoldItalic) => "Times-BoldItalic",
            (StandardFont::Courier, FontStyle::Regular) => "Courier",
            (StandardFont::Courier, FontStyle::Bold) => "Courier-Bold",
            (StandardFont::Courier, FontStyle::Italic) => "Courier-Oblique",
            (StandardFont::Courier, FontStyle::BoldItalic) => "Courier-BoldOblique",
            (StandardFont::Symbol, _) => "Symbol",
            (StandardFont::ZapfDingbats, _) => "ZapfDingbats",
        }
    }

    /// Advance width of a character in 1/1000 em
    pub fn char_width(self, style: FontStyle, c: char) -> u16 {
        let table = match self {
            StandardFont::Helvetica if style.is_bold() => &HELVETICA_BOLD_WIDTHS,
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            // Bold and italic Times cuts differ only slightly from the roman one
            StandardFont::Times | StandardFont::Symbol => &TIMES_ROMAN_WIDTHS,
            StandardFont::Courier => return 600,
            StandardFont::ZapfDingbats => return 788,
        };

        let code = c as u32;
        if (32..=126).contains(&code) {
            table[(code - 32) as usize]
        } else {
            // Latin-1 supplement and substituted characters
            table[('o' as u32 - 32) as usize]
        }
    }

    /// Width of `text` in points at `size`
    pub fn text_width_points(self, style: FontStyle, text: &str, size: f64) -> f64 {
        let units: u32 = text
            .chars()
            .map(|c| self.char_width(style, c) as u32)
            .sum();
        units as f64 * size / 1000.0
    }

    /// Type1 font dictionary for the variant
    pub fn to_pdf_dictionary(self, style: FontStyle) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"Font".to_vec()));
        dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        dict.set(
            "BaseFont",
            Object::Name(self.base_font_name(style).as_bytes().to_vec()),
        );
        if !matches!(self, StandardFont::Symbol | StandardFont::ZapfDingbats) {
            dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        }
        dict
    }
}

/// Helvetica and Helvetica-Oblique, characters 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold and Helvetica-BoldOblique, characters 32..=126
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Times-Roman, characters 32..=126
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278, // ' '..'/'
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, // '0'..'9'
    278, 278, 564, 564, 564, 444, 921, // ':'..'@'
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, // 'A'..'M'
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, // 'N'..'Z'
    333, 278, 333, 469, 500, 333, // '['..'`'
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, // 'a'..'m'
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, // 'n'..'z'
    480, 200, 480, 541, // '{'..'~'
];
