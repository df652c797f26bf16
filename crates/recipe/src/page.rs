//! Page settings resolution

use crate::{Color, Frame, PageSettings, RecipeError};
use pdf_core::Unit;
use std::path::PathBuf;

/// A4 width in points
pub const DEFAULT_PAGE_WIDTH_PT: f64 = 595.28;
/// A4 height in points
pub const DEFAULT_PAGE_HEIGHT_PT: f64 = 841.89;
pub const DEFAULT_SIDE_MARGIN_PT: f64 = 28.3;
pub const DEFAULT_TOP_MARGIN_PT: f64 = 42.5;
/// Distance above the bottom edge at which a new page starts
pub const PAGE_BREAK_MARGIN: f64 = 2.0;
/// Line width used when a shape style leaves it unset (0.2 mm)
pub const DEFAULT_LINE_WIDTH_PT: f64 = 0.567;
pub const DEFAULT_PDF_NAME: &str = "example_pdf";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "P" | "p" => Some(Orientation::Portrait),
            "L" | "l" => Some(Orientation::Landscape),
            _ => None,
        }
    }
}

/// Page geometry with every default applied
///
/// All lengths are in [`PageLayout::unit`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    orientation: Orientation,
    unit: Unit,
    width: f64,
    height: f64,
    side_margin: f64,
    top_margin: f64,
    watermark: Option<Color>,
    output_path: PathBuf,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::resolve(&PageSettings::default())
    }
}

impl PageLayout {
    /// Apply defaults to recipe page settings
    ///
    /// Invalid values are logged and replaced with their defaults.
    pub fn resolve(settings: &PageSettings) -> Self {
        let orientation = match settings.page_orientation.as_deref() {
            None => Orientation::Portrait,
            Some(code) => Orientation::parse(code).unwrap_or_else(|| {
                warn_default("page orientation", code);
                Orientation::Portrait
            }),
        };

        let unit = match settings.page_units.as_deref() {
            None => Unit::Pt,
            Some(code) => Unit::parse(code).unwrap_or_else(|| {
                warn_default("page units", code);
                Unit::Pt
            }),
        };

        let positive = |value: Option<f64>, what: &str, default_pt: f64| match value {
            Some(v) if v > 0.0 => v,
            Some(v) => {
                warn_default(what, &v.to_string());
                unit.from_points(default_pt)
            }
            None => unit.from_points(default_pt),
        };
        let non_negative = |value: Option<f64>, what: &str, default_pt: f64| match value {
            Some(v) if v >= 0.0 => v,
            Some(v) => {
                warn_default(what, &v.to_string());
                unit.from_points(default_pt)
            }
            None => unit.from_points(default_pt),
        };

        let mut width = positive(settings.page_width, "page width", DEFAULT_PAGE_WIDTH_PT);
        let mut height = positive(settings.page_height, "page height", DEFAULT_PAGE_HEIGHT_PT);
        if orientation == Orientation::Landscape {
            std::mem::swap(&mut width, &mut height);
        }

        let side_margin = non_negative(
            settings.page_left_and_right_margins,
            "side margin",
            DEFAULT_SIDE_MARGIN_PT,
        );
        let top_margin = non_negative(settings.page_top_margin, "top margin", DEFAULT_TOP_MARGIN_PT);

        // Red switches the watermark on; unset green and blue mean zero
        let watermark = settings
            .watermark
            .is_set()
            .then(|| settings.watermark.resolve(Color::BLACK));

        let name = settings
            .pdf_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_PDF_NAME);
        let location = settings.pdf_location.as_deref().unwrap_or("");
        let output_path = PathBuf::from(format!("{location}{name}.pdf"));

        Self {
            orientation,
            unit,
            width,
            height,
            side_margin,
            top_margin,
            watermark,
            output_path,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Page width and height
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Left and right margin
    pub fn side_margin(&self) -> f64 {
        self.side_margin
    }

    pub fn top_margin(&self) -> f64 {
        self.top_margin
    }

    /// Page background colour, if any
    pub fn watermark(&self) -> Option<Color> {
        self.watermark
    }

    /// Where the rendered document is written
    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }

    /// Page position of a frame's top-left corner
    pub fn origin(&self, frame: &Frame) -> (f64, f64) {
        (
            frame.x_position + self.side_margin,
            frame.y_position + self.top_margin,
        )
    }

    /// Default stroke width in page units
    pub fn default_line_width(&self) -> f64 {
        self.unit.from_points(DEFAULT_LINE_WIDTH_PT)
    }
}

fn warn_default(what: &str, value: &str) {
    log::warn!(
        "{}; using default",
        RecipeError::Configuration(format!("invalid {what} '{value}'"))
    );
}
