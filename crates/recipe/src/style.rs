//! Style resolution
//!
//! Recipes specify fonts and cell styles partially. [`StyleResolver`] merges a
//! partial [`FontSpec`] over a complete set of defaults, producing a body style
//! and a header style. Invalid values are treated as unset.

use crate::{CellBordersSpec, CellFillSpec, Color, ColorSpec, FontSpec, RecipeError, StyleSpec};
use pdf_core::{Align, Border, CellAlign, FontStyle, VAlign};

/// Cell border sides and colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBorders {
    pub style: Border,
    pub colour: Color,
}

/// Cell background
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellFill {
    pub filled: bool,
    pub colour: Color,
}

/// Fully resolved text and cell style
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub colour: Color,
    pub style: FontStyle,
    /// Font size in points
    pub size: f64,
    pub family: String,
    pub alignment: CellAlign,
    pub line_spacing: f64,
    pub cell_borders: CellBorders,
    pub cell_fill: CellFill,
}

impl TextStyle {
    /// Default style for body text and table body rows
    pub fn body_default() -> Self {
        Self {
            colour: Color::BLACK,
            style: FontStyle::Regular,
            size: 9.0,
            family: "Helvetica".to_string(),
            alignment: CellAlign::new(Align::Center, VAlign::Middle),
            line_spacing: 3.0,
            cell_borders: CellBorders {
                style: Border::all(),
                colour: Color::BLACK,
            },
            cell_fill: CellFill {
                filled: false,
                colour: Color::WHITE,
            },
        }
    }

    /// Default style for table header rows
    pub fn header_default() -> Self {
        Self {
            colour: Color::BLACK,
            style: FontStyle::Bold,
            size: 10.0,
            family: "Helvetica".to_string(),
            alignment: CellAlign::new(Align::Center, VAlign::Middle),
            line_spacing: 3.0,
            cell_borders: CellBorders {
                style: Border::none(),
                colour: Color::BLACK,
            },
            cell_fill: CellFill {
                filled: false,
                colour: Color::LIGHT_GRAY,
            },
        }
    }

    /// Height of one line of text: size plus spacing
    pub fn line_height(&self) -> f64 {
        self.size + self.line_spacing
    }

    /// Merge a partial spec over this style, field by field
    pub fn merge(&self, spec: &StyleSpec) -> TextStyle {
        let mut merged = self.clone();

        merged.colour = spec.colour.resolve(self.colour);

        if let Some(code) = spec.style.as_deref() {
            match FontStyle::parse(code) {
                Some(style) => merged.style = style,
                None => log_invalid("font style", code),
            }
        }

        if let Some(size) = spec.size {
            if size > 0.0 {
                merged.size = size;
            } else {
                log_invalid("font size", &size.to_string());
            }
        }

        if let Some(family) = spec.family.as_deref() {
            if !family.trim().is_empty() {
                merged.family = family.to_string();
            }
        }

        if let Some(code) = spec.alignment.as_deref() {
            if !code.is_empty() {
                match CellAlign::parse(code) {
                    Some(alignment) => merged.alignment = alignment,
                    None => log_invalid("alignment", code),
                }
            }
        }

        if let Some(spacing) = spec.line_spacing {
            if spacing >= 0.0 {
                merged.line_spacing = spacing;
            } else {
                log_invalid("line spacing", &spacing.to_string());
            }
        }

        if let Some(code) = spec.cell_borders.style.as_deref() {
            if !code.is_empty() {
                match Border::parse(code) {
                    Some(border) => merged.cell_borders.style = border,
                    None => log_invalid("cell border", code),
                }
            }
        }
        merged.cell_borders.colour = spec.cell_borders.colour.resolve(self.cell_borders.colour);

        // Fill can be switched on but never off
        if spec.cell_fill.filled == Some(true) {
            merged.cell_fill.filled = true;
        }
        merged.cell_fill.colour = spec.cell_fill.colour.resolve(self.cell_fill.colour);

        merged
    }

    /// Fully specified partial style that merges back to `self`
    pub fn to_spec(&self) -> StyleSpec {
        StyleSpec {
            colour: ColorSpec::from(self.colour),
            style: Some(self.style.code().to_string()),
            size: Some(self.size),
            family: Some(self.family.clone()),
            alignment: Some(self.alignment.code()),
            line_spacing: Some(self.line_spacing),
            cell_borders: CellBordersSpec {
                style: Some(self.cell_borders.style.code()),
                colour: ColorSpec::from(self.cell_borders.colour),
            },
            cell_fill: CellFillSpec {
                filled: Some(self.cell_fill.filled),
                colour: ColorSpec::from(self.cell_fill.colour),
            },
        }
    }
}

fn log_invalid(what: &str, value: &str) {
    log::warn!(
        "{}; using default",
        RecipeError::Configuration(format!("invalid {what} '{value}'"))
    );
}

/// Body and header styles of one item
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFont {
    pub body: TextStyle,
    pub header: TextStyle,
}

impl ResolvedFont {
    /// Convert back to a fully specified [`FontSpec`]
    pub fn to_spec(&self) -> FontSpec {
        FontSpec {
            body: self.body.to_spec(),
            header_font: self.header.to_spec(),
        }
    }
}

/// Merges partial font specs over body and header defaults
#[derive(Debug, Clone, PartialEq)]
pub struct StyleResolver {
    body_defaults: TextStyle,
    header_defaults: TextStyle,
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new(TextStyle::body_default(), TextStyle::header_default())
    }
}

impl StyleResolver {
    pub fn new(body_defaults: TextStyle, header_defaults: TextStyle) -> Self {
        Self {
            body_defaults,
            header_defaults,
        }
    }

    /// Resolve body and header styles
    ///
    /// The header is resolved from `spec.header_font` against the header
    /// defaults only; body settings never leak into it.
    pub fn resolve(&self, spec: &FontSpec) -> ResolvedFont {
        ResolvedFont {
            body: self.body_defaults.merge(&spec.body),
            header: self.header_defaults.merge(&spec.header_font),
        }
    }

    /// Resolve only the body style
    pub fn resolve_body(&self, spec: &FontSpec) -> TextStyle {
        self.body_defaults.merge(&spec.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_spec_gives_defaults() {
        let resolved = StyleResolver::default().resolve(&FontSpec::default());
        assert_eq!(resolved.body, TextStyle::body_default());
        assert_eq!(resolved.header, TextStyle::header_default());
        assert_eq!(resolved.body.line_height(), 12.0);
        assert_eq!(resolved.header.line_height(), 13.0);
    }

    #[test]
    fn test_partial_overrides() {
        let spec = FontSpec {
            body: StyleSpec {
                size: Some(14.0),
                style: Some("I".to_string()),
                colour: ColorSpec {
                    r: Some(200),
                    g: None,
                    b: Some(-1),
                },
                alignment: Some("LT".to_string()),
                ..Default::default()
            },
            header_font: StyleSpec {
                family: Some("Times".to_string()),
                ..Default::default()
            },
        };

        let resolved = StyleResolver::default().resolve(&spec);
        assert_eq!(resolved.body.size, 14.0);
        assert_eq!(resolved.body.style, FontStyle::Italic);
        assert_eq!(resolved.body.colour, Color::rgb(200, 0, 0));
        assert_eq!(resolved.body.alignment, CellAlign::new(Align::Left, VAlign::Top));
        assert_eq!(resolved.body.family, "Helvetica");

        assert_eq!(resolved.header.family, "Times");
        assert_eq!(resolved.header.size, 10.0);
        assert_eq!(resolved.header.style, FontStyle::Bold);
    }

    #[test]
    fn test_invalid_values_are_unset() {
        let spec = FontSpec {
            body: StyleSpec {
                size: Some(-3.0),
                style: Some("Z".to_string()),
                alignment: Some("XX".to_string()),
                line_spacing: Some(-1.0),
                cell_borders: CellBordersSpec {
                    style: Some("Q".to_string()),
                    colour: ColorSpec::default(),
                },
                ..Default::default()
            },
            ..Default::default()
        };

        let resolved = StyleResolver::default().resolve(&spec);
        assert_eq!(resolved.body, TextStyle::body_default());
    }

    #[test]
    fn test_header_does_not_inherit_body() {
        let spec = FontSpec {
            body: StyleSpec {
                size: Some(20.0),
                line_spacing: Some(8.0),
                ..Default::default()
            },
            ..Default::default()
        };

        let resolved = StyleResolver::default().resolve(&spec);
        assert_eq!(resolved.header.size, 10.0);
        assert_eq!(resolved.header.line_spacing, 3.0);
    }

    #[test]
    fn test_fill_only_switches_on() {
        let on = FontSpec {
            body: StyleSpec {
                cell_fill: CellFillSpec {
                    filled: Some(true),
                    colour: ColorSpec::rgb(1, 2, 3),
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let body = StyleResolver::default().resolve_body(&on);
        assert!(body.cell_fill.filled);
        assert_eq!(body.cell_fill.colour, Color::rgb(1, 2, 3));

        let filled_default = TextStyle {
            cell_fill: CellFill {
                filled: true,
                colour: Color::WHITE,
            },
            ..TextStyle::body_default()
        };
        let resolver = StyleResolver::new(filled_default, TextStyle::header_default());
        let off = FontSpec {
            body: StyleSpec {
                cell_fill: CellFillSpec {
                    filled: Some(false),
                    colour: ColorSpec::default(),
                },
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(resolver.resolve_body(&off).cell_fill.filled);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let resolver = StyleResolver::default();
        let specs = [
            FontSpec::default(),
            FontSpec {
                body: StyleSpec {
                    size: Some(11.5),
                    style: Some("IB".to_string()),
                    colour: ColorSpec::rgb(300, 20, 30),
                    cell_borders: CellBordersSpec {
                        style: Some("TB".to_string()),
                        colour: ColorSpec::rgb(9, 9, 9),
                    },
                    cell_fill: CellFillSpec {
                        filled: Some(true),
                        colour: ColorSpec::rgb(250, 250, 0),
                    },
                    ..Default::default()
                },
                header_font: StyleSpec {
                    alignment: Some("RB".to_string()),
                    line_spacing: Some(0.0),
                    ..Default::default()
                },
            },
        ];

        for spec in &specs {
            let once = resolver.resolve(spec);
            let twice = resolver.resolve(&once.to_spec());
            assert_eq!(once, twice);
        }
    }
}
