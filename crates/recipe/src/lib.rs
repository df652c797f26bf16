//! Recipe Engine - JSON layout recipes rendered to PDF
//!
//! This crate provides:
//! - Recipe and dataset JSON schema types
//! - Style resolution with body and header defaults
//! - Axis scaling for bar charts
//! - Block rendering (text block, two-column table, vertical bar chart)
//! - A drawing-surface abstraction with a PDF backend and a recording backend
//!
//! # Example
//!
//! ```ignore
//! use recipe::{parse_dataset, parse_recipe, RecipeRenderer};
//!
//! let recipe = parse_recipe(recipe_json)?;
//! let dataset = parse_dataset(data_json)?;
//! let renderer = RecipeRenderer::new(&recipe, &dataset);
//! let (doc, report) = renderer.render_document()?;
//! doc.save(renderer.page().output_path())?;
//! ```

pub mod axis;
pub mod blocks;
pub mod canvas;
pub mod data;
pub mod page;
pub mod parser;
mod renderer;
mod schema;
pub mod style;

pub use axis::{nice_max, AxisScale, AxisTick};
pub use canvas::{Canvas, DrawOp, RecordingCanvas};
pub use data::{DataPoint, DataRecord, DataSeries, Dataset, FieldValue};
pub use page::{Orientation, PageLayout};
pub use parser::{parse_dataset, parse_recipe};
pub use renderer::{BindingMode, RecipeRenderer, RenderOptions, RenderReport, SkippedItem};
pub use schema::*;
pub use style::{CellBorders, CellFill, ResolvedFont, StyleResolver, TextStyle};

use thiserror::Error;

/// Errors that can occur during recipe processing
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Failed to parse recipe: {0}")]
    ParseError(String),

    /// Invalid setting that has a documented fallback
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid data binding: {0}")]
    DataBinding(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Canvas error: {0}")]
    Canvas(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecipeError {
    /// Whether rendering can skip the offending item and carry on
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RecipeError::Configuration(_)
                | RecipeError::DataBinding(_)
                | RecipeError::InvalidInput(_)
                | RecipeError::Canvas(_)
        )
    }
}

/// Result type for recipe operations
pub type Result<T> = std::result::Result<T, RecipeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(RecipeError::DataBinding("x".into()).is_recoverable());
        assert!(RecipeError::InvalidInput("x".into()).is_recoverable());
        assert!(RecipeError::Canvas(pdf_core::PdfError::NoFontSelected).is_recoverable());
        assert!(!RecipeError::ParseError("x".into()).is_recoverable());
        assert!(!RecipeError::Io(std::io::Error::other("disk")).is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = RecipeError::DataBinding("field 'volume' is missing".into());
        assert_eq!(
            err.to_string(),
            "Invalid data binding: field 'volume' is missing"
        );
    }
}
