//! Block rendering implementations
//!
//! One renderer per content item kind. Each one sets every piece of canvas
//! state it relies on before drawing, so items never inherit fonts, colours
//! or line widths from whatever was drawn before them.

mod chart;
mod table;
mod text;

pub use chart::{render_vertical_bar, ChartGeometry};
pub use table::{render_table, TableLayout};
pub use text::render_text_block;

use crate::{
    BindingMode, Canvas, DataBinding, DataSeries, Dataset, PageLayout, RecipeError, Result,
    StyleResolver, TextStyle,
};

/// Select a style's font, text colour, cell fill colour and cell border colour
pub(crate) fn apply_text_style(canvas: &mut dyn Canvas, style: &TextStyle) -> Result<()> {
    canvas.set_font(&style.family, style.style, style.size)?;
    canvas.set_text_color(style.colour)?;
    canvas.set_fill_color(style.cell_fill.colour)?;
    canvas.set_draw_color(style.cell_borders.colour)
}

/// Everything a block renderer needs besides the canvas and the item
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub page: &'a PageLayout,
    pub dataset: &'a Dataset,
    pub styles: &'a StyleResolver,
    pub binding_mode: BindingMode,
}

impl<'a> RenderContext<'a> {
    pub fn new(page: &'a PageLayout, dataset: &'a Dataset, styles: &'a StyleResolver) -> Self {
        Self {
            page,
            dataset,
            styles,
            binding_mode: BindingMode::default(),
        }
    }

    pub fn with_binding_mode(mut self, mode: BindingMode) -> Self {
        self.binding_mode = mode;
        self
    }

    /// Look up the series an item is bound to
    ///
    /// In lenient mode a missing series yields `None` and the item draws
    /// nothing; in strict mode it is a binding error.
    pub fn series(&self, binding: &DataBinding) -> Result<Option<&'a DataSeries>> {
        match self.dataset.find(&binding.data_source) {
            Some(series) => Ok(Some(series)),
            None => match self.binding_mode {
                BindingMode::Lenient => {
                    log::info!(
                        "data source '{}' not found, item skipped",
                        binding.data_source
                    );
                    Ok(None)
                }
                BindingMode::Strict => Err(RecipeError::DataBinding(format!(
                    "data source '{}' not found",
                    binding.data_source
                ))),
            },
        }
    }
}
