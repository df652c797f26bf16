//! Recipe rendering

use crate::blocks::{render_table, render_text_block, render_vertical_bar, RenderContext};
use crate::canvas::{replay, Canvas, DrawOp, RecordingCanvas};
use crate::{ContentItem, Dataset, PageLayout, Recipe, RecipeError, Result, StyleResolver};
use pdf_core::{PdfDocument, RectStyle};
use rayon::prelude::*;

/// What to do when an item names a data source the dataset lacks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BindingMode {
    /// Draw nothing for the item
    #[default]
    Lenient,
    /// Skip the item with a binding error
    Strict,
}

/// Rendering behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub binding_mode: BindingMode,
    /// Compute each item's drawing calls on the rayon pool, then replay them in order
    pub parallel: bool,
}

/// An item that failed and was left out of the document
#[derive(Debug)]
pub struct SkippedItem {
    /// Position in the recipe's content list
    pub index: usize,
    pub item_type: &'static str,
    pub error: RecipeError,
}

/// Outcome of rendering every item of a recipe
#[derive(Debug, Default)]
pub struct RenderReport {
    /// Indices of items that were drawn, in recipe order
    pub rendered: Vec<usize>,
    /// Items that failed, in recipe order
    pub skipped: Vec<SkippedItem>,
}

impl RenderReport {
    /// Whether every item rendered
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Recipe renderer
///
/// Dispatches each content item, in order, to the renderer for its type.
/// A failing item is logged and skipped; the rest of the document still renders.
pub struct RecipeRenderer<'a> {
    /// The recipe to render
    recipe: &'a Recipe,
    /// Series the recipe's items are bound to
    dataset: &'a Dataset,
    page: PageLayout,
    styles: StyleResolver,
    options: RenderOptions,
}

impl<'a> RecipeRenderer<'a> {
    /// Create a new renderer for a recipe
    pub fn new(recipe: &'a Recipe, dataset: &'a Dataset) -> Self {
        Self {
            recipe,
            dataset,
            page: PageLayout::resolve(&recipe.pdf_settings),
            styles: StyleResolver::default(),
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the body and header style defaults
    pub fn with_styles(mut self, styles: StyleResolver) -> Self {
        self.styles = styles;
        self
    }

    /// Resolved page settings
    pub fn page(&self) -> &PageLayout {
        &self.page
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.page, self.dataset, &self.styles)
            .with_binding_mode(self.options.binding_mode)
    }

    /// Render a single item
    pub fn render_item(&self, canvas: &mut dyn Canvas, item: &ContentItem) -> Result<()> {
        let ctx = self.context();
        match item {
            ContentItem::TextBlock(b) => render_text_block(canvas, b, &ctx),
            ContentItem::Table(b) => render_table(canvas, b, &ctx),
            ContentItem::VerticalBar(b) => render_vertical_bar(canvas, b, &ctx),
            ContentItem::Unsupported => Err(RecipeError::InvalidInput(
                "unsupported item type".to_string(),
            )),
        }
    }

    /// Render every item of the recipe into `canvas`
    ///
    /// Items are drawn in recipe order. Each item is recorded first and
    /// replayed only if it rendered in full, so an item that fails leaves
    /// nothing behind. Unsupported item types and failed items are listed in
    /// the report.
    pub fn render(&self, canvas: &mut dyn Canvas) -> RenderReport {
        let mut report = RenderReport::default();

        if self.options.parallel {
            let unit = self.page.unit();
            let recorded: Vec<Result<Vec<DrawOp>>> = self
                .recipe
                .pdf_contents
                .par_iter()
                .map(|item| {
                    let mut recording = RecordingCanvas::new(unit);
                    self.render_item(&mut recording, item)
                        .map(|_| recording.into_ops())
                })
                .collect();

            for (index, (item, ops)) in self.recipe.pdf_contents.iter().zip(recorded).enumerate() {
                let result = match ops {
                    Ok(ops) => replay(&ops, canvas),
                    Err(error) => Err(error),
                };
                self.record(&mut report, index, item, result);
            }
        } else {
            let mut recording = RecordingCanvas::new(self.page.unit());
            for (index, item) in self.recipe.pdf_contents.iter().enumerate() {
                recording.clear();
                let result = self
                    .render_item(&mut recording, item)
                    .and_then(|_| replay(recording.ops(), canvas));
                self.record(&mut report, index, item, result);
            }
        }

        log::info!(
            "rendered {} of {} items",
            report.rendered.len(),
            self.recipe.pdf_contents.len()
        );
        report
    }

    fn record(&self, report: &mut RenderReport, index: usize, item: &ContentItem, result: Result<()>) {
        match result {
            Ok(()) => {
                log::debug!("item {} ({}) rendered", index, item.item_type());
                report.rendered.push(index);
            }
            Err(error) => {
                match item.binding() {
                    Some(binding) => log::warn!(
                        "item {} ({} of '{}') skipped: {}",
                        index,
                        item.item_type(),
                        binding.data_source,
                        error
                    ),
                    None => log::warn!("item {} ({}) skipped: {}", index, item.item_type(), error),
                }
                report.skipped.push(SkippedItem {
                    index,
                    item_type: item.item_type(),
                    error,
                });
            }
        }
    }

    /// Render the recipe into a new PDF document
    ///
    /// The page is set up from the resolved page settings and, when
    /// configured, filled with the watermark colour before any item is drawn.
    pub fn render_document(&self) -> Result<(PdfDocument, RenderReport)> {
        let (width, height) = self.page.size();
        let mut doc = PdfDocument::new(self.page.unit(), width, height);
        doc.set_margins(
            self.page.side_margin(),
            self.page.top_margin(),
            self.page.side_margin(),
        );
        doc.set_auto_page_break(true, crate::page::PAGE_BREAK_MARGIN);

        if let Some(colour) = self.page.watermark() {
            doc.set_fill_color(colour.into());
            doc.rect(0.0, 0.0, width, height, RectStyle::Fill);
        }

        let report = self.render(&mut doc);
        Ok((doc, report))
    }

    /// Render the recipe and serialise the PDF
    pub fn render_to_bytes(&self) -> Result<Vec<u8>> {
        let (doc, _) = self.render_document()?;
        Ok(doc.to_bytes()?)
    }

    /// Render the recipe and write it to the configured output path
    pub fn save(&self) -> Result<RenderReport> {
        let (doc, report) = self.render_document()?;
        doc.save(self.page.output_path())?;
        log::info!("saved {}", self.page.output_path().display());
        Ok(report)
    }
}
