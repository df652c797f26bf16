//! WASM bindings for the recipe layout engine
//!
//! This crate provides JavaScript-friendly API for:
//! - Loading a recipe and its dataset from JSON
//! - Rendering the recipe to PDF bytes
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { PdfRecipe } from 'recipe-wasm';
//!
//! await init();
//!
//! const recipe = PdfRecipe.fromJson(recipeJson);
//! recipe.loadDataset(dataJson);
//! // or: recipe.setData([{ dataSource: "sales", dataPoints: [...] }]);
//!
//! const pdf = recipe.render();
//! console.log(recipe.lastReport());
//! ```

use recipe::{BindingMode, Dataset, Recipe, RecipeRenderer, RenderOptions, RenderReport};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serializable view of a render report
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportView {
    rendered: Vec<usize>,
    skipped: Vec<SkippedView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct SkippedView {
    index: usize,
    item_type: String,
    error: String,
}

impl From<&RenderReport> for ReportView {
    fn from(report: &RenderReport) -> Self {
        Self {
            rendered: report.rendered.clone(),
            skipped: report
                .skipped
                .iter()
                .map(|s| SkippedView {
                    index: s.index,
                    item_type: s.item_type.to_string(),
                    error: s.error.to_string(),
                })
                .collect(),
        }
    }
}

/// Recipe renderer
#[wasm_bindgen]
pub struct PdfRecipe {
    recipe: Recipe,
    dataset: Dataset,
    options: RenderOptions,
    last_report: Option<ReportView>,
}

#[wasm_bindgen]
impl PdfRecipe {
    /// Create recipe from JSON
    ///
    /// @param json - Recipe JSON string
    /// @returns PdfRecipe instance
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<PdfRecipe, JsValue> {
        let recipe = recipe::parse_recipe(json).map_err(js_error)?;
        Ok(PdfRecipe {
            recipe,
            dataset: Dataset::default(),
            options: RenderOptions::default(),
            last_report: None,
        })
    }

    /// Load the dataset from a JSON string
    ///
    /// @param json - Array of `{ dataSource, dataPoints }` objects
    #[wasm_bindgen(js_name = loadDataset)]
    pub fn load_dataset(&mut self, json: &str) -> Result<(), JsValue> {
        self.dataset = recipe::parse_dataset(json).map_err(js_error)?;
        Ok(())
    }

    /// Load the dataset from a JavaScript value
    ///
    /// @param data - Array of `{ dataSource, dataPoints }` objects
    #[wasm_bindgen(js_name = setData)]
    pub fn set_data(&mut self, data: JsValue) -> Result<(), JsValue> {
        self.dataset = serde_wasm_bindgen::from_value(data)?;
        Ok(())
    }

    /// Treat a missing data source as an error instead of drawing nothing
    #[wasm_bindgen(js_name = setStrict)]
    pub fn set_strict(&mut self, strict: bool) {
        self.options.binding_mode = if strict {
            BindingMode::Strict
        } else {
            BindingMode::Lenient
        };
    }

    /// Number of content items in the recipe
    #[wasm_bindgen(getter, js_name = itemCount)]
    pub fn item_count(&self) -> usize {
        self.recipe.pdf_contents.len()
    }

    /// The recipe as normalised JSON
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.recipe).map_err(js_error)
    }

    /// Render the recipe
    ///
    /// Items that fail are left out of the document and reported on the
    /// browser console; see `lastReport()`.
    ///
    /// @returns PDF bytes (Uint8Array)
    pub fn render(&mut self) -> Result<Vec<u8>, JsValue> {
        let renderer = RecipeRenderer::new(&self.recipe, &self.dataset).with_options(self.options);
        let (doc, report) = renderer.render_document().map_err(js_error)?;

        for skipped in &report.skipped {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "item {} ({}) skipped: {}",
                skipped.index, skipped.item_type, skipped.error
            )));
        }
        self.last_report = Some(ReportView::from(&report));

        doc.to_bytes().map_err(js_error)
    }

    /// Outcome of the last `render()` call
    ///
    /// @returns `{ rendered: number[], skipped: { index, itemType, error }[] }` or undefined
    #[wasm_bindgen(js_name = lastReport)]
    pub fn last_report(&self) -> Result<JsValue, JsValue> {
        match &self.last_report {
            Some(report) => Ok(serde_wasm_bindgen::to_value(report)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Render the recipe into a fresh `Uint8Array`
    #[wasm_bindgen(js_name = renderArray)]
    pub fn render_array(&mut self) -> Result<js_sys::Uint8Array, JsValue> {
        let bytes = self.render()?;
        Ok(js_sys::Uint8Array::from(bytes.as_slice()))
    }
}
