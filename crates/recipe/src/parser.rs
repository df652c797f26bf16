//! Recipe and dataset JSON parsing

use crate::{Dataset, Recipe, RecipeError, Result};

/// Parse a recipe from JSON string
pub fn parse_recipe(json: &str) -> Result<Recipe> {
    serde_json::from_str(json).map_err(|e| RecipeError::ParseError(e.to_string()))
}

/// Parse a dataset (array of named series) from JSON string
pub fn parse_dataset(json: &str) -> Result<Dataset> {
    serde_json::from_str(json).map_err(|e| RecipeError::ParseError(e.to_string()))
}

/// Format a table value with no decimal places
pub fn format_value(value: f64) -> String {
    let s = format!("{value:.0}");
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}
