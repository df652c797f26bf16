//! Dataset types and field extraction
//!
//! A dataset is a JSON array of named series:
//!
//! ```json
//! [{ "dataSource": "sales", "dataPoints": [{ "month": "Jan", "volume": 12 }] }]
//! ```

use crate::{DataBinding, RecipeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single field value of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    /// Booleans, nulls, arrays and objects
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short type name for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "text",
            FieldValue::Other(serde_json::Value::Bool(_)) => "boolean",
            FieldValue::Other(serde_json::Value::Null) => "null",
            FieldValue::Other(serde_json::Value::Array(_)) => "array",
            FieldValue::Other(_) => "object",
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// Field name to value
pub type DataRecord = BTreeMap<String, FieldValue>;

/// Named, ordered list of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSeries {
    pub data_source: String,

    #[serde(default)]
    pub data_points: Vec<DataRecord>,
}

/// Category/value pair extracted from one record
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub category: String,
    pub value: f64,
}

impl DataSeries {
    pub fn new(name: &str) -> Self {
        Self {
            data_source: name.to_string(),
            data_points: Vec::new(),
        }
    }

    /// Append a record built from `(field, value)` pairs
    pub fn with_record<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let record = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.data_points.push(record);
        self
    }

    pub fn len(&self) -> usize {
        self.data_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_points.is_empty()
    }

    fn field<'a>(&'a self, index: usize, record: &'a DataRecord, name: &str) -> Result<&'a FieldValue> {
        record.get(name).ok_or_else(|| {
            RecipeError::DataBinding(format!(
                "series '{}' record {}: field '{}' is missing",
                self.data_source, index, name
            ))
        })
    }

    /// Category label of record `index`; the field must be text
    pub fn category(&self, index: usize, field: &str) -> Result<&str> {
        let record = self.record(index)?;
        let value = self.field(index, record, field)?;
        value.as_text().ok_or_else(|| {
            RecipeError::DataBinding(format!(
                "series '{}' record {}: field '{}' should be text, found {}",
                self.data_source,
                index,
                field,
                value.kind()
            ))
        })
    }

    /// Numeric value of record `index`; the field must be a finite number
    pub fn value(&self, index: usize, field: &str) -> Result<f64> {
        let record = self.record(index)?;
        let value = self.field(index, record, field)?;
        match value.as_number() {
            Some(n) if n.is_finite() => Ok(n),
            _ => Err(RecipeError::DataBinding(format!(
                "series '{}' record {}: field '{}' should be a number, found {}",
                self.data_source,
                index,
                field,
                value.kind()
            ))),
        }
    }

    fn record(&self, index: usize) -> Result<&DataRecord> {
        self.data_points.get(index).ok_or_else(|| {
            RecipeError::DataBinding(format!(
                "series '{}' has no record {}",
                self.data_source, index
            ))
        })
    }

    /// Extract every record as a category/value pair
    ///
    /// Fails on the first record whose fields are missing or mistyped, so a
    /// caller that extracts before drawing never draws a partial item.
    pub fn points(&self, binding: &DataBinding) -> Result<Vec<DataPoint>> {
        (0..self.data_points.len())
            .map(|i| {
                Ok(DataPoint {
                    category: self.category(i, &binding.data_series_category)?.to_string(),
                    value: self.value(i, &binding.data_series)?,
                })
            })
            .collect()
    }
}

/// All series available to a recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    pub series: Vec<DataSeries>,
}

impl Dataset {
    pub fn new(series: Vec<DataSeries>) -> Self {
        Self { series }
    }

    /// First series with the given name
    pub fn find(&self, name: &str) -> Option<&DataSeries> {
        self.series.iter().find(|s| s.data_source == name)
    }
}
