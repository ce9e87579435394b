//! Flat row format shared by every import/export path
//!
//! A snapshot is the whole collection as an ordered list of [`SnapshotRow`]s.
//! The spreadsheet, JSON and CSV collaborators all speak this shape, with the
//! column order fixed by [`SNAPSHOT_HEADER`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{CatalogError, Result};
use crate::template::Template;

/// Column names in export order
pub const SNAPSHOT_HEADER: [&str; 5] = ["Number", "Title", "Category", "Description", "Code"];

/// One template as a flat record, without its store identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnapshotRow {
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub code: String,
}

impl SnapshotRow {
    /// Build a row from a loosely typed JSON object.
    ///
    /// Keys are matched case-insensitively and unknown keys are ignored.
    /// Missing fields default to empty.
    pub fn from_json_object(object: &Map<String, JsonValue>) -> Result<Self> {
        let mut row = SnapshotRow::default();

        for (key, value) in object {
            match key.to_lowercase().as_str() {
                "number" => row.number = number_from_json(value)?,
                "title" => row.title = text_from_json(key, value)?,
                "category" => row.category = text_from_json(key, value)?,
                "description" => row.description = text_from_json(key, value)?,
                "code" => row.code = text_from_json(key, value)?,
                _ => {}
            }
        }

        Ok(row)
    }

    /// Cell values in [`SNAPSHOT_HEADER`] order; an absent number is an empty cell
    pub fn to_cells(&self) -> [String; 5] {
        [
            self.number.map(|n| n.to_string()).unwrap_or_default(),
            self.title.clone(),
            self.category.clone(),
            self.description.clone(),
            self.code.clone(),
        ]
    }
}

impl From<&Template> for SnapshotRow {
    fn from(template: &Template) -> Self {
        Self {
            number: template.number,
            title: template.title.clone(),
            category: template.category.clone(),
            description: template.description.clone(),
            code: template.code.clone(),
        }
    }
}

/// Validate a JSON document as a snapshot: an array of objects.
pub fn rows_from_json(value: &JsonValue) -> Result<Vec<SnapshotRow>> {
    let items = value.as_array().ok_or_else(|| {
        CatalogError::Import(format!(
            "expected an array of records, got {}",
            json_kind(value)
        ))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            JsonValue::Object(object) => SnapshotRow::from_json_object(object),
            other => Err(CatalogError::Import(format!(
                "record {} is {}, expected an object",
                index,
                json_kind(other)
            ))),
        })
        .collect()
}

/// Parse a `Number` cell.
///
/// Spreadsheets hand numbers back as integers, floats or strings, and empty
/// cells as `""`.
pub fn parse_number_cell(cell: &str) -> Result<Option<i64>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    if let Ok(n) = cell.parse::<i64>() {
        return Ok(Some(n));
    }
    match cell.parse::<f64>() {
        Ok(f) => integral(f).map(Some),
        Err(_) => Err(CatalogError::Import(format!("invalid number: {:?}", cell))),
    }
}

fn number_from_json(value: &JsonValue) -> Result<Option<i64>> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Ok(Some(i)),
            None => integral(n.as_f64().unwrap_or(f64::NAN)).map(Some),
        },
        JsonValue::String(s) => parse_number_cell(s),
        other => Err(CatalogError::Import(format!(
            "Number must be numeric, got {}",
            json_kind(other)
        ))),
    }
}

fn integral(f: f64) -> Result<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Ok(f as i64)
    } else {
        Err(CatalogError::Import(format!("Number must be a whole number, got {}", f)))
    }
}

fn text_from_json(key: &str, value: &JsonValue) -> Result<String> {
    match value {
        JsonValue::Null => Ok(String::new()),
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        other => Err(CatalogError::Import(format!(
            "{} must be text, got {}",
            key,
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
