//! JSON snapshots: an array of records keyed by column name

use catalog::{rows_from_json, SnapshotRow};
use serde_json::Value as JsonValue;

use crate::error::Result;

/// Encode rows as a pretty-printed JSON array
pub fn encode_json(rows: &[SnapshotRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Decode a JSON document into rows.
///
/// Syntax errors surface as [`ExchangeError::Json`](crate::ExchangeError::Json);
/// well-formed JSON of the wrong shape as a catalog import error.
pub fn decode_json(text: &str) -> Result<Vec<SnapshotRow>> {
    let value: JsonValue = serde_json::from_str(text)?;
    let rows = rows_from_json(&value)?;
    tracing::debug!("Decoded {} rows from JSON", rows.len());
    Ok(rows)
}
