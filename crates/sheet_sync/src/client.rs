//! Spreadsheet client seam

use serde_json::{Map, Value as JsonValue};

use crate::error::{Result, SyncError};

/// A worksheet that can be read and overwritten as a whole.
///
/// The first row of the sheet is the header; records are returned keyed by
/// header name, the same shape a spreadsheet API's "all records" call gives.
pub trait SheetClient {
    /// All data rows as header-keyed records. An empty sheet yields no records.
    fn fetch_records(&mut self) -> Result<Vec<Map<String, JsonValue>>>;

    /// Clear the sheet, then write the header and the rows
    fn overwrite(&mut self, header: &[&str], rows: Vec<Vec<JsonValue>>) -> Result<()>;
}

/// Sheet held in memory, for tests and offline use
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySheet {
    cells: Vec<Vec<JsonValue>>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sheet from raw cell rows, header first
    pub fn from_cells(cells: Vec<Vec<JsonValue>>) -> Self {
        Self { cells }
    }

    /// Raw cell rows, header first
    pub fn cells(&self) -> &[Vec<JsonValue>] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl SheetClient for MemorySheet {
    fn fetch_records(&mut self) -> Result<Vec<Map<String, JsonValue>>> {
        let Some((header, rows)) = self.cells.split_first() else {
            return Ok(Vec::new());
        };

        let names = header
            .iter()
            .map(|cell| match cell {
                JsonValue::String(s) => Ok(s.clone()),
                other => Err(SyncError::Client(format!("header cell is not text: {}", other))),
            })
            .collect::<Result<Vec<String>>>()?;

        Ok(rows
            .iter()
            .map(|row| {
                names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| {
                        let value = row.get(i).cloned().unwrap_or_else(|| JsonValue::String(String::new()));
                        (name.clone(), value)
                    })
                    .collect()
            })
            .collect())
    }

    fn overwrite(&mut self, header: &[&str], rows: Vec<Vec<JsonValue>>) -> Result<()> {
        self.cells.clear();
        self.cells
            .push(header.iter().map(|h| JsonValue::String(h.to_string())).collect());
        self.cells.extend(rows);
        Ok(())
    }
}
