//! Snapshot files: format detection, load/save and export file names

use std::path::Path;

use catalog::SnapshotRow;
use chrono::{DateTime, Local};

use crate::csv_format::{decode_csv, detect_delimiter, encode_csv, CsvConfig};
use crate::error::{ExchangeError, Result};
use crate::json_format::{decode_json, encode_json};

/// On-disk snapshot formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeFormat {
    Json,
    Csv,
}

impl ExchangeFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(ExchangeError::UnsupportedFormat(format!(
                "Unknown file extension for: {}",
                path.display()
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// MIME type for downloads
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }

    /// Encode rows in this format
    pub fn encode(&self, rows: &[SnapshotRow]) -> Result<String> {
        match self {
            Self::Json => encode_json(rows),
            Self::Csv => encode_csv(rows, &CsvConfig::default()),
        }
    }

    /// Decode rows in this format; CSV delimiters are detected from the header
    pub fn decode(&self, text: &str) -> Result<Vec<SnapshotRow>> {
        match self {
            Self::Json => decode_json(text),
            Self::Csv => decode_csv(text, &CsvConfig::default().with_delimiter(detect_delimiter(text))),
        }
    }
}

impl std::str::FromStr for ExchangeFormat {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ExchangeError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Whether an export covers the whole collection or a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    All,
    Selected,
}

impl ExportScope {
    fn prefix(&self) -> &'static str {
        match self {
            Self::All => "templates",
            Self::Selected => "selected_templates",
        }
    }
}

/// Download file name, e.g. `templates_20240131_094500.json`
pub fn export_file_name(scope: ExportScope, format: ExchangeFormat, at: DateTime<Local>) -> String {
    format!(
        "{}_{}.{}",
        scope.prefix(),
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Read a snapshot file, choosing the format from its extension
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<SnapshotRow>> {
    let path = path.as_ref();
    let format = ExchangeFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    let rows = format.decode(&text)?;
    tracing::info!("Loaded {} templates from {}", rows.len(), path.display());
    Ok(rows)
}

/// Write a snapshot file, choosing the format from its extension
pub fn save_file(path: impl AsRef<Path>, rows: &[SnapshotRow]) -> Result<()> {
    let path = path.as_ref();
    let format = ExchangeFormat::from_path(path)?;
    let text = format.encode(rows)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, text)?;
    tracing::info!("Saved {} templates to {}", rows.len(), path.display());
    Ok(())
}
