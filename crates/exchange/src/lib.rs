//! Template snapshot exchange
//!
//! Serializes catalog snapshots to and from the formats the dashboard
//! downloads and uploads.
//!
//! # Features
//!
//! - JSON arrays of records keyed by column name
//! - CSV with a header row and configurable delimiter
//! - Format detection by file extension
//! - Timestamped export file names
//!
//! # Example
//!
//! ```rust
//! use exchange::{decode_csv, encode_csv, CsvConfig};
//!
//! let rows = catalog::sample_templates();
//! let csv = encode_csv(&rows, &CsvConfig::default()).unwrap();
//! assert_eq!(decode_csv(&csv, &CsvConfig::default()).unwrap(), rows);
//! ```

mod csv_format;
mod error;
mod file;
mod json_format;

pub use csv_format::{decode_csv, decode_csv_reader, detect_delimiter, encode_csv, CsvConfig};
pub use error::{ExchangeError, Result};
pub use file::{export_file_name, load_file, save_file, ExchangeFormat, ExportScope};
pub use json_format::{decode_json, encode_json};

use catalog::TemplateStore;

/// Replace a store's contents with a snapshot file.
///
/// The store is untouched if the file cannot be read or decoded.
pub fn import_file(store: &mut TemplateStore, path: impl AsRef<std::path::Path>) -> Result<usize> {
    let rows = load_file(path)?;
    let count = rows.len();
    store.import_snapshot(rows);
    Ok(count)
}

/// Write a store's full snapshot to a file
pub fn export_file(store: &TemplateStore, path: impl AsRef<std::path::Path>) -> Result<()> {
    save_file(path, &store.export_snapshot())
}
