//! CSV snapshots: a header row followed by one row per template

use std::io::Read;

use catalog::{parse_number_cell, CatalogError, SnapshotRow, SNAPSHOT_HEADER};

use crate::error::{ExchangeError, Result};

/// CSV reader/writer configuration
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Delimiter character
    pub delimiter: char,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl CsvConfig {
    /// Comma-separated values
    pub fn comma() -> Self {
        Self::default()
    }

    /// Tab-separated values
    pub fn tab() -> Self {
        Self { delimiter: '\t' }
    }

    /// Set the delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// The delimiter as the single byte the csv crate expects
    fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ExchangeError::InvalidDelimiter(self.delimiter))
        }
    }
}

/// Encode rows as CSV with a header row; absent numbers are empty cells
pub fn encode_csv(rows: &[SnapshotRow], config: &CsvConfig) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .from_writer(Vec::new());

    writer.write_record(SNAPSHOT_HEADER)?;
    for row in rows {
        writer.write_record(row.to_cells())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Decode CSV text into rows
pub fn decode_csv(text: &str, config: &CsvConfig) -> Result<Vec<SnapshotRow>> {
    decode_csv_reader(text.as_bytes(), config)
}

/// Decode CSV from any reader.
///
/// Header names are matched case-insensitively; unknown columns are ignored
/// and missing ones default to empty. At least one template column must be
/// present.
pub fn decode_csv_reader<R: Read>(reader: R, config: &CsvConfig) -> Result<Vec<SnapshotRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    // Map each known column to its position in this file
    let headers = csv_reader.headers()?.clone();
    let mut positions: [Option<usize>; 5] = [None; 5];
    for (index, header) in headers.iter().enumerate() {
        let header = header.trim();
        if let Some(field) = SNAPSHOT_HEADER
            .iter()
            .position(|name| name.eq_ignore_ascii_case(header))
        {
            positions[field].get_or_insert(index);
        }
    }

    if positions.iter().all(Option::is_none) {
        return Err(CatalogError::Import(format!(
            "CSV header has none of the template columns ({})",
            SNAPSHOT_HEADER.join(", ")
        ))
        .into());
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(SnapshotRow {
            number: parse_number_cell(cell(&record, positions[0]))?,
            title: cell(&record, positions[1]).to_string(),
            category: cell(&record, positions[2]).to_string(),
            description: cell(&record, positions[3]).to_string(),
            code: cell(&record, positions[4]).to_string(),
        });
    }

    tracing::debug!("Decoded {} rows from CSV", rows.len());
    Ok(rows)
}

fn cell(record: &csv::StringRecord, position: Option<usize>) -> &str {
    position.and_then(|index| record.get(index)).unwrap_or("")
}

/// Candidate delimiters, in order of preference on a tie
const DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// Guess the delimiter of CSV content from its header line.
///
/// The winner is the candidate that splits the header into the most
/// template column names. When no candidate finds any, the one producing the
/// most fields wins, and comma is the fallback.
pub fn detect_delimiter(content: &str) -> char {
    let header = content.lines().next().unwrap_or("");

    DELIMITERS
        .iter()
        .rev()
        .map(|&delimiter| {
            let fields: Vec<&str> = header.split(delimiter).collect();
            let known = fields
                .iter()
                .filter(|field| is_template_column(field))
                .count();
            (known, fields.len(), delimiter)
        })
        .max_by_key(|&(known, fields, _)| (known, fields))
        .filter(|&(known, fields, _)| known > 0 || fields > 1)
        .map(|(_, _, delimiter)| delimiter)
        .unwrap_or(',')
}

fn is_template_column(field: &str) -> bool {
    let name = field.trim().trim_matches('"');
    SNAPSHOT_HEADER
        .iter()
        .any(|column| column.eq_ignore_ascii_case(name))
}
