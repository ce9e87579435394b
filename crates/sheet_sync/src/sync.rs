//! Whole-table pull and push between a store and a spreadsheet

use catalog::{SnapshotRow, TemplateStore, SNAPSHOT_HEADER};
use chrono::{DateTime, Local};
use serde_json::Value as JsonValue;

use crate::client::SheetClient;
use crate::error::{Result, SyncError};
use crate::settings::SheetSettings;

/// Sync session for one configured worksheet.
///
/// Pull replaces the store's collection with the sheet contents; push clears
/// the sheet and writes the store's snapshot. There is no diffing.
pub struct SheetSync<C: SheetClient> {
    client: C,
    target: SheetSettings,
    last_sync: Option<DateTime<Local>>,
}

impl<C: SheetClient> SheetSync<C> {
    pub fn new(client: C, target: SheetSettings) -> Self {
        Self {
            client,
            target,
            last_sync: None,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn target(&self) -> &SheetSettings {
        &self.target
    }

    /// Time of the last successful pull or push
    pub fn last_sync(&self) -> Option<DateTime<Local>> {
        self.last_sync
    }

    /// Last sync time for display, e.g. `2024-01-31 09:45:00`
    pub fn last_sync_label(&self) -> Option<String> {
        self.last_sync
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.target.is_configured() {
            Ok(())
        } else {
            Err(SyncError::NotConfigured(
                "set a spreadsheet id and worksheet first".to_string(),
            ))
        }
    }

    /// Replace the store's collection with the sheet's rows.
    ///
    /// Returns `Ok(None)` and leaves the store alone when the sheet has no
    /// data rows.
    pub fn pull(&mut self, store: &mut TemplateStore) -> Result<Option<usize>> {
        self.ensure_configured()?;

        let records = self.client.fetch_records()?;
        if records.is_empty() {
            tracing::warn!(
                "Worksheet {} of {} has no rows; keeping current templates",
                self.target.worksheet,
                self.target.spreadsheet_id
            );
            return Ok(None);
        }

        let value = JsonValue::Array(records.into_iter().map(JsonValue::Object).collect());
        let count = store.import_json_value(&value)?;

        self.last_sync = Some(Local::now());
        tracing::info!(
            "Pulled {} templates from {}/{}",
            count,
            self.target.spreadsheet_id,
            self.target.worksheet
        );
        Ok(Some(count))
    }

    /// Overwrite the sheet with the store's snapshot. Returns rows written.
    pub fn push(&mut self, store: &TemplateStore) -> Result<usize> {
        self.ensure_configured()?;

        let rows: Vec<Vec<JsonValue>> = store.export_snapshot().iter().map(sheet_row).collect();
        let count = rows.len();
        self.client.overwrite(&SNAPSHOT_HEADER, rows)?;

        self.last_sync = Some(Local::now());
        tracing::info!(
            "Pushed {} templates to {}/{}",
            count,
            self.target.spreadsheet_id,
            self.target.worksheet
        );
        Ok(count)
    }
}

/// Cells for one row; numbers stay numeric and an absent number is blank
fn sheet_row(row: &SnapshotRow) -> Vec<JsonValue> {
    let number = match row.number {
        Some(n) => JsonValue::from(n),
        None => JsonValue::String(String::new()),
    };
    vec![
        number,
        JsonValue::String(row.title.clone()),
        JsonValue::String(row.category.clone()),
        JsonValue::String(row.description.clone()),
        JsonValue::String(row.code.clone()),
    ]
}
