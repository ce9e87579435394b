//! Sheet Sync - Spreadsheet-backed persistence for the template catalog
//!
//! The catalog's only persistence is a flat worksheet. This crate defines
//! the client seam for that worksheet, the pull/push session that moves whole
//! snapshots across it, and the dashboard settings that name it.

mod client;
mod error;
mod settings;
mod sync;

pub use client::{MemorySheet, SheetClient};
pub use error::{Result, SyncError};
pub use settings::{
    DashboardSettings, DisplaySettings, SettingsManager, SheetSettings, WebhookSettings,
};
pub use sync::SheetSync;
