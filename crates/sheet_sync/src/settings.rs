//! Dashboard settings management
//!
//! Settings live in a `settings.json` file inside the app data directory.
//! A missing or unreadable file yields the defaults.

use std::path::PathBuf;

use catalog::{Category, DEFAULT_PREVIEW_LINES};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Main dashboard settings container
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct DashboardSettings {
    /// Spreadsheet used as the backing store
    pub sheet: SheetSettings,
    /// Template generator endpoint
    pub webhook: WebhookSettings,
    /// Template display settings
    pub display: DisplaySettings,
}

/// Which spreadsheet and worksheet hold the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SheetSettings {
    /// Spreadsheet key; empty when no sheet is connected
    pub spreadsheet_id: String,
    /// Worksheet (tab) name
    pub worksheet: String,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            worksheet: "Sheet1".to_string(),
        }
    }
}

impl SheetSettings {
    pub fn new(spreadsheet_id: impl Into<String>, worksheet: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: worksheet.into(),
        }
    }

    /// Whether a spreadsheet has been chosen
    pub fn is_configured(&self) -> bool {
        !self.spreadsheet_id.trim().is_empty() && !self.worksheet.trim().is_empty()
    }
}

/// Endpoint of the external service that generates templates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct WebhookSettings {
    /// Empty when no generator is connected
    pub url: String,
}

impl WebhookSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Lines of code shown before a preview is cut off
    pub preview_lines: usize,
    /// Categories offered when adding a template
    pub categories: Vec<String>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            preview_lines: DEFAULT_PREVIEW_LINES,
            categories: Category::ALL.iter().map(|c| c.name().to_string()).collect(),
        }
    }
}

impl DisplaySettings {
    /// Whether `category` is one of the configured categories
    pub fn is_known_category(&self, category: &str) -> bool {
        self.categories.iter().any(|known| known == category)
    }
}

/// Settings manager for loading, saving, and updating dashboard settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: DashboardSettings,
}

impl SettingsManager {
    /// Create a new settings manager with the given app data directory
    pub fn new(app_data_dir: PathBuf) -> Self {
        let settings_path = app_data_dir.join("settings.json");
        Self {
            settings_path,
            current: DashboardSettings::default(),
        }
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    /// Load settings from disk, or return defaults if file doesn't exist
    pub fn load_sync(&mut self) -> Result<&DashboardSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match serde_json::from_str::<DashboardSettings>(&content) {
                Ok(settings) => {
                    self.current = settings;
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings file, using defaults: {}", e);
                    self.current = DashboardSettings::default();
                }
            }
        } else {
            self.current = DashboardSettings::default();
        }
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &DashboardSettings {
        &self.current
    }

    /// Update settings and save to disk
    pub fn update_sync(&mut self, settings: DashboardSettings) -> Result<()> {
        self.current = settings;
        self.save_sync()
    }

    /// Update only the spreadsheet connection
    pub fn update_sheet(&mut self, sheet: SheetSettings) -> Result<()> {
        self.current.sheet = sheet;
        self.save_sync()
    }

    /// Update only the generator endpoint
    pub fn update_webhook(&mut self, webhook: WebhookSettings) -> Result<()> {
        self.current.webhook = webhook;
        self.save_sync()
    }

    /// Reset settings to defaults and save
    pub fn reset_sync(&mut self) -> Result<&DashboardSettings> {
        self.current = DashboardSettings::default();
        self.save_sync()?;
        Ok(&self.current)
    }
}
