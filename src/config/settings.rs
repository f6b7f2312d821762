//! User settings for ledgerdesk
//!
//! Backend location, the user id sent with uploads, display preferences and
//! the optional journal-entry validation rules.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::DeskPaths;
use crate::error::LedgerDeskError;
use crate::services::validation::ValidationRules;

/// User settings for ledgerdesk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the accounting backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// User id passed to the upload endpoint
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Currency code shown next to amounts
    #[serde(default = "default_currency")]
    pub currency_code: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Where fetched documents are saved; the data directory's `downloads/` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,

    #[serde(default)]
    pub validation: ValidationRules,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_user_id() -> String {
    "123".to_string()
}

fn default_currency() -> String {
    "MYR".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_url: default_api_url(),
            user_id: default_user_id(),
            currency_code: default_currency(),
            date_format: default_date_format(),
            download_dir: None,
            validation: ValidationRules::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &DeskPaths) -> Result<Self, LedgerDeskError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                LedgerDeskError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerDeskError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Reject values that would only fail later, at display time
    pub fn validate(&self) -> Result<(), LedgerDeskError> {
        if !is_valid_date_format(&self.date_format) {
            return Err(LedgerDeskError::Config(format!(
                "Invalid date_format '{}' in settings file",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DeskPaths) -> Result<(), LedgerDeskError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            LedgerDeskError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| LedgerDeskError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Directory fetched documents are written to
    pub fn download_dir(&self, paths: &DeskPaths) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(|| paths.downloads_dir())
    }
}

/// True when chrono understands every specifier in `format`
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
