//! User settings for PiggyBank
//!
//! Display preferences plus the backup and audit policies.

use serde::{Deserialize, Serialize};

use super::paths::PiggyPaths;
use crate::error::PiggyError;

/// User settings for PiggyBank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of this file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Allow writing a backup of a ledger with no accounts
    #[serde(default)]
    pub allow_empty_backup: bool,

    /// Record every mutation in the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,

    /// Default number of rows shown by `history`
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_true() -> bool {
    true
}

fn default_history_limit() -> usize {
    20
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            allow_empty_backup: false,
            audit_enabled: default_true(),
            history_limit: default_history_limit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &PiggyPaths) -> Result<Self, PiggyError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                PiggyError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PiggyError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PiggyPaths) -> Result<(), PiggyError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            PiggyError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            PiggyError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
