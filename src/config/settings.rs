//! User settings for ControlFast
//!
//! Display preferences, the fallback category for new expenses and the
//! default log verbosity.

use std::fs::{self, File};
use std::io::{BufWriter, Write};

use serde::{Deserialize, Serialize};

use super::paths::ControlFastPaths;
use crate::error::ControlFastError;

/// User settings for ControlFast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Category assigned when an expense is added without one
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Number of rows `list` shows when no limit is given
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// tracing filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "S/ ".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_category() -> String {
    "Other".to_string()
}

fn default_list_limit() -> usize {
    20
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_category: default_category(),
            list_limit: default_list_limit(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &ControlFastPaths) -> Result<Self, ControlFastError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = fs::read_to_string(&settings_path)
            .map_err(|e| ControlFastError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents).map_err(|e| {
            ControlFastError::Config(format!("Failed to parse settings file: {}", e))
        })
    }

    /// Save settings to disk (write to temp, then rename)
    pub fn save(&self, paths: &ControlFastPaths) -> Result<(), ControlFastError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let temp_path = settings_path.with_extension("json.tmp");

        let file = File::create(&temp_path)
            .map_err(|e| ControlFastError::Io(format!("Failed to create temp file: {}", e)))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| {
            ControlFastError::Config(format!("Failed to serialize settings: {}", e))
        })?;
        writer
            .flush()
            .map_err(|e| ControlFastError::Io(format!("Failed to flush settings: {}", e)))?;

        fs::rename(&temp_path, &settings_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ControlFastError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
