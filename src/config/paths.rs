//! Path management for ControlFast
//!
//! ## Path Resolution Order
//!
//! 1. `CONTROLFAST_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/controlfast` or `~/.config/controlfast`
//! 3. Windows: `%APPDATA%\controlfast`

use std::path::PathBuf;

use crate::error::ControlFastError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "CONTROLFAST_DATA_DIR";

/// Manages all paths used by ControlFast
#[derive(Debug, Clone)]
pub struct ControlFastPaths {
    base_dir: PathBuf,
}

impl ControlFastPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, ControlFastError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the expense database
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to the audit journal
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Path to the SQLite expense database
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join("expenses.db")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), ControlFastError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            ControlFastError::Io(format!("Failed to create base directory: {}", e))
        })?;

        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            ControlFastError::Io(format!("Failed to create data directory: {}", e))
        })?;

        Ok(())
    }

    /// Whether a database has been created at this location
    pub fn has_database(&self) -> bool {
        self.database_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, ControlFastError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                ControlFastError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("controlfast"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, ControlFastError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| ControlFastError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("controlfast"))
}
