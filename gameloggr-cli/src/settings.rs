//! Application settings stored in `<config_dir>/gameloggr/settings.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::CliError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    /// Collection database file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Directory that `export` writes to when no output file is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings, falling back to defaults when no file exists.
    pub(crate) fn load() -> Result<Self, CliError> {
        match settings_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self, CliError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&content)
            .map_err(|e| CliError::config(format!("Invalid settings file {}: {}", path.display(), e)))
    }

    /// Save to the default location. Returns the path written.
    pub(crate) fn save(&self) -> Result<PathBuf, CliError> {
        let path =
            settings_path().ok_or_else(|| CliError::config("Could not determine config directory"))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write through a temporary file and rename it into place, so a crash
    /// never leaves a half-written settings file.
    pub(crate) fn save_to(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| CliError::config(format!("Failed to serialize settings: {}", e)))?;

        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Configured database path, or the platform default.
    pub(crate) fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(default_database_path)
    }

    /// Configured export directory, or the current directory.
    pub(crate) fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

pub(crate) fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gameloggr").join("settings.toml"))
}

pub(crate) fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("gameloggr"))
        .unwrap_or_else(|| PathBuf::from(".gameloggr"))
        .join("collection.db")
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
