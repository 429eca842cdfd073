//! Persisted shortcut settings.

use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::error::SettingsError;
use crate::types::ShortcutConfig;

const FILE_NAME: &str = "settings.json";

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store backed by `settings.json` inside `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted config merged over the built-in defaults.
    ///
    /// Never fails: a missing, unreadable or corrupt file yields the defaults.
    pub fn load(&self) -> ShortcutConfig {
        let mut config = ShortcutConfig::default();
        match self.read() {
            Ok(Some(saved)) => {
                config.merge(saved);
                info!("Loaded shortcut settings from {}", self.path.display());
            }
            Ok(None) => {}
            Err(e) => {
                warn!(
                    "Ignoring unreadable settings at {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
        config
    }

    /// Reads the persisted config without merging defaults.
    pub fn read(&self) -> Result<Option<ShortcutConfig>, SettingsError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content).map_err(SettingsError::Parse)?;
        Ok(Some(config))
    }

    /// Writes the full config, replacing the file atomically.
    pub fn save(&self, config: &ShortcutConfig) -> Result<(), SettingsError> {
        let result = self.write(config);
        if let Err(e) = &result {
            error!("Failed to save settings to {}: {}", self.path.display(), e);
        }
        result
    }

    fn write(&self, config: &ShortcutConfig) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(config).map_err(SettingsError::Serialize)?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}
