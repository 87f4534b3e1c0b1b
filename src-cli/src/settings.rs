//! Persisted client settings

use anyhow::{Context, Result};
use board_store::RemoteStoreConfig;
use board_sync::SyncConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file used when none is given on the command line
pub const DEFAULT_SETTINGS_FILE: &str = "tabletop.json";

/// Overrides `remote.access_key`
pub const ACCESS_KEY_ENV: &str = "TABLETOP_ACCESS_KEY";

/// Overrides `remote.base_url`
pub const BASE_URL_ENV: &str = "TABLETOP_BASE_URL";

/// All client settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Where the board document lives
    pub remote: RemoteStoreConfig,
    /// Sync timing
    pub sync: SyncConfig,
}

impl AppSettings {
    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ACCESS_KEY_ENV).filter(|key| !key.is_empty()) {
            self.remote.access_key = Some(key);
        }
        if let Some(url) = lookup(BASE_URL_ENV).filter(|url| !url.is_empty()) {
            self.remote.base_url = url;
        }
    }
}

/// Loads and saves [`AppSettings`] as pretty JSON
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: AppSettings,
}

impl SettingsManager {
    /// Create a manager for the given settings file
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            current: AppSettings::default(),
        }
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or defaults if the file doesn't exist.
    ///
    /// An unparsable file also yields defaults. Environment overrides are
    /// applied on top either way.
    pub fn load(&mut self) -> Result<&AppSettings> {
        self.current = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path).with_context(|| {
                format!("failed to read settings from {}", self.settings_path.display())
            })?;
            match serde_json::from_str::<AppSettings>(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(
                        path = %self.settings_path.display(),
                        "Failed to parse settings file, using defaults: {}",
                        e
                    );
                    AppSettings::default()
                }
            }
        } else {
            AppSettings::default()
        };

        self.current.apply_overrides(|name| std::env::var(name).ok());
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content).with_context(|| {
            format!("failed to write settings to {}", self.settings_path.display())
        })?;
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &AppSettings {
        &self.current
    }

    /// Update settings and save to disk
    pub fn update(&mut self, settings: AppSettings) -> Result<()> {
        self.current = settings;
        self.save()
    }
}
