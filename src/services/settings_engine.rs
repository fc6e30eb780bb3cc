// Sitewright Settings Engine
// Loads, saves and edits application settings kept as JSON in the platform config dir.

use std::fs;
use std::path::{Path, PathBuf};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::AppSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<AppSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &AppSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine persisting `AppSettings` as pretty-printed JSON.
pub struct SettingsEngine {
    config_path: String,
    settings: AppSettings,
}

impl SettingsEngine {
    /// `path_override` replaces the default `<config dir>/settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: AppSettings::default(),
        }
    }

    /// Directory archives are written to: the configured one, else the platform download dir.
    pub fn download_dir(&self) -> PathBuf {
        match &self.settings.export.download_dir {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => platform::get_download_dir(),
        }
    }

    /// Walks `key` (dot-separated) through `root` and replaces the leaf.
    fn replace_path(root: &mut serde_json::Value, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            let map = current.as_object_mut().ok_or_else(|| {
                SettingsError::InvalidKey(format!("'{}' does not name an object path", key))
            })?;
            if !map.contains_key(part) {
                return Err(SettingsError::InvalidKey(format!("Key '{}' not found in settings", key)));
            }
            if parts.peek().is_none() {
                map.insert(part.to_string(), value);
                return Ok(());
            }
            current = map
                .get_mut(part)
                .ok_or_else(|| SettingsError::InvalidKey(key.to_string()))?;
        }
        Err(SettingsError::InvalidKey("Key cannot be empty".to_string()))
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Reads the config file; a missing file yields defaults, a malformed one an error.
    fn load(&mut self) -> Result<AppSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            tracing::debug!(path = %self.config_path, "no settings file, using defaults");
            self.settings = AppSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        self.settings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Updates one setting by dot path (e.g. `"generation.timeout_secs"`),
    /// validates by round-tripping through `AppSettings`, then saves.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key.trim().is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;
        Self::replace_path(&mut json_value, key, value)?;

        let updated: AppSettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        if updated.generation.timeout_secs == 0 {
            return Err(SettingsError::InvalidValue(
                "generation.timeout_secs must be at least 1".to_string(),
            ));
        }

        self.settings = updated;
        tracing::info!(key, "setting updated");
        self.save()
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = AppSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
