// Bookmark Settings Engine
// Loads and saves the bookmark store configuration: default titles and the
// suggested sites shown in the mobile folder. Stored as a JSON file.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::types::errors::SettingsError;
use crate::types::settings::BookmarkSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<BookmarkSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &BookmarkSettings;
    fn set_settings(&mut self, settings: BookmarkSettings);
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: BookmarkSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine reading from and writing to `config_path`.
    pub fn new(config_path: impl Into<String>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: BookmarkSettings::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// If the file does not exist, returns default settings.
    /// If the file exists but is malformed, returns a serialization error.
    /// Fields missing from the file take their default values.
    fn load(&mut self) -> Result<BookmarkSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            debug!("event=settings_load module=settings status=default path={}", self.config_path);
            self.settings = BookmarkSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: BookmarkSettings = serde_json::from_str(&content).map_err(|e| {
            warn!("event=settings_load module=settings status=error error={}", e);
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file.
    ///
    /// Creates parent directories if they don't exist.
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
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &BookmarkSettings {
        &self.settings
    }

    fn set_settings(&mut self, settings: BookmarkSettings) {
        self.settings = settings;
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
