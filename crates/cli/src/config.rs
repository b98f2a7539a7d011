use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use smpte_core::{FrameRate, TimebaseConfig};
use thiserror::Error;

/// Directory under the platform config dir holding the settings file.
const CONFIG_DIR_NAME: &str = "smpte";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default timebase used when no rate is given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub frame_rate: FrameRate,
    pub drop_frame: bool,
}

impl Settings {
    pub fn timebase(&self) -> TimebaseConfig {
        TimebaseConfig::new(self.frame_rate, self.drop_frame)
    }
}

/// Persisted configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    pub settings: Settings,
    pub created_at: String,
    pub modified_at: String,
}

/// Loads and stores [`Settings`] as JSON.
///
/// Defaults to `<config dir>/smpte/config.json`, falling back to
/// `config.json` in the working directory when the platform has no config dir.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
    created_at: Option<String>,
}

impl ConfigManager {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let config_path = config_path.unwrap_or_else(Self::default_path);

        Self {
            config_path,
            settings: Settings::default(),
            created_at: None,
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Load settings from the configuration file, writing defaults when it
    /// doesn't exist yet.
    pub fn load(&mut self) -> Result<Settings, ConfigError> {
        if !self.config_path.exists() {
            log::debug!(
                "No config at {}, writing defaults",
                self.config_path.display()
            );
            self.save()?;
            return Ok(self.settings);
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config_file: ConfigFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if config_file.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Config file version {} doesn't match application version {}",
                config_file.version,
                env!("CARGO_PKG_VERSION")
            );
        }

        log::debug!(
            "Loaded settings from {}: {:?}",
            self.config_path.display(),
            config_file.settings
        );
        self.settings = config_file.settings;
        self.created_at = Some(config_file.created_at);
        Ok(self.settings)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            if parent != Path::new("") && parent != Path::new(".") {
                fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
            }
        }

        let now = chrono::Utc::now().to_rfc3339();
        let config_file = ConfigFile {
            version: env!("CARGO_PKG_VERSION").to_string(),
            settings: self.settings,
            created_at: self.created_at.clone().unwrap_or_else(|| now.clone()),
            modified_at: now,
        };

        let content = serde_json::to_string_pretty(&config_file)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(&self.config_path, content)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        log::debug!("Saved settings to {}", self.config_path.display());
        Ok(())
    }

    /// Validate, store and persist new settings.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), ConfigError> {
        Self::validate_settings(&settings).map_err(ConfigError::ValidationError)?;
        self.settings = settings;
        self.save()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Drop-frame counting is only broadcast-correct for fractional rates, so
    /// it is not accepted as a persisted default for integer rates.
    pub fn validate_settings(settings: &Settings) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if settings.drop_frame && !settings.frame_rate.is_fractional() {
            errors.push(format!(
                "drop-frame timecode requires a fractional rate, got {}",
                settings.frame_rate
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), ConfigError> {
        self.settings = Settings::default();
        self.save()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to serialize config: {0}")]
    SerializeError(String),

    #[error("Config validation errors: {}", .0.join(", "))]
    ValidationError(Vec<String>),
}
