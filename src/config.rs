use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::journal::daytime::NightWindow;
use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

pub const DEFAULT_QUOTE_URL: &str = "https://zenquotes.io/api/today";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_quote_url")]
    pub quote_url: String,
    #[serde(default = "default_fetch_quote")]
    pub fetch_quote: bool,
    #[serde(default = "default_night_start_hour")]
    pub night_start_hour: u32,
    #[serde(default = "default_night_end_hour")]
    pub night_end_hour: u32,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
    #[serde(default)]
    pub key_bindings: KeyBindings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_submit")]
    pub submit: String,
    #[serde(default = "default_next_field")]
    pub next_field: String,
    #[serde(default = "default_prev_field")]
    pub prev_field: String,
    #[serde(default = "default_dismiss")]
    pub dismiss: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_accent")]
    pub accent: String,
    #[serde(default = "default_muted")]
    pub muted: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_version: Some(CURRENT_CONFIG_VERSION),
            database_path: default_database_path(),
            quote_url: default_quote_url(),
            fetch_quote: default_fetch_quote(),
            night_start_hour: default_night_start_hour(),
            night_end_hour: default_night_end_hour(),
            current_theme: default_current_theme(),
            themes: HashMap::new(),
            key_bindings: KeyBindings::default(),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            submit: default_submit(),
            next_field: default_next_field(),
            prev_field: default_prev_field(),
            dismiss: default_dismiss(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            highlight_bg: default_highlight_bg(),
            accent: default_accent(),
            muted: default_muted(),
        }
    }
}

impl Theme {
    /// Preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();

        themes.insert("default".to_string(), Theme::default());

        // Warm paper background of the mobile app
        themes.insert("paper".to_string(), Theme {
            fg: "#2E2E2E".to_string(),
            bg: "#F5EFE6".to_string(),
            highlight_bg: "#C2B8A3".to_string(),
            accent: "#be5d42".to_string(),
            muted: "#4F4F4F".to_string(),
        });

        themes.insert("monochrome".to_string(), Theme {
            fg: "white".to_string(),
            bg: "black".to_string(),
            highlight_bg: "white".to_string(),
            accent: "white".to_string(),
            muted: "gray".to_string(),
        });

        themes
    }
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

fn default_database_path() -> String {
    Config::default_database_path_for_profile(utils::Profile::Prod)
}

fn default_quote_url() -> String {
    DEFAULT_QUOTE_URL.to_string()
}

fn default_fetch_quote() -> bool {
    true
}

fn default_night_start_hour() -> u32 {
    18
}

fn default_night_end_hour() -> u32 {
    6
}

fn default_current_theme() -> String {
    "default".to_string()
}

fn default_quit() -> String {
    "Ctrl+q".to_string()
}

fn default_submit() -> String {
    "Ctrl+s".to_string()
}

fn default_next_field() -> String {
    "Tab".to_string()
}

fn default_prev_field() -> String {
    "BackTab".to_string()
}

fn default_dismiss() -> String {
    "Esc".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_highlight_bg() -> String {
    "blue".to_string()
}

fn default_accent() -> String {
    "#be5d42".to_string()
}

fn default_muted() -> String {
    "gray".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Night window hours must be 0-23, got start={start} end={end}")]
    InvalidNightWindow { start: u32, end: u32 },
    #[error("Invalid key binding '{binding}' for {action}: {reason}")]
    InvalidKeyBinding {
        action: &'static str,
        binding: String,
        reason: String,
    },
}

impl Config {
    /// Load configuration from the profile's config file, or create it with
    /// defaults if missing. The database path always follows the profile.
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;

        let mut config = if config_path.exists() {
            Self::read_file(&config_path)?
        } else {
            let mut config = Config::default();
            config.database_path = Self::default_database_path_for_profile(profile);
            config.write_file(&config_path)?;
            debug!(path = %config_path.display(), "Wrote default config");
            config
        };

        config.database_path = Self::default_database_path_for_profile(profile);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file. Unlike profile configs, the
    /// file's `database_path` is honoured.
    pub fn load_from_path(path: &Path, profile: utils::Profile) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            Self::read_file(path)?
        } else {
            let mut config = Config::default();
            config.database_path = Self::default_database_path_for_profile(profile);
            config.write_file(path)?;
            config
        };
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;
        Ok(toml::from_str(&contents)?)
    }

    fn write_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.night_window()?;
        let bindings = [
            ("quit", &self.key_bindings.quit),
            ("submit", &self.key_bindings.submit),
            ("next_field", &self.key_bindings.next_field),
            ("prev_field", &self.key_bindings.prev_field),
            ("dismiss", &self.key_bindings.dismiss),
        ];
        for (action, binding) in bindings {
            utils::parse_key_binding(binding).map_err(|reason| ConfigError::InvalidKeyBinding {
                action,
                binding: binding.clone(),
                reason,
            })?;
        }
        Ok(())
    }

    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile).ok_or_else(|| {
            ConfigError::ConfigDirError("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("config.toml"))
    }

    fn default_database_path_for_profile(profile: utils::Profile) -> String {
        if let Some(data_dir) = utils::get_data_dir(profile) {
            data_dir.join("diary.db").to_string_lossy().to_string()
        } else {
            match profile {
                utils::Profile::Dev => "~/.local/share/diary-dev/diary.db".to_string(),
                utils::Profile::Prod => "~/.local/share/diary/diary.db".to_string(),
            }
        }
    }

    /// Get the expanded database path (with ~ expansion)
    pub fn get_database_path(&self) -> PathBuf {
        utils::expand_path(&self.database_path)
    }

    pub fn night_window(&self) -> Result<NightWindow, ConfigError> {
        NightWindow::new(self.night_start_hour, self.night_end_hour).ok_or(
            ConfigError::InvalidNightWindow {
                start: self.night_start_hour,
                end: self.night_end_hour,
            },
        )
    }

    /// The currently active theme, falling back to the default preset
    pub fn get_active_theme(&self) -> Theme {
        self.themes
            .get(&self.current_theme)
            .cloned()
            .or_else(|| Theme::get_preset_themes().remove(&self.current_theme))
            .unwrap_or_default()
    }
}
