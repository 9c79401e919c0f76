//! Editor configuration loaded from YAML.

use crate::theme::Theme;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Errors raised while loading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Tuning knobs for the editor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Column budget per choice when deciding whether the inline choice strip
    /// fits next to a label.
    pub choice_slot_width: u16,
    /// Preferred width of the help overlay.
    pub help_width: u16,
    /// Below this many columns a single-line box moves under its label.
    pub min_input_width: u16,
    /// Rows scrolled per mouse wheel notch.
    pub wheel_step: u16,
    /// Whether to capture the mouse.
    pub mouse: bool,
    /// Theme override; when absent the theme follows the colour depth.
    pub theme: Option<Theme>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            choice_slot_width: 12,
            help_width: 60,
            min_input_width: 8,
            wheel_step: 1,
            mouse: true,
            theme: None,
        }
    }
}

impl EditorConfig {
    /// Default location: `<config dir>/formedit/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("formedit").join("config.yaml"))
    }

    /// Load from an explicit path; a missing or invalid file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load from `path` if given, else from the default location if it
    /// exists, else use defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }
}
