//! Settings for the formlink client.
//!
//! This module provides the [`Settings`] struct holding all client
//! configuration and [`SETTINGS`], a globally-accessible, lazily-initialized
//! settings instance.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{FormlinkError, FormlinkResult};

/// The complete set of client settings.
///
/// # Examples
///
/// ```
/// use formlink_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.api_url, "http://localhost:8000");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,
    /// Base URL of the backend API.
    pub api_url: String,
    /// Bearer token for authenticated endpoints, if already obtained.
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// The log filter directive (e.g. "info", "formlink=debug").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            api_url: "http://localhost:8000".to_string(),
            token: None,
            request_timeout: 30,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Parses settings from a TOML string.
    pub fn from_toml_str(s: &str) -> FormlinkResult<Self> {
        toml::from_str(s).map_err(|e| FormlinkError::Config(e.to_string()))
    }

    /// Loads settings from a TOML file, then applies environment overrides.
    ///
    /// `FORMLINK_API_URL` and `FORMLINK_TOKEN` take precedence over the file
    /// so tokens never need to be written to disk.
    pub fn load(path: impl AsRef<Path>) -> FormlinkResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let mut settings = Self::from_toml_str(&raw)?;
        settings.apply_env();
        Ok(settings)
    }

    /// Applies `FORMLINK_*` environment variable overrides in place.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("FORMLINK_API_URL") {
            self.api_url = url;
        }
        if let Ok(token) = std::env::var("FORMLINK_TOKEN") {
            self.token = Some(token);
        }
    }
}

/// The global settings instance.
///
/// Initialized once via [`init_settings`]; falls back to [`Settings::default`]
/// if accessed before initialization.
pub static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Installs the global settings instance.
///
/// Returns an error if settings were already initialized.
pub fn init_settings(settings: Settings) -> FormlinkResult<()> {
    SETTINGS
        .set(settings)
        .map_err(|_| FormlinkError::Config("settings already initialized".to_string()))
}

/// Returns the global settings, initializing defaults if necessary.
pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(Settings::default)
}
