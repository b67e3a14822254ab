// SPDX-License-Identifier: MPL-2.0
//! Application settings stored in `settings.toml`.
//!
//! The `[notifications]` section holds the defaults every notification is
//! resolved against; it uses the same keys as the per-call options
//! (`type`, `duration_secs`, `position`, `show_icon`, `show_close`,
//! `show_progress`). The `[diagnostics]` section sizes the event buffer.
//!
//! # Examples
//!
//! ```no_run
//! use toastline::config::{self, Config};
//! use toastline::notifications::Position;
//!
//! let (mut config, warning) = config::load();
//! if let Some(warning) = warning {
//!     eprintln!("{warning}");
//! }
//!
//! config.notifications.position = Some(Position::BottomCenter);
//! config::save(&config).expect("Failed to save config");
//! ```

mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::diagnostics::BufferCapacity;
use crate::error::{Error, Result};
use crate::notifications::{ConfigError, NotificationDefaults, NotificationOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Diagnostics settings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsConfig {
    /// Events kept in memory. Clamped to the allowed range on load.
    #[serde(default)]
    pub buffer_capacity: BufferCapacity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Defaults applied to every notification. Unset keys fall back to the
    /// built-in defaults.
    #[serde(default)]
    pub notifications: NotificationOptions,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Built-in defaults with the `[notifications]` section applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file holds an out-of-range value, for
    /// example a negative `duration_secs`.
    pub fn notification_defaults(&self) -> std::result::Result<NotificationDefaults, ConfigError> {
        NotificationDefaults::default().merged(&self.notifications)
    }
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns the config and an optional warning. A missing file is not an
/// error; an unreadable or invalid one yields the defaults plus a warning.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = get_config_path_with_override(base_dir) else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }

    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring settings file");
            (
                Config::default(),
                Some(format!("Settings could not be loaded, using defaults ({err})")),
            )
        }
    }
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, [`Error::Config`] if
/// it is not valid TOML and [`Error::InvalidOptions`] if a notification
/// default is out of range.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.notification_defaults()?;
    Ok(config)
}

/// Saves the configuration to the default path.
///
/// # Errors
///
/// See [`save_to_path`].
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// See [`save_to_path`].
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns [`Error::Io`] on write failure and [`Error::Config`] if the
/// config cannot be serialized.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
