//! Configuration Module
//!
//! Two layers: process configuration read from environment variables, and
//! the `file-switcher` settings namespace, which the editor host can change
//! at runtime. Settings are parsed and validated here once; the rest of the
//! crate only ever sees a valid [`Settings`].

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::cache::DEFAULT_CAPACITY;
use crate::resolver::ExtensionPairs;

/// Name of the settings namespace.
pub const SETTINGS_NAMESPACE: &str = "file-switcher";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Workspace folders, the first one is the main folder
    pub workspace_folders: Vec<PathBuf>,
    /// Optional JSON settings file
    pub settings_file: Option<PathBuf>,
    /// File resolved once at startup
    pub active_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FILE_SWITCHER_PORT` - HTTP server port (default: 7878)
    /// - `FILE_SWITCHER_WORKSPACE` - Workspace folders in OS path-list syntax
    ///   (default: current directory)
    /// - `FILE_SWITCHER_SETTINGS` - Path to a JSON settings file (default: none)
    /// - `FILE_SWITCHER_ACTIVE_FILE` - File to resolve at startup (default: none)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env::var("FILE_SWITCHER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            workspace_folders: env::var_os("FILE_SWITCHER_WORKSPACE")
                .map(|v| {
                    env::split_paths(&v)
                        .filter(|p| !p.as_os_str().is_empty())
                        .collect()
                })
                .unwrap_or(defaults.workspace_folders),
            settings_file: env::var_os("FILE_SWITCHER_SETTINGS").map(PathBuf::from),
            active_file: env::var_os("FILE_SWITCHER_ACTIVE_FILE").map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 7878,
            workspace_folders: env::current_dir().map(|d| vec![d]).unwrap_or_default(),
            settings_file: None,
            active_file: None,
        }
    }
}

// == Verbosity ==
/// Log verbosity, from quietest to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    None,
    Error,
    Warning,
    Info,
    Debug,
}

impl Verbosity {
    /// Case-insensitive parse of `none|error|warning|info|debug`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Setting Keys ==
/// The settings a host change can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    LogLevel,
    Extensions,
    CachePathCount,
}

impl SettingKey {
    pub const ALL: [SettingKey; 3] = [Self::LogLevel, Self::Extensions, Self::CachePathCount];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LogLevel => "log.logLevel",
            Self::Extensions => "extensions",
            Self::CachePathCount => "cache.pathCount",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

/// A setting whose value does not have the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingError {
    #[error("Error accessing setting '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Error reading settings: {0}")]
    Unreadable(String),
}

impl SettingError {
    fn invalid(key: SettingKey, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.as_str(),
            reason: reason.into(),
        }
    }
}

// == Settings ==
/// Validated `file-switcher` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub verbosity: Verbosity,
    pub extension_pairs: ExtensionPairs,
    pub cache_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Info,
            extension_pairs: ExtensionPairs::default(),
            cache_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Settings {
    /// Applies the valid part of `change`, returning the keys that changed.
    pub fn apply(&mut self, change: &SettingsChange) -> Vec<SettingKey> {
        let mut applied = Vec::new();

        if let Some(verbosity) = change.verbosity {
            self.verbosity = verbosity;
            applied.push(SettingKey::LogLevel);
        }
        if let Some(pairs) = &change.extension_pairs {
            self.extension_pairs = pairs.clone();
            applied.push(SettingKey::Extensions);
        }
        if let Some(capacity) = change.cache_capacity {
            self.cache_capacity = capacity;
            applied.push(SettingKey::CachePathCount);
        }

        applied
    }
}

// == Settings Change ==
/// A parsed and validated settings update.
///
/// Only keys present in the source are set. Keys with a bad value end up in
/// `rejected` and leave the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsChange {
    pub verbosity: Option<Verbosity>,
    pub extension_pairs: Option<ExtensionPairs>,
    pub cache_capacity: Option<usize>,
    pub rejected: Vec<SettingError>,
}

impl SettingsChange {
    /// Parses either the bare namespace object or one wrapped as
    /// `{ "file-switcher": { ... } }`.
    pub fn parse(value: &Value) -> Self {
        let mut change = Self::default();

        let namespace = match value.get(SETTINGS_NAMESPACE) {
            Some(inner) => inner,
            None => value,
        };

        let Some(object) = namespace.as_object() else {
            change.rejected.push(SettingError::Unreadable(format!(
                "expected a JSON object for '{SETTINGS_NAMESPACE}'"
            )));
            return change;
        };

        for (key, value) in object {
            match SettingKey::from_key(key) {
                Some(setting) => change.set(setting, value),
                None => debug!("Ignoring unknown setting: {}", key),
            }
        }

        change
    }

    /// Parses a JSON settings file.
    pub fn read(path: &Path) -> Result<Self, SettingError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SettingError::Unreadable(format!("{}: {e}", path.display())))?;
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| SettingError::Unreadable(format!("{}: {e}", path.display())))?;

        Ok(Self::parse(&value))
    }

    fn set(&mut self, key: SettingKey, value: &Value) {
        let parsed = match key {
            SettingKey::LogLevel => parse_verbosity(value).map(|v| self.verbosity = Some(v)),
            SettingKey::Extensions => {
                parse_extension_pairs(value).map(|p| self.extension_pairs = Some(p))
            }
            SettingKey::CachePathCount => {
                parse_cache_capacity(value).map(|c| self.cache_capacity = Some(c))
            }
        };

        if let Err(e) = parsed {
            self.rejected.push(e);
        }
    }

    /// True when nothing valid was found.
    pub fn is_empty(&self) -> bool {
        self.verbosity.is_none() && self.extension_pairs.is_none() && self.cache_capacity.is_none()
    }

    pub fn log_rejected(&self) {
        for rejected in &self.rejected {
            error!("{}", rejected);
        }
    }
}

fn parse_verbosity(value: &Value) -> Result<Verbosity, SettingError> {
    value
        .as_str()
        .and_then(Verbosity::parse)
        .ok_or_else(|| SettingError::invalid(SettingKey::LogLevel, format!("unknown log level {value}")))
}

fn parse_extension_pairs(value: &Value) -> Result<ExtensionPairs, SettingError> {
    serde_json::from_value(value.clone()).map_err(|e| {
        SettingError::invalid(
            SettingKey::Extensions,
            format!("expected {{\"extensions1\": string, \"extensions2\": string}} ({e})"),
        )
    })
}

/// Accepts any non-negative integral number, including `5.0`.
fn parse_cache_capacity(value: &Value) -> Result<usize, SettingError> {
    let count = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u32::MAX as f64)
            .map(|f| f as u64)
    });

    count
        .and_then(|c| usize::try_from(c).ok())
        .ok_or_else(|| {
            SettingError::invalid(
                SettingKey::CachePathCount,
                format!("cache size was {value}, expected a non-negative integer"),
            )
        })
}
