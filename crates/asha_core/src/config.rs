//! Assistant configuration and settings store.
//!
//! # Responsibility
//! - Define the process-wide configuration read by every handler.
//! - Own load/merge/persist semantics for the settings-update operation.
//!
//! # Invariants
//! - Absent API keys are a valid state; handlers must degrade, not fail.
//! - Configuration is mutated only through `ConfigStore::update`.
//! - A missing or corrupt config file yields defaults, never an error.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const DEFAULT_ASSISTANT_NAME: &str = "Asha";
const DEFAULT_CITY: &str = "Delhi";
const DEFAULT_LOCALE: &str = "en";

/// Process-wide assistant settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Spoken name; also the tail of the wake phrase.
    pub assistant_name: String,
    /// City used by the weather intent when none is spoken.
    pub default_city: String,
    /// Weather provider credential; `None` triggers the degraded path.
    pub weather_api_key: Option<String>,
    /// Media-search provider credential; `None` triggers the degraded path.
    pub youtube_api_key: Option<String>,
    pub locale: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            default_city: DEFAULT_CITY.to_string(),
            weather_api_key: None,
            youtube_api_key: None,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl AssistantConfig {
    /// Lower-cased wake phrase, e.g. `"hey asha"`.
    pub fn wake_phrase(&self) -> String {
        format!("hey {}", self.assistant_name.trim().to_lowercase())
    }

    /// Whether a usable weather credential is configured.
    pub fn has_weather_key(&self) -> bool {
        has_key(self.weather_api_key.as_deref())
    }

    /// Whether a usable media-search credential is configured.
    pub fn has_media_key(&self) -> bool {
        has_key(self.youtube_api_key.as_deref())
    }
}

fn has_key(key: Option<&str>) -> bool {
    key.is_some_and(|value| !value.trim().is_empty())
}

/// Partial settings update; only provided fields are merged.
///
/// An explicit empty-string key clears the stored credential.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    pub assistant_name: Option<String>,
    pub default_city: Option<String>,
    pub weather_api_key: Option<String>,
    pub youtube_api_key: Option<String>,
    pub locale: Option<String>,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Persistence error for settings writes.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config file I/O failed: {err}"),
            Self::Serialize(err) => write!(f, "config serialization failed: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Shared settings store with snapshot reads and merge-only writes.
pub struct ConfigStore {
    inner: RwLock<AssistantConfig>,
    path: Option<PathBuf>,
}

impl ConfigStore {
    /// Creates a store that never touches the filesystem.
    pub fn in_memory(config: AssistantConfig) -> Self {
        Self {
            inner: RwLock::new(config),
            path: None,
        }
    }

    /// Opens a file-backed store.
    ///
    /// A missing or unreadable file yields defaults; unknown fields in the
    /// file are ignored and missing fields take their default values.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let config = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<AssistantConfig>(&raw) {
                Ok(config) => config,
                Err(err) => {
                    warn!(
                        "event=config_load module=config status=error error_code=config_parse_failed error={err}"
                    );
                    AssistantConfig::default()
                }
            },
            Err(_) => AssistantConfig::default(),
        };
        info!(
            "event=config_load module=config status=ok assistant_name={}",
            config.assistant_name
        );
        Self {
            inner: RwLock::new(config),
            path: Some(path),
        }
    }

    /// Returns a cloned point-in-time view of the configuration.
    pub fn snapshot(&self) -> AssistantConfig {
        self.read_lock().clone()
    }

    /// Merges the provided fields and persists when file-backed.
    ///
    /// Returns the configuration after the merge. Empty-string credentials
    /// are normalized to `None`.
    pub fn update(&self, patch: ConfigPatch) -> ConfigResult<AssistantConfig> {
        let merged = {
            let mut config = self.write_lock();
            if let Some(name) = patch.assistant_name {
                let name = name.trim().to_string();
                if !name.is_empty() {
                    config.assistant_name = name;
                }
            }
            if let Some(city) = patch.default_city {
                let city = city.trim().to_string();
                if !city.is_empty() {
                    config.default_city = city;
                }
            }
            if let Some(key) = patch.weather_api_key {
                config.weather_api_key = normalize_key(key);
            }
            if let Some(key) = patch.youtube_api_key {
                config.youtube_api_key = normalize_key(key);
            }
            if let Some(locale) = patch.locale {
                let locale = locale.trim().to_string();
                if !locale.is_empty() {
                    config.locale = locale;
                }
            }
            config.clone()
        };

        if let Some(path) = &self.path {
            let raw = serde_json::to_string_pretty(&merged)?;
            std::fs::write(path, raw)?;
        }
        info!("event=config_update module=config status=ok");
        Ok(merged)
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, AssistantConfig> {
        match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, AssistantConfig> {
        match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn normalize_key(key: String) -> Option<String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
