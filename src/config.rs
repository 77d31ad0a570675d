//! Persisted application settings stored as TOML in the app directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize, de::Error as SerdeDeError};
use thiserror::Error;

use crate::app_dirs;
use crate::mission::Mission;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable overriding the configured backend base URL.
pub const BACKEND_URL_ENV: &str = "EXOFINDER_BACKEND_URL";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Settings loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

/// Where the inference service lives and how patient to be with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Batch predictions on large CSV files can take a while server-side.
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

impl BackendSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs.max(1))
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

/// UI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default)]
    pub default_mission: Mission,
    #[serde(default = "default_true")]
    pub chat_enabled: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            default_mission: Mission::default(),
            chat_enabled: true,
        }
    }
}

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load settings from disk, returning defaults if the file is missing.
///
/// `EXOFINDER_BACKEND_URL` wins over the stored base URL when set.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    let path = config_path()?;
    let mut settings = load_from_path(&path)?;
    if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
        let url = url.trim();
        if !url.is_empty() {
            tracing::info!("Backend URL overridden by {BACKEND_URL_ENV}: {url}");
            settings.backend.base_url = url.to_string();
        }
    }
    Ok(settings)
}

/// Persist settings to the default location.
pub fn save(settings: &AppSettings) -> Result<(), ConfigError> {
    let path = config_path()?;
    save_to_path(settings, &path)
}

/// Load settings from a specific file; a missing file yields defaults.
pub fn load_from_path(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source: SerdeDeError::custom(source),
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Save settings to a specific path, creating parent directories as needed.
pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_read_timeout_secs() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_from_path(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.backend.base_url, "http://127.0.0.1:5000");
        assert!(settings.ui.chat_enabled);
    }

    #[test]
    fn partial_file_fills_missing_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[backend]\nbase_url = \"http://example.test:8080\"\n\n[ui]\ndefault_mission = \"tess\"\n",
        )
        .unwrap();
        let settings = load_from_path(&path).unwrap();
        assert_eq!(settings.backend.base_url, "http://example.test:8080");
        assert_eq!(settings.backend.read_timeout_secs, 120);
        assert_eq!(settings.ui.default_mission, Mission::Tess);
        assert!(settings.ui.chat_enabled);
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut settings = AppSettings::default();
        settings.backend.base_url = "https://exofinder.example".into();
        settings.ui.chat_enabled = false;
        save_to_path(&settings, &path).unwrap();
        assert_eq!(load_from_path(&path).unwrap(), settings);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend = [").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn timeouts_never_drop_to_zero() {
        let backend = BackendSettings {
            connect_timeout_secs: 0,
            read_timeout_secs: 0,
            ..BackendSettings::default()
        };
        assert_eq!(backend.connect_timeout(), Duration::from_secs(1));
        assert_eq!(backend.read_timeout(), Duration::from_secs(1));
    }
}
