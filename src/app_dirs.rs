//! Application directory helpers anchored to a single `.exofinder` folder.
//!
//! Config and log files live under the OS config directory (e.g. `%APPDATA%`
//! on Windows). `EXOFINDER_CONFIG_HOME` relocates the base for tests or
//! portable setups.

use std::{
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application directory that lives under the OS config root.
pub const APP_DIR_NAME: &str = ".exofinder";
/// Environment variable overriding the config base directory.
pub const CONFIG_HOME_ENV: &str = "EXOFINDER_CONFIG_HOME";

static CONFIG_BASE_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

/// Errors that can occur while resolving or preparing application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// No suitable base config directory could be resolved.
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    /// Failed to create the application directory.
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Return the root `.exofinder` directory, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let base = config_base_dir().ok_or(AppDirError::NoBaseDir)?;
    let path = base.join(APP_DIR_NAME);
    create_dir(path)
}

/// Return the logs directory inside the `.exofinder` root, creating it if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    create_dir(app_root_dir()?.join("logs"))
}

fn create_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn config_base_dir() -> Option<PathBuf> {
    if let Some(path) = CONFIG_BASE_OVERRIDE
        .lock()
        .ok()
        .and_then(|guard| guard.clone())
    {
        return Some(path);
    }
    if let Ok(path) = std::env::var(CONFIG_HOME_ENV) {
        return Some(PathBuf::from(path));
    }
    BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(test)]
pub(crate) fn set_config_base_override(path: Option<PathBuf>) {
    let mut guard = CONFIG_BASE_OVERRIDE
        .lock()
        .unwrap_or_else(|err| err.into_inner());
    *guard = path;
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard};

    static OVERRIDE_LOCK: Mutex<()> = Mutex::new(());

    /// Points the config base at a scratch directory for the guard's lifetime.
    pub(crate) struct OverrideGuard {
        _lock: MutexGuard<'static, ()>,
    }

    impl OverrideGuard {
        pub(crate) fn set(path: PathBuf) -> Self {
            let lock = OVERRIDE_LOCK.lock().unwrap_or_else(|err| err.into_inner());
            super::set_config_base_override(Some(path));
            Self { _lock: lock }
        }
    }

    impl Drop for OverrideGuard {
        fn drop(&mut self) {
            super::set_config_base_override(None);
        }
    }
}
