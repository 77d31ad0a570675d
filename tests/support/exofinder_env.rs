use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_HOME_VAR: &str = "EXOFINDER_CONFIG_HOME";
const BACKEND_URL_VAR: &str = "EXOFINDER_BACKEND_URL";

/// Serializes environment changes across tests and restores them on drop.
pub struct ExofinderEnvGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl ExofinderEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let mut guard = Self {
            previous: Vec::new(),
            _lock: lock,
        };
        guard.set(CONFIG_HOME_VAR, path.to_string_lossy().as_ref());
        guard.clear(BACKEND_URL_VAR);
        guard
    }

    pub fn set_backend_url(&mut self, url: &str) {
        self.set(BACKEND_URL_VAR, url);
    }

    fn set(&mut self, key: &'static str, value: &str) {
        self.remember(key);
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    fn clear(&mut self, key: &'static str) {
        self.remember(key);
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::remove_var(key);
        }
    }

    fn remember(&mut self, key: &'static str) {
        if !self.previous.iter().any(|(name, _)| *name == key) {
            self.previous.push((key, std::env::var(key).ok()));
        }
    }
}

impl Drop for ExofinderEnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            // SAFETY: tests run under a global lock to prevent concurrent env mutations.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
