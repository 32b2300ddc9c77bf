//! Small key-value store for user preferences.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{CoreError, DeviceClass};

/// Key under which the device-class filter is persisted.
pub const DEVICE_MODE_KEY: &str = "deviceMode";

pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// Preferences kept in a flat JSON object on disk.
pub struct FilePreferences {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FilePreferences {
    /// Open (or lazily create) the preferences file at `path`. A missing or
    /// unreadable file starts out empty.
    pub fn open(path: &Path) -> Self {
        let values = std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            values: Mutex::new(values),
        }
    }

    /// Platform path: `<config_dir>/kiosk/prefs.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("kiosk").join("prefs.json"))
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| CoreError::Config("preferences lock poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }
}

/// Preferences that live only as long as the process.
#[derive(Default)]
pub struct MemoryPreferences {
    values: Mutex<BTreeMap<String, String>>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// Saved device class, if one was stored and is recognised.
pub fn load_device_class(prefs: &dyn PreferenceStore) -> Option<DeviceClass> {
    prefs.get(DEVICE_MODE_KEY)?.parse().ok()
}

/// Persist the device class. Failures are logged and otherwise ignored.
pub fn save_device_class(prefs: &dyn PreferenceStore, device: DeviceClass) {
    if let Err(e) = prefs.set(DEVICE_MODE_KEY, device.as_str()) {
        tracing::warn!(error = %e, "failed to persist device preference");
    }
}
