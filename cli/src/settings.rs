//! Client settings — plain JSON, every field optional.
//!
//! The file is named by `--config` or `CFGBACKUP_CONFIG`. A missing or
//! unreadable file is not an error: the client falls back to
//! the defaults below, which match the stock firmware.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Path appended to a bare device URL (`http://device` → `http://device/config.b64`).
    #[serde(default = "default_resource_path")]
    pub resource_path: String,

    /// Extension of the fallback filename (`<host>.<ext>`).
    #[serde(default = "default_extension")]
    pub default_extension: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default log filter when neither `RUST_LOG` nor `--log-level` is set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Also write logs to this file.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resource_path: default_resource_path(),
            default_extension: default_extension(),
            timeout_secs: default_timeout_secs(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

fn default_resource_path() -> String {
    cfgbackup_blob::DEFAULT_RESOURCE_PATH.into()
}
fn default_extension() -> String {
    cfgbackup_blob::DEFAULT_EXTENSION.into()
}
const fn default_timeout_secs() -> u64 {
    10
}
fn default_log_level() -> String {
    "warn".into()
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// Returns [`Default::default()`] when the file is missing or contains
    /// invalid JSON.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        fs::read_to_string(path).map_or_else(
            |_| Self::default(),
            |contents| serde_json::from_str(&contents).unwrap_or_default(),
        )
    }

    /// Load from `path` if given, otherwise use the defaults.
    #[must_use]
    pub fn load_optional(path: Option<&Path>) -> Self {
        path.map_or_else(Self::default, Self::load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_values_match_firmware() {
        let s = Settings::default();
        assert_eq!(s.resource_path, "/config.b64");
        assert_eq!(s.default_extension, "yaml");
        assert_eq!(s.timeout_secs, 10);
        assert_eq!(s.log_level, "warn");
        assert!(s.log_file.is_none());
    }

    #[test]
    fn load_returns_default_on_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Settings::load(&dir.path().join("nope.json")), Settings::default());
    }

    #[test]
    fn load_returns_default_on_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"resourcePath": "/backup.b64", "timeoutSecs": 3}"#).unwrap();
        let s = Settings::load(&path);
        assert_eq!(s.resource_path, "/backup.b64");
        assert_eq!(s.timeout_secs, 3);
        assert_eq!(s.default_extension, "yaml");
    }

    #[test]
    fn load_optional_without_path_is_default() {
        assert_eq!(Settings::load_optional(None), Settings::default());
    }
}
