//! Configuration
//!
//! Demo application settings and row loading.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::table::{SelectionMode, DEFAULT_EMPTY_MESSAGE};

pub const CONFIG_ENV: &str = "TUI_KIT_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON array of rows in {}", .0.display())]
    NotAnArray(PathBuf),

    #[error("Row {} in {} is not a JSON object", .index, .path.display())]
    NotAnObject { path: PathBuf, index: usize },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rows_path: Option<PathBuf>,
    pub selection_mode: SelectionMode,
    pub empty_message: String,
    pub log_path: Option<PathBuf>,
    pub poll_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rows_path: None,
            selection_mode: SelectionMode::Multiple,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            log_path: None,
            poll_interval_ms: 100,
        }
    }
}

impl AppConfig {
    /// `$TUI_KIT_CONFIG`, else `<config dir>/tui-kit/config.json`
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tui-kit")
            .join("config.json")
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Read a JSON array of row objects
pub fn load_rows(path: &Path) -> ConfigResult<Vec<Value>> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(rows) = value else {
        return Err(ConfigError::NotAnArray(path.to_path_buf()));
    };
    if let Some(index) = rows.iter().position(|row| !row.is_object()) {
        return Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
            index,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.empty_message, "No data");
    }

    #[test]
    fn test_partial_config() {
        let file = write_temp(r#"{ "selection_mode": "single", "poll_interval_ms": 50 }"#);
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.selection_mode, SelectionMode::Single);
        assert_eq!(config.poll_interval(), Duration::from_millis(50));
        assert_eq!(config.empty_message, "No data");
    }

    #[test]
    fn test_invalid_config() {
        let file = write_temp("{ not json");
        assert!(matches!(AppConfig::load(file.path()), Err(ConfigError::Json { .. })));
    }

    #[test]
    fn test_load_rows() {
        let file = write_temp(r#"[{ "name": "A" }, { "name": "B", "age": 3 }]"#);
        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["age"], 3);
    }

    #[test]
    fn test_rows_must_be_objects() {
        let file = write_temp(r#"{ "name": "A" }"#);
        assert!(matches!(load_rows(file.path()), Err(ConfigError::NotAnArray(_))));

        let file = write_temp(r#"[{ "name": "A" }, 7]"#);
        assert!(matches!(
            load_rows(file.path()),
            Err(ConfigError::NotAnObject { index: 1, .. })
        ));
    }
}
