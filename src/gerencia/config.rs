//! # Configuration
//!
//! Stored as `config.json` in the data directory. Missing file or missing keys
//! fall back to defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `report-preview` | `5` | Entries shown per list in `gerencia report` |
//! | `export-dir` | current directory | Where `gerencia export` writes the CSV |

use crate::error::{GerenciaError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_REPORT_PREVIEW: usize = 5;

pub const KEYS: &[&str] = &["report-preview", "export-dir"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GerenciaConfig {
    #[serde(default = "default_report_preview")]
    pub report_preview: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

fn default_report_preview() -> usize {
    DEFAULT_REPORT_PREVIEW
}

impl Default for GerenciaConfig {
    fn default() -> Self {
        Self {
            report_preview: DEFAULT_REPORT_PREVIEW,
            export_dir: None,
        }
    }
}

impl GerenciaConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(GerenciaError::Io)?;
        let config: GerenciaConfig =
            serde_json::from_str(&content).map_err(GerenciaError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(GerenciaError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(GerenciaError::Serialization)?;
        fs::write(config_path, content).map_err(GerenciaError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "report-preview" => Some(self.report_preview.to_string()),
            "export-dir" => Some(
                self.export_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| ".".to_string()),
            ),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "report-preview" => {
                self.report_preview = value.parse().map_err(|_| {
                    GerenciaError::Config(format!(
                        "report-preview must be a whole number, got {:?}",
                        value
                    ))
                })?;
            }
            "export-dir" => {
                self.export_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => return Err(GerenciaError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GerenciaConfig::default();
        assert_eq!(config.report_preview, 5);
        assert_eq!(config.export_dir, None);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = GerenciaConfig::load(dir.path()).unwrap();
        assert_eq!(config, GerenciaConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GerenciaConfig::default();
        config.set("report-preview", "10").unwrap();
        config.set("export-dir", "/tmp/reports").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = GerenciaConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.report_preview, 10);
        assert_eq!(loaded.export_dir, Some(PathBuf::from("/tmp/reports")));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"export_dir":"out"}"#).unwrap();
        let loaded = GerenciaConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.report_preview, 5);
        assert_eq!(loaded.export_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = GerenciaConfig::default();
        assert!(config.set("report-preview", "many").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, GerenciaConfig::default());
    }

    #[test]
    fn test_get_known_keys() {
        let config = GerenciaConfig::default();
        assert_eq!(config.get("report-preview").as_deref(), Some("5"));
        assert_eq!(config.get("export-dir").as_deref(), Some("."));
        assert_eq!(config.get("nope"), None);
    }

    #[test]
    fn test_empty_export_dir_resets() {
        let mut config = GerenciaConfig::default();
        config.set("export-dir", "out").unwrap();
        config.set("export-dir", "").unwrap();
        assert_eq!(config.export_dir, None);
    }
}
