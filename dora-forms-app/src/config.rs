//! TOML configuration of the application.

use std::path::{Path, PathBuf};

use dora_forms::Language;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Size of the rendered chart image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
        }
    }
}

/// Application settings. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub language: Language,
    /// JSON file holding the saved forms.
    pub data_file: PathBuf,
    /// Directory the PDF report is written to.
    pub export_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_level: String,
    /// Question catalog to use instead of the built-in one.
    pub catalog_file: Option<PathBuf>,
    pub chart: ChartConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: Language::Es,
            data_file: PathBuf::from("formularios.json"),
            export_dir: PathBuf::from("."),
            log_file: PathBuf::from("dora-forms.log"),
            log_level: "info".to_string(),
            catalog_file: None,
            chart: ChartConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.data_file, PathBuf::from("formularios.json"));
        assert_eq!(config.chart, ChartConfig { width: 800, height: 400 });
    }

    #[test]
    fn partial_file_overrides_keys() {
        let config = AppConfig::from_toml(
            r#"
            language = "pt"
            export_dir = "/tmp/informes"

            [chart]
            width = 640
            "#,
        )
        .unwrap();

        assert_eq!(config.language, Language::Pt);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/informes"));
        assert_eq!(config.chart.width, 640);
        assert_eq!(config.chart.height, 400);
        assert_eq!(config.log_file, PathBuf::from("dora-forms.log"));
    }

    #[test]
    fn unknown_language_is_rejected() {
        let err = AppConfig::from_toml(r#"language = "fr""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = AppConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dora-forms.toml");
        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.log_level, "debug");
    }
}
