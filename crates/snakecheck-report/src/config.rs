//! Configuration schema (snakecheck.toml)

use serde::{Deserialize, Serialize};
use snakecheck_core::DiagnosticCode;

/// Which diagnostics make a run fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailPolicy {
    /// Always succeed
    Never,

    /// Fail on any error-class diagnostic
    Error,

    /// Fail on any diagnostic with a severe score
    Severe,

    /// Fail on any diagnostic at all
    Any,
}

impl Default for FailPolicy {
    fn default() -> Self {
        Self::Severe
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One rendered line per diagnostic
    Text,

    /// Versioned report.json
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Text
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// When the run should exit non-zero
    pub fail_on: FailPolicy,

    /// Output format
    pub format: OutputFormat,

    /// Diagnostic codes dropped from reports
    pub ignore: Vec<DiagnosticCode>,

    /// Colorize level tags in text output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fail_on: FailPolicy::default(),
            format: OutputFormat::default(),
            ignore: Vec::new(),
            color: true,
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config = Self::from_toml(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Check whether diagnostics with this code are dropped
    pub fn is_ignored(&self, code: DiagnosticCode) -> bool {
        self.ignore.contains(&code)
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.fail_on, FailPolicy::Severe);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.color);
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn parse_full_config() {
        let config = Config::from_toml(
            r#"
            fail_on = "error"
            format = "json"
            ignore = ["UNUSED_IMPORT", "IMPORT_STAR_USED"]
            color = false
            "#,
        )
        .unwrap();

        assert_eq!(config.fail_on, FailPolicy::Error);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.is_ignored(DiagnosticCode::UnusedImport));
        assert!(config.is_ignored(DiagnosticCode::ImportStarUsed));
        assert!(!config.is_ignored(DiagnosticCode::UndefinedName));
        assert!(!config.color);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config = Config::from_toml("fail_on = \"never\"").unwrap();
        assert_eq!(config.fail_on, FailPolicy::Never);
        assert!(config.color);
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = Config::from_toml("ignore = [\"NOT_A_CODE\"]").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snakecheck.toml");

        let mut config = Config::default();
        config.ignore.push(DiagnosticCode::UnusedVariable);
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/snakecheck.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
