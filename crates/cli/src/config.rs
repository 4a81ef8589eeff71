//! CLI configuration: `campus-care.toml`.
//!
//! ```toml
//! [classifier]
//! model = "claude-3-5-haiku-latest"
//! timeout_secs = 20
//!
//! [telemetry]
//! log_format = "json"
//! log_filter = "info,triage=debug"
//! otlp_endpoint = "http://localhost:4317"
//! ```

use std::path::Path;

use anyhow::{bail, Context};
use llm::ClassifierConfig;
use serde::{Deserialize, Serialize};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "campus-care.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    pub log_format: LogFormat,
    /// `EnvFilter` directives; `RUST_LOG` takes precedence when set.
    pub log_filter: String,
    /// OTLP/gRPC collector. Spans are only exported when this is set.
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            log_filter: "info".to_string(),
            otlp_endpoint: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `explicit` if given (it must exist), otherwise
    /// [`DEFAULT_CONFIG_FILE`] if present, otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.classifier.validate()?;
        if let Some(endpoint) = &self.telemetry.otlp_endpoint {
            if endpoint.trim().is_empty() {
                bail!("telemetry.otlp_endpoint must not be empty when set");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [classifier]
            timeout_secs = 5

            [telemetry]
            log_format = "json"
            otlp_endpoint = "http://localhost:4317"
            "#,
        )
        .unwrap();
        assert_eq!(config.classifier.timeout_secs, 5);
        assert_eq!(config.classifier.model, ClassifierConfig::default().model);
        assert_eq!(config.telemetry.log_format, LogFormat::Json);
        assert_eq!(config.telemetry.log_filter, "info");
        assert_eq!(
            config.telemetry.otlp_endpoint.as_deref(),
            Some("http://localhost:4317")
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(AppConfig::from_toml_str("[classifier]\nmodle = \"x\"").is_err());
        assert!(AppConfig::from_toml_str("[storage]\npath = \"x\"").is_err());
    }

    #[test]
    fn test_invalid_values_fail_fast() {
        assert!(AppConfig::from_toml_str("[classifier]\ntimeout_secs = 0").is_err());
        assert!(AppConfig::from_toml_str("[telemetry]\notlp_endpoint = \" \"").is_err());
        assert!(AppConfig::from_toml_str("[telemetry]\nlog_format = \"xml\"").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/campus-care.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }
}
