//! Classifier connection settings.
//!
//! Deserialized from the `[classifier]` table of the CLI configuration file.
//! Every field has a default, so an absent table yields a working setup as
//! long as the API key variable is set.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::LlmError;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_TOKENS: u32 = 512;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Root URL of the Messages API (without `/v1/messages`).
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Upper bound on one classification call, connection included.
    pub timeout_secs: u64,
    pub max_tokens: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Rejects settings that could never produce a verdict.
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.base_url.trim().is_empty() {
            return Err(LlmError::Configuration("classifier.base_url is empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(LlmError::Configuration("classifier.model is empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(LlmError::Configuration(
                "classifier.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(LlmError::Configuration(
                "classifier.max_tokens must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Reads the API key from the configured environment variable.
    pub fn api_key_from_env(&self) -> Result<String, LlmError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(LlmError::MissingApiKey {
                env_var: self.api_key_env.clone(),
            }),
        }
    }
}
