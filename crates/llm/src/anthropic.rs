//! [`triage::Classifier`] over Anthropic's Messages API.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, instrument, warn};
use triage::{ClassificationFailed, Classifier, Description, Verdict};

use crate::schema::{self, SYSTEM_PROMPT, TOOL_NAME};
use crate::{ClassifierConfig, LlmError};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Maximum number of response-body bytes copied into error messages.
const ERROR_BODY_LIMIT: usize = 512;

#[derive(Clone)]
pub struct AnthropicClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl AnthropicClassifier {
    /// Builds a classifier from validated settings and an explicit API key.
    pub fn new(config: &ClassifierConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        config.validate()?;
        let timeout = config.timeout();
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/v1/messages", config.base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            timeout,
        })
    }

    /// Builds a classifier, reading the API key from `config.api_key_env`.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, LlmError> {
        let key = config.api_key_from_env()?;
        Self::new(config, key)
    }

    /// Overrides the bounded wait for one call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    async fn request_verdict(&self, description: &str) -> Result<Verdict, LlmError> {
        let body = json!({
            "model": &self.model,
            "max_tokens": self.max_tokens,
            "system": SYSTEM_PROMPT,
            "messages": [{ "role": "user", "content": schema::user_prompt(description) }],
            "tools": [schema::tool_definition()],
            "tool_choice": { "type": "tool", "name": TOOL_NAME }
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::ApiStatus {
                status: status.as_u16(),
                body: truncate(&text, ERROR_BODY_LIMIT).to_string(),
            });
        }
        schema::decode_verdict(&text)
    }
}

impl std::fmt::Debug for AnthropicClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClassifier")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Classifier for AnthropicClassifier {
    #[instrument(
        name = "classify",
        skip_all,
        fields(model = %self.model, description_len = description.as_str().len())
    )]
    async fn classify(&self, description: &Description) -> Result<Verdict, ClassificationFailed> {
        let call = self.request_verdict(description.as_str());
        let outcome = match tokio::time::timeout(self.timeout, call).await {
            Ok(Err(LlmError::Transport(e))) if e.is_timeout() => {
                Err(LlmError::Timeout(self.timeout))
            }
            Ok(result) => result,
            Err(_elapsed) => Err(LlmError::Timeout(self.timeout)),
        };
        match outcome {
            Ok(verdict) => {
                debug!(urgency = %verdict.urgency_level, "Verdict received");
                Ok(verdict)
            }
            Err(e) => {
                warn!(error = %e, "Classifier call failed");
                Err(e.into())
            }
        }
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
