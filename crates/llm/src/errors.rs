//! Adapter-internal error type.
//!
//! [`LlmError`] keeps the precise cause of a failed call for logging. At the
//! [`triage::Classifier`] boundary every variant collapses into
//! [`triage::ClassificationFailed`]; callers never see the distinction.

use std::time::Duration;

use thiserror::Error;
use triage::ClassificationFailed;

#[derive(Debug, Error)]
pub enum LlmError {
    /// Settings are unusable; produced at start-up, never during a call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API key not found: environment variable {env_var} is unset or empty")]
    MissingApiKey { env_var: String },

    /// Connection, TLS, or body-read failure.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Classifier did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Classifier API returned {status}: {body}")]
    ApiStatus { status: u16, body: String },

    /// The response body or tool input did not match the expected schema.
    #[error("Malformed classifier response: {0}")]
    MalformedResponse(String),

    #[error("Classifier response contained no triage verdict")]
    MissingVerdict,

    #[error("Classifier returned an empty {0}")]
    EmptyField(&'static str),
}

impl From<LlmError> for ClassificationFailed {
    fn from(e: LlmError) -> Self {
        ClassificationFailed::new(e.to_string())
    }
}
