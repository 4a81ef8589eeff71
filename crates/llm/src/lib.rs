//! CampusCare classification adapter.
//!
//! Implements the [`triage::Classifier`] trait for Anthropic's Messages API.
//! Other engines are added as new implementations in this crate without any
//! changes to the `triage` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting, schema-constrained
//! output, strict response decoding, and the bounded wait live here. The
//! [`triage`] crate sees only [`triage::Classifier`] and
//! [`triage::ClassificationFailed`].

pub mod anthropic;
pub mod config;
pub mod errors;
pub mod schema;

pub use anthropic::AnthropicClassifier;
pub use config::ClassifierConfig;
pub use errors::LlmError;
