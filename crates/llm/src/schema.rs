//! Structured-output contract with the classification model.
//!
//! The model is forced to call a single tool, `record_triage`, whose input
//! schema has exactly two string fields. Decoding is strict and fails
//! closed: extra fields, missing fields, wrong types, and blank values are
//! all errors. The schema lists the conventional urgency labels, but the
//! decoder accepts any non-empty label the model returns.

use serde::Deserialize;
use serde_json::{json, Value};
use triage::{UrgencyLevel, Verdict};

use crate::LlmError;

pub const TOOL_NAME: &str = "record_triage";

pub const SYSTEM_PROMPT: &str = "You are an AI assistant that analyzes maintenance issue \
descriptions submitted by students and provides an estimated urgency level and potential \
solutions. The urgencyLevel should be one of: Low, Medium, High, Critical. The \
suggestedSolutions should be a short paragraph. Be as concise as possible. Always answer by \
calling the record_triage tool.";

/// The user turn sent to the model.
pub fn user_prompt(description: &str) -> String {
    format!(
        "Description: {description}\n\nBased on the description, provide an urgencyLevel and suggestedSolutions."
    )
}

/// Tool definition (Anthropic `tools[]` entry) constraining the output shape.
pub fn tool_definition() -> Value {
    json!({
        "name": TOOL_NAME,
        "description": "Record the urgency level and suggested solutions for a maintenance issue.",
        "input_schema": {
            "type": "object",
            "properties": {
                "urgencyLevel": {
                    "type": "string",
                    "enum": UrgencyLevel::CONVENTIONAL,
                    "description": "The estimated urgency level of the issue."
                },
                "suggestedSolutions": {
                    "type": "string",
                    "description": "Potential solutions to resolve the maintenance issue, as a short paragraph."
                }
            },
            "required": ["urgencyLevel", "suggestedSolutions"],
            "additionalProperties": false
        }
    })
}

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    ToolUse { name: String, input: Value },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ToolInput {
    urgency_level: String,
    suggested_solutions: String,
}

/// Decodes a Messages API response body into a [`Verdict`].
pub fn decode_verdict(body: &str) -> Result<Verdict, LlmError> {
    if body.trim().is_empty() {
        return Err(LlmError::MalformedResponse("empty body".into()));
    }
    let response: MessagesResponse =
        serde_json::from_str(body).map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

    let input = response
        .content
        .into_iter()
        .find_map(|block| match block {
            ContentBlock::ToolUse { name, input } if name == TOOL_NAME => Some(input),
            _ => None,
        })
        .ok_or(LlmError::MissingVerdict)?;

    let ToolInput {
        urgency_level,
        suggested_solutions,
    } = serde_json::from_value(input).map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

    let urgency_level = UrgencyLevel::new(urgency_level).ok_or(LlmError::EmptyField("urgencyLevel"))?;
    if suggested_solutions.trim().is_empty() {
        return Err(LlmError::EmptyField("suggestedSolutions"));
    }
    Ok(Verdict {
        urgency_level,
        suggested_solutions,
    })
}
