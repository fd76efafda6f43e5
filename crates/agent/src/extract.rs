use serde_json::{Map, Value};
use thiserror::Error;

use frontdesk_core::IntakeRecord;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no structured block found in utterance text")]
    NoStructuredBlock,
    #[error("structured block is malformed: {source}")]
    MalformedPayload {
        #[source]
        source: serde_json::Error,
    },
}

impl ExtractError {
    /// Short class label used in logs and CLI output.
    pub fn class(&self) -> &'static str {
        match self {
            Self::NoStructuredBlock => "no_structured_block",
            Self::MalformedPayload { .. } => "malformed_payload",
        }
    }
}

/// Pulls the structured intake payload out of free-form assistant text.
///
/// The heuristic is a greedy span: everything from the first `{` to the last
/// `}` in the text, newlines included. That is enough to isolate one JSON
/// object wrapped in prose, which is the shape the operating script asks the
/// model to emit. It is deliberately not a balanced-brace parser: when a text
/// carries two separate brace-delimited regions (say, an example object early
/// on and the real payload later), the span runs across both and parsing
/// then fails with `MalformedPayload`. Callers treat that the same as any
/// other malformed block: log it and wait for the next qualifying utterance.
///
/// No schema checks happen here. Required-field enforcement belongs to the
/// dispatcher, which knows the deployment's field policy.
pub fn extract(text: &str) -> Result<IntakeRecord, ExtractError> {
    let span = brace_span(text).ok_or(ExtractError::NoStructuredBlock)?;
    let fields: Map<String, Value> =
        serde_json::from_str(span).map_err(|source| ExtractError::MalformedPayload { source })?;
    Ok(IntakeRecord::from_object(fields))
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
