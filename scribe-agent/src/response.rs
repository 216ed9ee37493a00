//! Decoding of model output.
//!
//! Models asked for JSON do not always return JSON. Decoding never fails:
//! anything unparseable is kept as raw text.

use serde_json::Value;

/// Phrases that mark an answer as given without enough context.
pub const INSUFFICIENT_CONTEXT_PHRASES: [&str; 5] = [
    "insufficient",
    "not enough",
    "not have enough",
    "don't have enough",
    "cannot answer",
];

/// Model text after a JSON decode attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    /// The text was a JSON object
    Decoded(Value),
    /// The text was not a JSON object; kept verbatim
    Raw(String),
}

impl ModelOutput {
    /// Try to decode `text` as a JSON object.
    ///
    /// Surrounding whitespace and a single Markdown code fence are ignored.
    /// Valid JSON that is not an object (`42`, `"text"`, `null`, arrays)
    /// stays raw.
    pub fn parse(text: &str) -> Self {
        let candidate = strip_code_fence(text.trim());
        match serde_json::from_str::<Value>(candidate) {
            Ok(value @ Value::Object(_)) => Self::Decoded(value),
            _ => Self::Raw(text.to_string()),
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }

    /// Decoded value, or `{"raw": text}`.
    pub fn into_value_or_raw(self) -> Value {
        match self {
            Self::Decoded(value) => value,
            Self::Raw(text) => serde_json::json!({ "raw": text }),
        }
    }
}

/// Strip a ```` ```json ... ``` ```` wrapper if the whole text is one.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string (e.g. "json") on the opening line
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}

/// False iff the answer contains one of [`INSUFFICIENT_CONTEXT_PHRASES`],
/// compared case-insensitively.
///
/// Beyond `insufficient`, `not enough` and `cannot answer`, the negated
/// possessive forms (`not have enough`, `don't have enough`) also count, so
/// "I do not have enough information" is treated as insufficient. This also
/// catches asides like "I don't have enough time to list all" that still
/// carry an answer.
pub fn sufficient_context(answer: &str) -> bool {
    let lowered = answer.to_lowercase();
    !INSUFFICIENT_CONTEXT_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}
