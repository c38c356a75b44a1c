//! Decoding of captured backend output.

use crate::command::CommandResult;
use crate::error::{BridgeError, Result};
use serde_json::Value;

/// How much of the offending output is quoted in decode errors.
const PREVIEW_CHARS: usize = 200;

/// Decode captured bytes as exactly one UTF-8 JSON object.
///
/// # Returns
///
/// * `Ok(CommandResult)` - The top-level object
/// * `Err(BridgeError::Decode)` - Invalid UTF-8, invalid JSON, or a
///   top-level value that is not an object
pub fn decode_output(bytes: &[u8]) -> Result<CommandResult> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        BridgeError::Decode(format!(
            "output is not valid UTF-8 (invalid byte at offset {})",
            e.valid_up_to()
        ))
    })?;

    if text.trim().is_empty() {
        return Err(BridgeError::Decode("backend produced no output".to_string()));
    }

    let value: Value = serde_json::from_str(text).map_err(|e| {
        BridgeError::Decode(format!(
            "output is not valid JSON: {}\nOutput starts with: {}",
            e,
            preview(text)
        ))
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(BridgeError::Decode(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn preview(text: &str) -> String {
    let trimmed = text.trim();
    let mut preview: String = trimmed.chars().take(PREVIEW_CHARS).collect();
    if trimmed.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}
