use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PluginError, PluginResult};
use crate::runtime::State;

/// Replaces each `{{key}}` in `template` with `state[key]`. Unknown keys
/// render as empty strings.
pub fn compose_context(template: &str, state: &State) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = after[..end].trim();
                if let Some(value) = state.get(key) {
                    out.push_str(value);
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

/// Pulls a JSON object out of a model answer: a fenced ```json block first,
/// then the whole text, then the outermost braces.
pub fn extract_json_object(text: &str) -> Option<Value> {
    if let Some(start) = text.find("```json") {
        let body = &text[start + "```json".len()..];
        if let Some(end) = body.find("```")
            && let Ok(value) = serde_json::from_str::<Value>(body[..end].trim())
        {
            return Some(value);
        }
    }

    if let Ok(value) = serde_json::from_str::<Value>(text.trim())
        && value.is_object()
    {
        return Some(value);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Deserializes a generated object. Generators may hand back the raw model
/// text as a JSON string, in which case the object is extracted from it.
pub fn parse_generated<T: DeserializeOwned>(value: Value) -> PluginResult<T> {
    let object = match value {
        Value::String(text) => extract_json_object(&text).ok_or_else(|| PluginError::MalformedObject {
            reason: "no JSON object in model output".to_string(),
        })?,
        other => other,
    };

    serde_json::from_value(object).map_err(|e| PluginError::MalformedObject { reason: e.to_string() })
}
