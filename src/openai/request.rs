use serde_json::{json, Map, Value};

use super::types::{ChatMessage, UsageSummary};

/// Text returned when the provider answers 200 with an empty choices list.
/// The call still counts as a success.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response generated";

pub fn chat_completions_endpoint(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/v1") {
        format!("{}/chat/completions", trimmed)
    } else {
        format!("{}/v1/chat/completions", trimmed)
    }
}

pub fn models_endpoint(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/v1") {
        format!("{}/models", trimmed)
    } else {
        format!("{}/v1/models", trimmed)
    }
}

/// Completion payload. `max_tokens` is left out entirely when absent,
/// never serialized as null.
pub fn build_chat_body(
    model: &str,
    messages: &[ChatMessage],
    temperature: f64,
    max_tokens: Option<u32>,
) -> Value {
    let mut body = Map::new();
    body.insert("model".into(), json!(model));
    body.insert("messages".into(), json!(messages));
    body.insert("temperature".into(), json!(temperature));
    if let Some(max) = max_tokens {
        body.insert("max_tokens".into(), json!(max));
    }
    Value::Object(body)
}

pub fn completion_text(data: &Value) -> String {
    data.get("choices")
        .and_then(|v| v.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string())
}

pub fn finish_reason(data: &Value) -> String {
    data.get("choices")
        .and_then(|v| v.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("finish_reason"))
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string()
}

pub fn extract_usage(data: &Value) -> UsageSummary {
    data.get("usage")
        .cloned()
        .and_then(|usage| serde_json::from_value(usage).ok())
        .unwrap_or_default()
}

/// Human-readable message from an error payload: OpenAI's
/// `{"error": {"message": ...}}` envelope, a bare error string, or a
/// top-level `message` field.
pub fn extract_error_message(payload: &Value) -> Option<String> {
    if let Some(error) = payload.get("error") {
        return match error {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => {
                if let Some(Value::String(message)) = map.get("message") {
                    Some(message.clone())
                } else if let Some(Value::String(kind)) = map.get("type") {
                    Some(kind.clone())
                } else {
                    Some(error.to_string())
                }
            }
            other => Some(other.to_string()),
        };
    }
    if let Some(Value::String(message)) = payload.get("message") {
        return Some(message.clone());
    }
    None
}
