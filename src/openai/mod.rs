mod request;
mod types;

pub use request::NO_RESPONSE_PLACEHOLDER;
pub use types::{ChatCompletion, ChatMessage, ModelInfo, UsageSummary, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::api::{ApiRequest, HttpTransport, ReqwestTransport};
use crate::error::ServiceError;
use crate::providers::Provider;

pub const CHAT_TIMEOUT_MS: u64 = 30_000;
pub const MODELS_TIMEOUT_MS: u64 = 10_000;

/// Wrapper around the OpenAI chat API, scoped to one credential. Entirely
/// stateless: every operation is a single request with no retry and no
/// connection reuse.
pub struct OpenAiService {
    api_key: Option<String>,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl OpenAiService {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_transport(api_key, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(api_key: Option<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            api_key,
            base_url: Provider::OpenAi.default_base_url().to_string(),
            transport,
        }
    }

    fn require_key(&self) -> Result<&str, ServiceError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ServiceError::MissingCredential),
        }
    }

    fn auth_headers(&self, api_key: &str) -> HashMap<String, String> {
        Provider::OpenAi.auth_headers(api_key).unwrap_or_default()
    }

    /// Single-turn convenience around [`complete_with_history`]: an
    /// optional system message followed by one user message.
    ///
    /// [`complete_with_history`]: OpenAiService::complete_with_history
    pub async fn complete(
        &self,
        message: &str,
        system_message: Option<&str>,
        model: &str,
        temperature: f64,
        max_tokens: Option<u32>,
    ) -> Result<ChatCompletion, ServiceError> {
        self.require_key()?;
        let message = message.trim();
        if message.is_empty() {
            return Err(ServiceError::EmptyInput("Message cannot be empty".into()));
        }

        let mut messages = Vec::new();
        if let Some(system) = system_message {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(message));

        self.complete_with_history(&messages, model, temperature, max_tokens)
            .await
    }

    /// Chat completion over a full conversation history, passed through in
    /// caller order.
    pub async fn complete_with_history(
        &self,
        messages: &[ChatMessage],
        model: &str,
        temperature: f64,
        max_tokens: Option<u32>,
    ) -> Result<ChatCompletion, ServiceError> {
        let api_key = self.require_key()?;
        if messages.is_empty() {
            return Err(ServiceError::EmptyInput(
                "Conversation history cannot be empty".into(),
            ));
        }

        let mut api_request = ApiRequest::post(
            request::chat_completions_endpoint(&self.base_url),
            request::build_chat_body(model, messages, temperature, max_tokens),
        );
        api_request.headers = Some(self.auth_headers(api_key));
        api_request.timeout_ms = Some(CHAT_TIMEOUT_MS);

        let response = self.transport.execute(api_request).await?;
        match response.status {
            200 => {
                let completion = ChatCompletion {
                    text: request::completion_text(&response.data),
                    model: response
                        .data
                        .get("model")
                        .and_then(|v| v.as_str())
                        .unwrap_or(model)
                        .to_string(),
                    usage: request::extract_usage(&response.data),
                    finish_reason: request::finish_reason(&response.data),
                };
                info!(
                    model = %completion.model,
                    total_tokens = completion.usage.total_tokens,
                    "chat completion succeeded"
                );
                Ok(completion)
            }
            401 => Err(ServiceError::Unauthorized),
            429 => Err(ServiceError::RateLimited),
            status => Err(ServiceError::Provider(
                request::extract_error_message(&response.data)
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            )),
        }
    }

    /// Models visible to this credential, filtered down to the chat-capable
    /// families the dashboard offers.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, ServiceError> {
        let api_key = self.require_key()?;

        let mut api_request = ApiRequest::get(request::models_endpoint(&self.base_url));
        api_request.headers = Some(self.auth_headers(api_key));
        api_request.timeout_ms = Some(MODELS_TIMEOUT_MS);

        let response = self.transport.execute(api_request).await?;
        match response.status {
            200 => {
                let models: Vec<ModelInfo> = response
                    .data
                    .get("data")
                    .cloned()
                    .and_then(|data| serde_json::from_value(data).ok())
                    .unwrap_or_default();
                Ok(models
                    .into_iter()
                    .filter(|m| m.id.starts_with("gpt-") || m.id.starts_with("claude-"))
                    .collect())
            }
            401 => Err(ServiceError::Unauthorized),
            status => Err(ServiceError::Provider(
                request::extract_error_message(&response.data)
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use serde_json::{json, Value};

    fn service(transport: Arc<MockTransport>) -> OpenAiService {
        OpenAiService::with_transport(Some("sk-test".into()), transport)
    }

    fn completion_page() -> Value {
        json!({
            "model": "gpt-3.5-turbo-0125",
            "choices": [{
                "message": {"role": "assistant", "content": "Hello there."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
        })
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_network_call() {
        let transport = Arc::new(MockTransport::new(vec![]));
        let service = OpenAiService::with_transport(None, transport.clone());

        let err = service
            .complete_with_history(&[ChatMessage::user("hi")], DEFAULT_MODEL, 0.7, None)
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::MissingCredential);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn empty_history_fails_before_any_network_call() {
        let transport = Arc::new(MockTransport::new(vec![]));
        let service = service(transport.clone());

        let err = service
            .complete_with_history(&[], DEFAULT_MODEL, 0.7, None)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::EmptyInput("Conversation history cannot be empty".into())
        );
        assert_eq!(err.to_string(), "Conversation history cannot be empty");
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn blank_single_message_fails_before_any_network_call() {
        let transport = Arc::new(MockTransport::new(vec![]));
        let service = service(transport.clone());

        let err = service
            .complete("   ", None, DEFAULT_MODEL, 0.7, None)
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::EmptyInput("Message cannot be empty".into()));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn successful_completion_is_normalized() {
        let transport = Arc::new(MockTransport::new(vec![Ok(MockTransport::ok(
            200,
            completion_page(),
        ))]));
        let service = service(transport.clone());

        let completion = service
            .complete_with_history(&[ChatMessage::user("hi")], DEFAULT_MODEL, 0.7, Some(256))
            .await
            .unwrap();

        assert_eq!(completion.text, "Hello there.");
        assert_eq!(completion.model, "gpt-3.5-turbo-0125");
        assert_eq!(completion.finish_reason, "stop");
        assert_eq!(completion.usage.prompt_tokens, 12);
        assert_eq!(completion.usage.total_tokens, 16);

        let request = transport.requests().remove(0);
        assert_eq!(request.url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(request.method, "POST");
        assert_eq!(request.timeout_ms, Some(CHAT_TIMEOUT_MS));
        let headers = request.headers.expect("headers set");
        assert_eq!(
            headers.get("Authorization").map(String::as_str),
            Some("Bearer sk-test")
        );
        let body = request.body.expect("body set");
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["messages"][0]["content"], "hi");
    }

    #[tokio::test]
    async fn convenience_form_prepends_the_system_message() {
        let transport = Arc::new(MockTransport::new(vec![Ok(MockTransport::ok(
            200,
            completion_page(),
        ))]));
        let service = service(transport.clone());

        service
            .complete("  hi  ", Some("be terse"), DEFAULT_MODEL, 0.7, None)
            .await
            .unwrap();

        let body = transport.requests().remove(0).body.expect("body set");
        let messages = body["messages"].as_array().unwrap().clone();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "be terse");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "hi");
        assert!(body.get("max_tokens").is_none());
    }

    #[tokio::test]
    async fn empty_choices_still_count_as_success() {
        let transport = Arc::new(MockTransport::new(vec![Ok(MockTransport::ok(
            200,
            json!({"choices": [], "usage": {}}),
        ))]));
        let service = service(transport);

        let completion = service
            .complete_with_history(&[ChatMessage::user("hi")], DEFAULT_MODEL, 0.7, None)
            .await
            .unwrap();

        assert_eq!(completion.text, NO_RESPONSE_PLACEHOLDER);
        assert_eq!(completion.model, DEFAULT_MODEL);
        assert_eq!(completion.finish_reason, "unknown");
        assert_eq!(completion.usage, UsageSummary::default());
    }

    #[tokio::test]
    async fn auth_rate_limit_and_provider_errors_stay_distinguishable() {
        let transport = Arc::new(MockTransport::new(vec![
            Ok(MockTransport::ok(401, json!({"error": {"message": "bad key"}}))),
            Ok(MockTransport::ok(429, Value::Null)),
            Ok(MockTransport::ok(500, json!({"error": {"message": "server exploded"}}))),
            Ok(MockTransport::ok(502, Value::Null)),
        ]));
        let service = service(transport);
        let history = [ChatMessage::user("hi")];

        let err = service
            .complete_with_history(&history, DEFAULT_MODEL, 0.7, None)
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Unauthorized);

        let err = service
            .complete_with_history(&history, DEFAULT_MODEL, 0.7, None)
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::RateLimited);
        assert_eq!(err.to_string(), "Rate limit exceeded. Please try again later.");

        let err = service
            .complete_with_history(&history, DEFAULT_MODEL, 0.7, None)
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Provider("server exploded".into()));

        let err = service
            .complete_with_history(&history, DEFAULT_MODEL, 0.7, None)
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::Provider("HTTP 502".into()));
    }

    #[tokio::test]
    async fn transport_failures_surface_as_network_errors() {
        let transport = Arc::new(MockTransport::new(vec![Err(ServiceError::Network(
            "Connection error: timed out".into(),
        ))]));
        let service = service(transport);

        let err = service
            .complete_with_history(&[ChatMessage::user("hi")], DEFAULT_MODEL, 0.7, None)
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::Network("Connection error: timed out".into()));
    }

    #[tokio::test]
    async fn list_models_filters_to_chat_families() {
        let transport = Arc::new(MockTransport::new(vec![Ok(MockTransport::ok(
            200,
            json!({"data": [
                {"id": "gpt-3.5-turbo", "owned_by": "openai"},
                {"id": "whisper-1", "owned_by": "openai"},
                {"id": "claude-3-haiku", "owned_by": "anthropic"},
                {"id": "dall-e-3", "owned_by": "openai"}
            ]}),
        ))]));
        let service = service(transport.clone());

        let models = service.list_models().await.unwrap();

        let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["gpt-3.5-turbo", "claude-3-haiku"]);

        let request = transport.requests().remove(0);
        assert_eq!(request.url, "https://api.openai.com/v1/models");
        assert_eq!(request.timeout_ms, Some(MODELS_TIMEOUT_MS));
    }

    #[tokio::test]
    async fn list_models_maps_auth_failures() {
        let transport = Arc::new(MockTransport::new(vec![Ok(MockTransport::ok(
            401,
            json!({"error": {"message": "bad key"}}),
        ))]));
        let service = service(transport);

        assert_eq!(service.list_models().await.unwrap_err(), ServiceError::Unauthorized);
    }
}
