use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ServiceError;

/// One outbound HTTP call. Every request the wrappers issue goes through
/// this shape so tests can script and count them.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub url: String,
    pub method: String,
    pub headers: Option<HashMap<String, String>>,
    pub query: Option<Vec<(String, String)>>,
    pub body: Option<Value>,
    pub timeout_ms: Option<u64>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".into(),
            headers: None,
            query: None,
            body: None,
            timeout_ms: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            method: "POST".into(),
            headers: None,
            query: None,
            body: Some(body),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub ok: bool,
    pub data: Value,
}

/// Seam between the wrappers and the network. Production code uses
/// [`ReqwestTransport`]; tests substitute a scripted mock.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, req: ApiRequest) -> Result<ApiResponse, ServiceError>;
}

/// Blocking-per-call reqwest transport. A fresh client is built for each
/// request; nothing is pooled or reused across calls.
#[derive(Debug, Default)]
pub struct ReqwestTransport;

impl ReqwestTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, req: ApiRequest) -> Result<ApiResponse, ServiceError> {
        let mut client_builder = reqwest::Client::builder();
        if let Some(ms) = req.timeout_ms {
            client_builder = client_builder.timeout(Duration::from_millis(ms));
        }
        let client = client_builder.build().map_err(ServiceError::from)?;

        let method = Method::from_bytes(req.method.as_bytes())
            .map_err(|e| ServiceError::Network(format!("Request error: {}", e)))?;

        let mut request_builder = client.request(method, &req.url);

        if let Some(query) = &req.query {
            request_builder = request_builder.query(query);
        }

        if let Some(headers) = &req.headers {
            let preview = headers
                .iter()
                .map(|(key, value)| format!("{}={}", key, sanitize_header_value(key, value)))
                .collect::<Vec<_>>()
                .join(", ");
            debug!(headers = %preview, "request headers");

            let mut header_map = HeaderMap::new();
            for (key, value) in headers {
                if let (Ok(name), Ok(header_value)) = (
                    HeaderName::from_bytes(key.as_bytes()),
                    HeaderValue::from_str(value),
                ) {
                    header_map.insert(name, header_value);
                } else {
                    warn!(header = %key, "skipping invalid header");
                }
            }
            request_builder = request_builder.headers(header_map);
        }

        if let Some(body) = &req.body {
            request_builder = request_builder.json(body);
        }

        debug!(method = %req.method, url = %req.url, "sending request");
        let response = request_builder.send().await.map_err(ServiceError::from)?;

        let status = response.status();
        let ok = status.is_success();
        let text = response.text().await.map_err(ServiceError::from)?;
        debug!(
            status = status.as_u16(),
            body = %truncate_for_log(&text, 256),
            "response received"
        );

        Ok(ApiResponse {
            status: status.as_u16(),
            ok,
            data: parse_body_to_value(&text),
        })
    }
}

/// Non-JSON bodies survive as strings so callers can still surface them;
/// empty bodies become Null.
pub(crate) fn parse_body_to_value(text: &str) -> Value {
    if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    }
}

pub(crate) fn truncate_for_log(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max).collect();
        format!("{}…", truncated)
    }
}

pub(crate) fn sanitize_header_value(key: &str, value: &str) -> String {
    let lowered = key.to_ascii_lowercase();
    if lowered.contains("authorization")
        || lowered.contains("api-key")
        || lowered.contains("apikey")
        || lowered.contains("secret")
        || lowered.contains("token")
        || lowered.contains("cookie")
    {
        "***".into()
    } else {
        truncate_for_log(value, 64)
    }
}
