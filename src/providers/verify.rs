use tracing::{info, warn};

use super::Provider;
use crate::api::{ApiRequest, HttpTransport};

pub const PROBE_TIMEOUT_MS: u64 = 10_000;

/// Three-way classification of a credential. `Error` covers transport and
/// provider failures that say nothing about the key itself, so the UI can
/// tell "your key is wrong" apart from "the provider is unreachable".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Valid,
    Invalid,
    Error,
}

/// Classify a credential with a single probe request. An empty or absent
/// key short-circuits to `Error` without touching the network; there is
/// exactly one attempt per call, no retry.
pub async fn verify_api_key(
    transport: &dyn HttpTransport,
    provider: Provider,
    api_key: Option<&str>,
) -> KeyStatus {
    let key = match api_key.map(str::trim) {
        Some(k) if !k.is_empty() => k,
        _ => return KeyStatus::Error,
    };

    let mut request = ApiRequest::get(provider.probe_url(provider.default_base_url()));
    request.headers = provider.auth_headers(key);
    request.query = provider.auth_query(key);
    request.timeout_ms = Some(PROBE_TIMEOUT_MS);

    let response = match transport.execute(request).await {
        Ok(resp) => resp,
        Err(err) => {
            warn!(?provider, "key probe failed: {}", err);
            return KeyStatus::Error;
        }
    };

    let status = match response.status {
        200 if response.data.is_object() => KeyStatus::Valid,
        // A 200 whose body did not decode as JSON tells us nothing.
        200 => KeyStatus::Error,
        401 => KeyStatus::Invalid,
        _ => KeyStatus::Error,
    };
    info!(?provider, http_status = response.status, ?status, "key probe finished");
    status
}
