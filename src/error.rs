use std::fmt::{Display, Formatter};

/// Failure surfaced by the service wrappers. Every variant renders to the
/// message the UI shows verbatim; no raw transport fault crosses this
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// No credential was configured for the call.
    MissingCredential,
    /// Caller-side input rejected before any network traffic.
    EmptyInput(String),
    /// The provider rejected the credential (HTTP 401).
    Unauthorized,
    /// The provider throttled the request (HTTP 429).
    RateLimited,
    /// Any other non-success status, with the provider's own message when
    /// one was present in the body.
    Provider(String),
    /// Connection, timeout or other transport-level failure.
    Network(String),
    /// A response body that could not be interpreted.
    Malformed(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::MissingCredential => write!(f, "API key is required"),
            ServiceError::EmptyInput(message) => write!(f, "{}", message),
            ServiceError::Unauthorized => write!(f, "Invalid API key"),
            ServiceError::RateLimited => {
                write!(f, "Rate limit exceeded. Please try again later.")
            }
            ServiceError::Provider(message) => write!(f, "API error: {}", message),
            ServiceError::Network(message) => write!(f, "{}", message),
            ServiceError::Malformed(message) => write!(f, "Invalid response: {}", message),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<reqwest::Error> for ServiceError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() || value.is_connect() {
            ServiceError::Network(format!("Connection error: {}", value))
        } else {
            ServiceError::Network(format!("Request error: {}", value))
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(value: serde_json::Error) -> Self {
        ServiceError::Malformed(value.to_string())
    }
}
