mod verify;

pub use verify::{verify_api_key, KeyStatus, PROBE_TIMEOUT_MS};

use std::collections::HashMap;

/// The third-party HTTP APIs the dashboard talks to. TMDB authenticates
/// via a query-string credential, OpenAI via a bearer header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Tmdb,
    OpenAi,
}

impl Provider {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Tmdb => "https://api.themoviedb.org/3",
            Provider::OpenAi => "https://api.openai.com/v1",
        }
    }

    /// Lightweight authenticated endpoint used solely to classify a
    /// credential, never to fetch business data.
    pub fn probe_url(&self, base_url: &str) -> String {
        let trimmed = base_url.trim_end_matches('/');
        match self {
            Provider::Tmdb => format!("{}/authentication", trimmed),
            Provider::OpenAi => {
                if trimmed.ends_with("/v1") {
                    format!("{}/models", trimmed)
                } else {
                    format!("{}/v1/models", trimmed)
                }
            }
        }
    }

    pub fn auth_headers(&self, api_key: &str) -> Option<HashMap<String, String>> {
        match self {
            Provider::Tmdb => None,
            Provider::OpenAi => {
                let mut headers = HashMap::new();
                headers.insert("Authorization".into(), format!("Bearer {}", api_key));
                headers.insert("Content-Type".into(), "application/json".into());
                Some(headers)
            }
        }
    }

    pub fn auth_query(&self, api_key: &str) -> Option<Vec<(String, String)>> {
        match self {
            Provider::Tmdb => Some(vec![("api_key".into(), api_key.into())]),
            Provider::OpenAi => None,
        }
    }
}
