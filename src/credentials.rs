use std::env;

pub const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Credential from the environment. Whitespace-only values count as
/// absent so a blank `.env` line does not look like a key; the UI falls
/// back to manual entry when this returns None.
pub fn api_key_from_env(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn tmdb_api_key() -> Option<String> {
    api_key_from_env(TMDB_API_KEY_ENV)
}

pub fn openai_api_key() -> Option<String> {
    api_key_from_env(OPENAI_API_KEY_ENV)
}
