//! Service layer for the Hello Dashboard demo app: TMDB movie search,
//! OpenAI chat completion and API key validation, plus the compound
//! interest math behind the calculator page. The UI consumes these
//! wrappers directly and renders their error messages verbatim.

mod api;
mod config;
mod credentials;
mod error;
mod finance;
mod openai;
mod providers;
#[cfg(test)]
mod testing;
mod tmdb;
mod utils;

pub use api::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};
pub use config::{load_config, AppConfig};
pub use credentials::{
    api_key_from_env, openai_api_key, tmdb_api_key, OPENAI_API_KEY_ENV, TMDB_API_KEY_ENV,
};
pub use error::ServiceError;
pub use finance::{compound_interest, CompoundInterest, YearBreakdown};
pub use openai::{
    ChatCompletion, ChatMessage, ModelInfo, OpenAiService, UsageSummary, CHAT_TIMEOUT_MS,
    DEFAULT_MODEL, DEFAULT_TEMPERATURE, NO_RESPONSE_PLACEHOLDER,
};
pub use providers::{verify_api_key, KeyStatus, Provider, PROBE_TIMEOUT_MS};
pub use tmdb::{MovieSummary, SearchResults, TmdbService, SEARCH_TIMEOUT_MS};
pub use utils::{load_environment, setup_logging};
