mod types;

pub use types::{MovieSummary, SearchResults, DEFAULT_POSTER_SIZE, OVERVIEW_LIMIT};

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::api::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};
use crate::error::ServiceError;
use crate::providers::Provider;
use types::{RawConfiguration, RawSearchResponse};

pub const SEARCH_TIMEOUT_MS: u64 = 10_000;

/// Wrapper around the TMDB search API, scoped to one credential. Holds the
/// only piece of cross-call state in the crate: the image base URL from
/// `/configuration`, fetched at most once per instance and never
/// invalidated.
pub struct TmdbService {
    api_key: Option<String>,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    image_base: OnceCell<Option<String>>,
}

impl TmdbService {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_transport(api_key, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(api_key: Option<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            api_key,
            base_url: Provider::Tmdb.default_base_url().to_string(),
            transport,
            image_base: OnceCell::new(),
        }
    }

    fn require_key(&self) -> Result<&str, ServiceError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ServiceError::MissingCredential),
        }
    }

    /// One-shot movie search. Input failures (missing key, blank query)
    /// return before any network traffic; everything else is a single GET
    /// with no retry.
    pub async fn search(&self, query: &str, page: u32) -> Result<SearchResults, ServiceError> {
        let api_key = self.require_key()?;
        let query = query.trim();
        if query.is_empty() {
            return Err(ServiceError::EmptyInput("Query cannot be empty".into()));
        }

        let mut request = ApiRequest::get(format!("{}/search/movie", self.base_url));
        request.query = Some(vec![
            ("api_key".into(), api_key.to_string()),
            ("query".into(), query.to_string()),
            ("page".into(), page.to_string()),
            ("include_adult".into(), "false".into()),
        ]);
        request.timeout_ms = Some(SEARCH_TIMEOUT_MS);

        let response = self.transport.execute(request).await?;
        match response.status {
            200 => self.normalize_search(response).await,
            401 => Err(ServiceError::Unauthorized),
            status => Err(provider_error(&response.data, status)),
        }
    }

    async fn normalize_search(&self, response: ApiResponse) -> Result<SearchResults, ServiceError> {
        let raw: RawSearchResponse = serde_json::from_value(response.data)?;

        // The configuration lookup is only worth a round trip when some
        // result actually carries a poster path.
        let needs_posters = raw
            .results
            .iter()
            .any(|movie| movie.poster_path.as_deref().is_some_and(|p| !p.is_empty()));
        let image_base = if needs_posters {
            self.image_base_url().await
        } else {
            None
        };

        let movies: Vec<MovieSummary> = raw
            .results
            .into_iter()
            .map(|movie| MovieSummary::from_raw(movie, image_base.as_deref()))
            .collect();
        info!(count = movies.len(), "movie search completed");

        Ok(SearchResults {
            movies,
            page: raw.page.unwrap_or(1),
            total_pages: raw.total_pages.unwrap_or(0),
            total_results: raw.total_results.unwrap_or(0),
        })
    }

    /// Full poster URL for an arbitrary poster path, e.g. for detail views
    /// that want a size other than the search default.
    pub async fn poster_url(&self, poster_path: Option<&str>, size: &str) -> Option<String> {
        let path = poster_path.filter(|p| !p.is_empty())?;
        let base = self.image_base_url().await?;
        Some(format!("{}{}{}", base, size, path))
    }

    /// Image base URL from `/configuration`, fetched at most once for the
    /// lifetime of this instance. A failed fetch is cached as None so a
    /// broken configuration endpoint degrades posters instead of failing
    /// every search.
    async fn image_base_url(&self) -> Option<String> {
        self.image_base
            .get_or_init(|| self.fetch_image_base_url())
            .await
            .clone()
    }

    async fn fetch_image_base_url(&self) -> Option<String> {
        let api_key = self.api_key.as_deref()?;

        let mut request = ApiRequest::get(format!("{}/configuration", self.base_url));
        request.query = Some(vec![("api_key".into(), api_key.to_string())]);
        request.timeout_ms = Some(SEARCH_TIMEOUT_MS);

        let response = match self.transport.execute(request).await {
            Ok(resp) => resp,
            Err(err) => {
                warn!("configuration fetch failed: {}", err);
                return None;
            }
        };
        if response.status != 200 {
            warn!(status = response.status, "configuration fetch failed");
            return None;
        }

        match serde_json::from_value::<RawConfiguration>(response.data) {
            Ok(config) => config.images.and_then(|images| images.base_url),
            Err(err) => {
                warn!("configuration payload malformed: {}", err);
                None
            }
        }
    }
}

fn provider_error(data: &Value, status: u16) -> ServiceError {
    let message = data
        .get("status_message")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status));
    ServiceError::Provider(message)
}
