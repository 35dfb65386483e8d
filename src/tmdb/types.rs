use serde::{Deserialize, Serialize};

pub const OVERVIEW_LIMIT: usize = 200;
pub const DEFAULT_POSTER_SIZE: &str = "w500";

/// Search result row exactly as TMDB returns it. Every field the upstream
/// may omit or null is optional here; nothing else in the crate touches
/// the raw shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMovie {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
}

/// Wire shape of a `/search/movie` response.
#[derive(Debug, Default, Deserialize)]
pub struct RawSearchResponse {
    pub page: Option<u32>,
    #[serde(default)]
    pub results: Vec<RawMovie>,
    pub total_pages: Option<u32>,
    pub total_results: Option<u64>,
}

/// `images` block of the `/configuration` payload; only the base URL is
/// interesting.
#[derive(Debug, Clone, Deserialize)]
pub struct RawImagesConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawConfiguration {
    pub images: Option<RawImagesConfig>,
}

/// Normalized movie card. Construction is total: every field gets a
/// concrete default when the raw record omits it, so presentation code
/// never sees a null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub poster_url: Option<String>,
    pub release_year: String,
    pub vote_average: f64,
    pub vote_count: u64,
}

impl MovieSummary {
    pub fn from_raw(raw: RawMovie, image_base: Option<&str>) -> Self {
        let poster_url = match (image_base, raw.poster_path.as_deref()) {
            (Some(base), Some(path)) if !path.is_empty() => {
                Some(format!("{}{}{}", base, DEFAULT_POSTER_SIZE, path))
            }
            _ => None,
        };

        Self {
            id: raw.id.unwrap_or(0),
            title: raw
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Unknown Title".to_string()),
            overview: normalize_overview(raw.overview.as_deref()),
            poster_url,
            release_year: release_year(raw.release_date.as_deref()),
            vote_average: raw.vote_average.unwrap_or(0.0),
            vote_count: raw.vote_count.unwrap_or(0),
        }
    }
}

fn normalize_overview(overview: Option<&str>) -> String {
    match overview {
        None | Some("") => "No overview available".to_string(),
        Some(text) if text.chars().count() > OVERVIEW_LIMIT => {
            let truncated: String = text.chars().take(OVERVIEW_LIMIT).collect();
            format!("{}...", truncated)
        }
        Some(text) => text.to_string(),
    }
}

// First "-"-separated segment of the release date, e.g. "2024-01-01" -> "2024".
fn release_year(release_date: Option<&str>) -> String {
    match release_date {
        Some(date) if !date.is_empty() => date
            .split('-')
            .next()
            .unwrap_or("Unknown")
            .to_string(),
        _ => "Unknown".to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub movies: Vec<MovieSummary>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
}
