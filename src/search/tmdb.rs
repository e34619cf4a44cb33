//! TMDB search backend.
//!
//! The [`TmdbClient`] calls `GET {base}/search/movie` or `GET {base}/search/tv`
//! and reads the first entry of the `results` array.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::media::MediaKind;

use super::http_client::build_search_http_client;
use super::{SearchError, SearchMatch, TitleSearch};

/// Default TMDB v3 API base URL.
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

// ==================== TMDB API Response Types ====================

/// Top-level search response. Only `results` matters here.
///
/// Entries stay raw so a malformed hit past the first cannot reject the page.
#[derive(Debug, Deserialize)]
pub(crate) struct TmdbSearchResponse {
    pub results: Vec<serde_json::Value>,
}

impl TmdbSearchResponse {
    /// Decodes the first hit; later entries are never inspected.
    pub fn first_item(self) -> Result<Option<TmdbSearchItem>, serde_json::Error> {
        self.results
            .into_iter()
            .next()
            .map(serde_json::from_value)
            .transpose()
    }
}

/// One search hit. Movies carry `title`/`release_date`, series `name`/`first_air_date`.
#[derive(Debug, Deserialize)]
pub(crate) struct TmdbSearchItem {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct TmdbStatus {
    status_message: Option<String>,
}

// ==================== TmdbClient ====================

/// Resolves titles through the TMDB v3 search API.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: Option<String>,
}

impl TmdbClient {
    /// Creates a client against the public TMDB API.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] when the key is empty or contains
    /// control characters, or the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SearchError> {
        Self::build(api_key.into(), DEFAULT_TMDB_BASE_URL.to_string())
    }

    /// Creates a client with a custom base URL (mirrors, or wiremock in tests).
    ///
    /// # Errors
    ///
    /// Same as [`TmdbClient::new`], plus an unparseable base URL.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, SearchError> {
        Self::build(api_key.into(), base_url.into())
    }

    /// Requests localized results (e.g. `it-IT`).
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|value| !value.trim().is_empty());
        self
    }

    fn build(api_key: String, base_url: String) -> Result<Self, SearchError> {
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(SearchError::invalid_config(
                "TMDB API key is empty",
                "Pass --api-key, set TMDB_API_KEY, or add `api_key` to the config file",
            ));
        }
        if api_key.chars().any(char::is_control) {
            return Err(SearchError::invalid_config(
                "TMDB API key contains control characters",
                "Copy the key again without line breaks",
            ));
        }

        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            SearchError::invalid_config(
                &format!("invalid API base URL '{base_url}': {e}"),
                "Use an absolute URL such as https://api.themoviedb.org/3",
            )
        })?;

        let client = build_search_http_client("tmdb")?;
        Ok(Self {
            client,
            base_url,
            api_key,
            language: None,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, kind: MediaKind) -> String {
        format!("{}/{}", self.base_url, kind.search_path())
    }

    fn request_url(
        &self,
        kind: MediaKind,
        title: &str,
        year: Option<u16>,
    ) -> Result<Url, SearchError> {
        let mut url = Url::parse(&self.endpoint(kind)).map_err(|e| {
            SearchError::invalid_config(
                &format!("invalid search endpoint: {e}"),
                "Check the API base URL",
            )
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.api_key);
            pairs.append_pair("query", title);
            pairs.append_pair("include_adult", "false");
            if let Some(language) = &self.language {
                pairs.append_pair("language", language);
            }
            if let Some(year) = year {
                pairs.append_pair(kind.year_param(), &year.to_string());
            }
        }
        Ok(url)
    }
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TitleSearch for TmdbClient {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    #[tracing::instrument(skip(self), fields(backend = "tmdb"))]
    async fn search(
        &self,
        kind: MediaKind,
        title: &str,
        year: Option<u16>,
    ) -> Result<Option<SearchMatch>, SearchError> {
        let url = self.request_url(kind, title, year)?;
        debug!(url = %redacted_url(&url), "Calling TMDB search API");

        let response = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                let reason = if e.is_timeout() {
                    "request timed out"
                } else {
                    "cannot reach the TMDB API"
                };
                // reqwest errors embed the full URL, which includes the key.
                warn!(error = %e.without_url(), "TMDB search request failed");
                return Err(SearchError::request_failed(title, reason));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let code = status.as_u16();
            if code == 401 {
                return Err(SearchError::Unauthorized);
            }
            let api_message = response
                .json::<TmdbStatus>()
                .await
                .ok()
                .and_then(|body| body.status_message);
            debug!(status = code, ?api_message, "TMDB search API error");
            return Err(status_error(title, code, api_message.as_deref()));
        }

        let body = response.json::<TmdbSearchResponse>().await.map_err(|e| {
            warn!(error = %e.without_url(), "Failed to parse TMDB response JSON");
            SearchError::unexpected_response(title, "body is not a TMDB search result page")
        })?;

        debug!(results = body.results.len(), "TMDB search returned");
        let item = body.first_item().map_err(|e| {
            warn!(error = %e, "Failed to parse first TMDB search result");
            SearchError::unexpected_response(title, "first search result is malformed")
        })?;
        Ok(item.map(|item| first_match(kind, item)))
    }
}

/// Renders `url` for logs with the `api_key` value masked.
fn redacted_url(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == "api_key" {
                "<redacted>".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

fn status_error(title: &str, code: u16, api_message: Option<&str>) -> SearchError {
    match code {
        404 => SearchError::request_failed_with(
            title,
            "search endpoint not found (HTTP 404)",
            "Check the API base URL",
        ),
        429 => SearchError::request_failed_with(
            title,
            "TMDB rate limit exceeded (HTTP 429)",
            "Wait a few seconds and try again",
        ),
        s if s >= 500 => SearchError::request_failed_with(
            title,
            &format!("TMDB API unavailable (HTTP {s})"),
            "Try again later",
        ),
        s => {
            let reason = match api_message {
                Some(message) => format!("TMDB API returned HTTP {s}: {message}"),
                None => format!("TMDB API returned HTTP {s}"),
            };
            SearchError::request_failed_with(title, &reason, "Check the title and API settings")
        }
    }
}

// ==================== Extraction Helpers ====================

/// Converts the first search hit into a [`SearchMatch`].
fn first_match(kind: MediaKind, item: TmdbSearchItem) -> SearchMatch {
    let (title, date) = match kind {
        MediaKind::Movie => (item.title.or(item.name), item.release_date),
        MediaKind::Tv => (item.name.or(item.title), item.first_air_date),
    };
    SearchMatch {
        id: item.id,
        title: title.unwrap_or_default(),
        year: date.as_deref().and_then(extract_year),
        overview: item.overview.filter(|text| !text.trim().is_empty()),
    }
}

/// Extracts the year from an ISO `YYYY-MM-DD` date; TMDB sends `""` when unknown.
fn extract_year(date: &str) -> Option<String> {
    let year = date.trim().get(..4)?;
    year.chars()
        .all(|c| c.is_ascii_digit())
        .then(|| year.to_string())
}
