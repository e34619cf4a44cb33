//! Title resolution: turns a free-text title into a TMDB identifier.
//!
//! # Architecture
//!
//! - [`TitleSearch`] - Async trait implemented by search backends
//! - [`SearchMatch`] - The first result of a search
//! - [`TmdbClient`] - Backend for the public TMDB v3 search API
//!
//! # Example
//!
//! ```no_run
//! use watchlink_core::search::{TitleSearch, TmdbClient};
//! use watchlink_core::MediaKind;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TmdbClient::new("my-api-key")?;
//! if let Some(found) = client.search(MediaKind::Movie, "Inception", None).await? {
//!     println!("{} -> {}", found.title, found.id);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod http_client;
mod tmdb;

pub use error::SearchError;
pub use http_client::configure_search_http_timeouts;
pub use tmdb::{DEFAULT_TMDB_BASE_URL, TmdbClient};

use async_trait::async_trait;

use crate::media::MediaKind;

/// The first search result for a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// TMDB numeric id.
    pub id: u64,
    /// Display title (movie `title` or series `name`); empty when absent.
    pub title: String,
    /// Release or first-air year, when the API reported a date.
    pub year: Option<String>,
    /// Short synopsis, when present.
    pub overview: Option<String>,
}

impl SearchMatch {
    /// Creates a match with only an id and title.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            year: None,
            overview: None,
        }
    }

    /// Title with the year appended in parentheses when known.
    #[must_use]
    pub fn display_title(&self) -> String {
        match &self.year {
            Some(year) if !self.title.is_empty() => format!("{} ({year})", self.title),
            _ => self.title.clone(),
        }
    }
}

/// A backend that can resolve titles.
///
/// Uses `async_trait` so lookups can take `&dyn TitleSearch`.
#[async_trait]
pub trait TitleSearch: Send + Sync {
    /// Returns the backend's name (e.g., "tmdb").
    fn name(&self) -> &str;

    /// Searches for `title` and returns the first result, or `None` when the
    /// result list is empty.
    async fn search(
        &self,
        kind: MediaKind,
        title: &str,
        year: Option<u16>,
    ) -> Result<Option<SearchMatch>, SearchError>;
}
