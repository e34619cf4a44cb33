//! Streaming link construction.
//!
//! Substitutes a resolved TMDB id (and, for series, the season/episode) into
//! the streaming site's fixed URL layout.

use thiserror::Error;
use url::Url;

use crate::media::{EpisodeRef, MediaKind};

/// Default streaming site base URL.
pub const DEFAULT_LINK_BASE_URL: &str = "https://vixsrc.to";

/// Errors raised while building a streaming link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// The configured base URL is not an absolute http(s) URL.
    #[error("invalid link base URL '{base_url}': {reason}\n  Suggestion: Use an absolute http(s) URL such as https://vixsrc.to")]
    InvalidBaseUrl {
        /// The rejected base URL
        base_url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A series link was requested without an episode.
    #[error("series links need a season and episode")]
    MissingEpisode,
}

/// URL layout of the streaming site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplate {
    base_url: String,
}

impl LinkTemplate {
    /// Creates a template rooted at `base_url`.
    ///
    /// Trailing slashes are stripped so joined paths never double up.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidBaseUrl`] unless `base_url` parses as an
    /// absolute `http` or `https` URL without a query or fragment.
    pub fn new(base_url: &str) -> Result<Self, LinkError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| LinkError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LinkError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        // Paths are appended textually; a query or fragment would swallow them.
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(LinkError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "query strings and fragments are not supported".to_string(),
            });
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the movie link: `{base}/movie/{id}`.
    #[must_use]
    pub fn movie(&self, tmdb_id: u64) -> String {
        format!("{}/movie/{tmdb_id}", self.base_url)
    }

    /// Builds the episode link: `{base}/tv/{id}/{season}/{episode}`.
    #[must_use]
    pub fn episode(&self, tmdb_id: u64, episode: EpisodeRef) -> String {
        format!(
            "{}/tv/{tmdb_id}/{}/{}",
            self.base_url, episode.season, episode.episode
        )
    }

    /// Builds the link for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::MissingEpisode`] for a series without an episode.
    /// Any episode passed with a movie is ignored.
    pub fn build(
        &self,
        kind: MediaKind,
        tmdb_id: u64,
        episode: Option<EpisodeRef>,
    ) -> Result<String, LinkError> {
        match kind {
            MediaKind::Movie => Ok(self.movie(tmdb_id)),
            MediaKind::Tv => episode
                .map(|ep| self.episode(tmdb_id, ep))
                .ok_or(LinkError::MissingEpisode),
        }
    }
}

impl Default for LinkTemplate {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LINK_BASE_URL.to_string(),
        }
    }
}
