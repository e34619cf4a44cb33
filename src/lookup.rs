//! The lookup flow: search, take the first result, build the link, open it.

use thiserror::Error;
use tracing::{info, instrument};

use crate::link::{LinkError, LinkTemplate};
use crate::media::{LookupRequest, MediaKind};
use crate::opener::{OpenError, UrlOpener};
use crate::search::{SearchError, TitleSearch};

/// Errors that abort a lookup. "No results" is not an error; see
/// [`LookupOutcome::NotFound`].
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Open(#[from] OpenError),
}

/// What a lookup ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The link was handed to the platform opener.
    Opened {
        /// The streaming link
        url: String,
        /// Display title of the matched entry
        title: String,
    },
    /// The link was built but not opened (dry run).
    Previewed {
        /// The streaming link
        url: String,
        /// Display title of the matched entry
        title: String,
    },
    /// The search returned no results.
    NotFound {
        /// Kind that was searched
        kind: MediaKind,
        /// Title that was searched
        query: String,
    },
}

impl LookupOutcome {
    /// One-line status for the user.
    #[must_use]
    pub fn status_line(&self) -> String {
        match self {
            Self::Opened { url, .. } => format!("Opening: {url}"),
            Self::Previewed { url, .. } => format!("Would open: {url}"),
            Self::NotFound { kind, .. } => kind.not_found_message().to_string(),
        }
    }

    /// The built link, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Opened { url, .. } | Self::Previewed { url, .. } => Some(url),
            Self::NotFound { .. } => None,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }
}

/// Runs one lookup: a single search call, then at most one opener call.
///
/// # Errors
///
/// Returns [`LookupError`] when the search fails, the link cannot be built,
/// or the opener fails. The opener is not called after a search failure or
/// an empty result.
#[instrument(skip_all, fields(kind = %request.kind(), title = request.title(), backend = search.name()))]
pub async fn run_lookup(
    request: &LookupRequest,
    search: &dyn TitleSearch,
    template: &LinkTemplate,
    opener: &dyn UrlOpener,
) -> Result<LookupOutcome, LookupError> {
    let kind = request.kind();
    let Some(found) = search
        .search(kind, request.title(), request.year())
        .await?
    else {
        info!("No search results");
        return Ok(LookupOutcome::NotFound {
            kind,
            query: request.title().to_string(),
        });
    };

    info!(tmdb_id = found.id, matched = %found.display_title(), "Resolved title");
    let url = template.build(kind, found.id, request.episode())?;
    let title = found.display_title();

    opener.open(&url)?;
    if opener.launches() {
        Ok(LookupOutcome::Opened { url, title })
    } else {
        Ok(LookupOutcome::Previewed { url, title })
    }
}
