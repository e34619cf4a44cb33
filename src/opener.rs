//! Hands a finished link to the platform's URL handler.

use thiserror::Error;
use tracing::{debug, info};

/// Failure to hand a URL to the platform.
#[derive(Debug, Error)]
#[error("failed to open '{url}': {source}\n  Suggestion: Open the link manually or rerun with --no-open")]
pub struct OpenError {
    /// The URL that could not be opened
    pub url: String,
    #[source]
    pub source: std::io::Error,
}

/// Something that can open a URL for the user.
pub trait UrlOpener: Send + Sync {
    /// Returns `true` when [`UrlOpener::open`] actually launches something.
    fn launches(&self) -> bool;

    /// Opens `url`.
    ///
    /// # Errors
    ///
    /// Returns [`OpenError`] when the platform handler cannot be started.
    fn open(&self, url: &str) -> Result<(), OpenError>;
}

/// Opens URLs with the desktop's default handler (xdg-open, `open`, `start`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn launches(&self) -> bool {
        true
    }

    fn open(&self, url: &str) -> Result<(), OpenError> {
        info!(%url, "Opening link in default browser");
        open::that(url).map_err(|source| OpenError {
            url: url.to_string(),
            source,
        })
    }
}

/// Opens nothing; used for `--no-open` previews.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunOpener;

impl UrlOpener for DryRunOpener {
    fn launches(&self) -> bool {
        false
    }

    fn open(&self, url: &str) -> Result<(), OpenError> {
        debug!(%url, "Dry run; not opening link");
        Ok(())
    }
}
