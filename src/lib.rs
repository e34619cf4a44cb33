//! Watchlink Core Library
//!
//! This library provides the core functionality for the watchlink tool,
//! which turns a movie or TV show title into a streaming link and opens it.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`media`] - Media kinds and validated lookup requests
//! - [`search`] - Title resolution against the TMDB search API
//! - [`link`] - Streaming URL template substitution
//! - [`opener`] - Platform URL opening
//! - [`lookup`] - The end-to-end lookup flow tying the above together
//! - [`interactive`] - Prompt-driven request entry

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod interactive;
pub mod link;
pub mod lookup;
pub mod media;
pub mod opener;
pub mod search;
mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use link::{DEFAULT_LINK_BASE_URL, LinkError, LinkTemplate};
pub use lookup::{LookupError, LookupOutcome, run_lookup};
pub use media::{EpisodeRef, InputError, LookupRequest, MediaKind};
pub use opener::{DryRunOpener, OpenError, SystemOpener, UrlOpener};
pub use search::{
    DEFAULT_TMDB_BASE_URL, SearchError, SearchMatch, TitleSearch, TmdbClient,
    configure_search_http_timeouts,
};
