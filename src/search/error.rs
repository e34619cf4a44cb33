//! Error types for title search operations.
//!
//! Each variant carries a human-readable reason plus a suggestion line so the
//! CLI can print it unchanged.

use thiserror::Error;

/// Errors that can occur while resolving a title to an id.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// The client could not be constructed from the given settings
    #[error("invalid search configuration: {reason}\n  Suggestion: {suggestion}")]
    InvalidConfig {
        /// What is wrong with the configuration
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The API rejected the key
    #[error("search API rejected the API key\n  Suggestion: Check TMDB_API_KEY or the `api_key` config value")]
    Unauthorized,

    /// The request could not be completed or the API answered with an error status
    #[error("search for '{query}' failed: {reason}\n  Suggestion: {suggestion}")]
    RequestFailed {
        /// The title being searched
        query: String,
        /// Why the request failed
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The API answered with a body we could not interpret
    #[error("unexpected search API response for '{query}': {reason}")]
    UnexpectedResponse {
        /// The title being searched
        query: String,
        /// What could not be parsed
        reason: String,
    },
}

impl SearchError {
    /// Creates an `InvalidConfig` error.
    #[must_use]
    pub fn invalid_config(reason: &str, suggestion: &str) -> Self {
        Self::InvalidConfig {
            reason: reason.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    /// Creates a `RequestFailed` error with the default suggestion.
    #[must_use]
    pub fn request_failed(query: &str, reason: &str) -> Self {
        Self::request_failed_with(query, reason, "Check your network connection and try again")
    }

    /// Creates a `RequestFailed` error with a specific suggestion.
    #[must_use]
    pub fn request_failed_with(query: &str, reason: &str, suggestion: &str) -> Self {
        Self::RequestFailed {
            query: query.to_string(),
            reason: reason.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    /// Creates an `UnexpectedResponse` error.
    #[must_use]
    pub fn unexpected_response(query: &str, reason: &str) -> Self {
        Self::UnexpectedResponse {
            query: query.to_string(),
            reason: reason.to_string(),
        }
    }
}
