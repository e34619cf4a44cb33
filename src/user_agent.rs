//! Shared User-Agent string for outbound HTTP requests.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/watchlink";

/// Default User-Agent for search requests.
#[must_use]
pub(crate) fn default_search_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("watchlink/{version} (title-lookup; +{PROJECT_UA_URL})")
}
