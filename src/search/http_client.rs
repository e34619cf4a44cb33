//! Shared HTTP client construction policy for search clients.
//!
//! Centralizes timeout, user-agent, compression and proxy defaults.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::RwLock;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Proxy};
use tracing::warn;

use crate::user_agent;

use super::SearchError;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchHttpTimeouts {
    connect_timeout_secs: u64,
    read_timeout_secs: u64,
}

impl Default for SearchHttpTimeouts {
    fn default() -> Self {
        Self {
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
        }
    }
}

static SEARCH_HTTP_TIMEOUTS: RwLock<SearchHttpTimeouts> = RwLock::new(SearchHttpTimeouts {
    connect_timeout_secs: CONNECT_TIMEOUT_SECS,
    read_timeout_secs: READ_TIMEOUT_SECS,
});

/// Configures HTTP timeouts used by search client builders.
///
/// Call before constructing a search client; existing clients keep their timeouts.
pub fn configure_search_http_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) {
    if let Ok(mut guard) = SEARCH_HTTP_TIMEOUTS.write() {
        *guard = SearchHttpTimeouts {
            connect_timeout_secs,
            read_timeout_secs,
        };
    }
}

fn search_http_timeouts() -> SearchHttpTimeouts {
    SEARCH_HTTP_TIMEOUTS
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

/// Builds a search HTTP client using shared project policy.
///
/// `client_name` is used only for logging and error messages.
///
/// # Errors
///
/// Returns [`SearchError::InvalidConfig`] when client construction fails.
pub(crate) fn build_search_http_client(client_name: &str) -> Result<Client, SearchError> {
    let user_agent = user_agent::default_search_user_agent();

    match try_build_client(&user_agent, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            // Restricted sandboxes can panic while reading system proxy
            // settings; retry with env-only proxy discovery.
            warn!(
                client = client_name,
                "Search client hit system proxy panic; using env-proxy fallback builder"
            );
            match try_build_client(&user_agent, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Panic) => Err(SearchError::invalid_config(
                    "HTTP client construction panicked while initializing networking",
                    "Unset system proxy settings or set HTTPS_PROXY explicitly",
                )),
                Err(BuildClientFailure::Build(error)) => Err(build_failure(&error)),
            }
        }
        Err(BuildClientFailure::Build(error)) => Err(build_failure(&error)),
    }
}

fn build_failure(error: &reqwest::Error) -> SearchError {
    SearchError::invalid_config(
        &format!("HTTP client construction failed: {error}"),
        "Check proxy and TLS settings",
    )
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

fn try_build_client(
    user_agent: &str,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    let user_agent = user_agent.to_string();
    catch_unwind(AssertUnwindSafe(move || {
        let mut builder = base_builder(user_agent);
        if disable_system_proxy_lookup {
            builder = apply_env_proxy_fallback(builder.no_proxy());
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_builder(user_agent: String) -> ClientBuilder {
    let timeouts = search_http_timeouts();
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_timeout_secs))
        .timeout(Duration::from_secs(timeouts.read_timeout_secs))
        .user_agent(user_agent)
        .gzip(true)
}

fn apply_env_proxy_fallback(mut builder: ClientBuilder) -> ClientBuilder {
    if let Some(proxy) = env_proxy_for_scheme("https")
        && let Ok(resolved) = Proxy::https(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    if let Some(proxy) = env_proxy_for_scheme("http")
        && let Ok(resolved) = Proxy::http(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    builder
}

fn env_proxy_for_scheme(scheme: &str) -> Option<String> {
    match scheme {
        "https" => find_first_proxy_var(&["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"]),
        "http" => find_first_proxy_var(&["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"]),
        _ => None,
    }
}

fn find_first_proxy_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
