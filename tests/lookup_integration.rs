//! Integration tests for the lookup flow.
//!
//! Drives the public API end to end: TMDB client against a mock server,
//! link template, and a dry-run opener.

use watchlink_core::{
    DryRunOpener, LinkTemplate, LookupOutcome, LookupRequest, MediaKind, SearchError,
    TitleSearch, TmdbClient, run_lookup,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

#[tokio::test]
async fn test_movie_response_produces_movie_link() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "Inception"))
        .and(query_param("api_key", "integration-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{"id": 27205, "title": "Inception", "release_date": "2010-07-15"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TmdbClient::with_base_url("integration-key", mock_server.uri()).unwrap();
    let request = LookupRequest::movie("Inception").unwrap();

    let outcome = run_lookup(&request, &client, &LinkTemplate::default(), &DryRunOpener)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        LookupOutcome::Previewed {
            url: "https://vixsrc.to/movie/27205".to_string(),
            title: "Inception (2010)".to_string(),
        }
    );
}

#[tokio::test]
async fn test_tv_response_produces_episode_link() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .and(query_param("query", "Breaking Bad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {"id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20"},
                {"id": 99999, "name": "Breaking Bad: Original Minisodes"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = TmdbClient::with_base_url("integration-key", mock_server.uri()).unwrap();
    let request = LookupRequest::tv("Breaking Bad", 1, 2).unwrap();

    let outcome = run_lookup(&request, &client, &LinkTemplate::default(), &DryRunOpener)
        .await
        .unwrap();

    assert_eq!(outcome.url(), Some("https://vixsrc.to/tv/1396/1/2"));
}

#[tokio::test]
async fn test_empty_results_produce_not_found() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})),
        )
        .mount(&mock_server)
        .await;

    let client = TmdbClient::with_base_url("integration-key", mock_server.uri()).unwrap();
    let request = LookupRequest::movie("asdfghjkl").unwrap();

    let outcome = run_lookup(&request, &client, &LinkTemplate::default(), &DryRunOpener)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        LookupOutcome::NotFound {
            kind: MediaKind::Movie,
            query: "asdfghjkl".to_string(),
        }
    );
    assert_eq!(outcome.status_line(), "Movie not found.");
}

#[tokio::test]
async fn test_unreachable_api_reports_request_failure() {
    // Port 9 (discard) on localhost is expected to refuse connections.
    let client = TmdbClient::with_base_url("integration-key", "http://127.0.0.1:9").unwrap();
    let err = client
        .search(MediaKind::Movie, "Inception", None)
        .await
        .unwrap_err();
    assert!(
        matches!(err, SearchError::RequestFailed { .. }),
        "got: {err:?}"
    );
    assert!(!err.to_string().contains("integration-key"));
}
