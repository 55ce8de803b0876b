//! Wire-level behavior of the HTTP index client against a mock service.

use assert2::check;
use httpmock::prelude::*;
use serde_json::json;

use unisearch::{HttpIndexClient, IndexClient, IndexConfig, IndexError, ResultKind};

fn client_for(server: &MockServer) -> HttpIndexClient {
    HttpIndexClient::new(IndexConfig {
        endpoint: server.base_url(),
        application_id: "APP123".to_string(),
        api_key: "secret".to_string(),
        index_name: "site_content".to_string(),
        timeout_secs: 2,
    })
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn search_decodes_hits_and_metrics() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/1/indexes/site_content/query")
                .header("X-Application-Id", "APP123")
                .header("X-API-Key", "secret")
                .json_body(json!({
                    "query": "react",
                    "page": 0,
                    "hitsPerPage": 10,
                }));
            then.status(200).json_body(json!({
                "hits": [{
                    "objectID": "course-42",
                    "title": "Intro to <em>React</em>",
                    "description": "components and hooks",
                    "url": "/academy/courses/42",
                    "type": "course",
                    "snippet": "components and <em>hooks</em>",
                }],
                "totalHits": 37,
                "processingTimeMs": 4,
            }));
        })
        .await;

    let client = client_for(&server);
    let page = client.search("react", 0, 10).await.unwrap();

    mock.assert_async().await;
    check!(page.total_hits == 37);
    check!(page.processing_time_ms == 4);
    check!(page.hits.len() == 1);
    check!(page.hits[0].id == "course-42");
    check!(page.hits[0].kind == ResultKind::Course);
    check!(page.hits[0].snippet.as_deref() == Some("components and <em>hooks</em>"));
}

#[tokio::test(flavor = "multi_thread")]
async fn service_error_status_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/1/indexes/site_content/query");
            then.status(503);
        })
        .await;

    let client = client_for(&server);
    let err = client.search("react", 0, 10).await.unwrap_err();
    check!(matches!(err, IndexError::Service { status: 503 }));
}

#[tokio::test(flavor = "multi_thread")]
async fn suggestions_decode() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/1/indexes/site_content/suggest")
                .json_body(json!({ "query": "rea" }));
            then.status(200)
                .json_body(json!({ "suggestions": ["react", "react native"] }));
        })
        .await;

    let client = client_for(&server);
    let suggestions = client.suggestions("rea").await.unwrap();
    check!(suggestions == vec!["react".to_string(), "react native".to_string()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn click_event_posts_payload() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/1/events").json_body(json!({
                "eventType": "click",
                "index": "site_content",
                "objectID": "tool-imei",
                "position": 2,
                "query": "imei",
            }));
            then.status(200).json_body(json!({ "status": "ok" }));
        })
        .await;

    let client = client_for(&server);
    client.track_click("tool-imei", 2, "imei").await;
    mock.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn telemetry_failures_are_swallowed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/1/events");
            then.status(500);
        })
        .await;

    let client = client_for(&server);
    // Must not panic or error; the return type admits no failure.
    client.track_search("react", 5).await;
    client.track_click("course-42", 0, "react").await;
}

#[tokio::test(flavor = "multi_thread")]
async fn faceted_search_sends_filter_expression() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/1/indexes/site_content/query")
                .json_body(json!({
                    "query": "developer",
                    "filters": "type:job AND category:development",
                }));
            then.status(200).json_body(json!({
                "hits": [],
                "totalHits": 0,
                "processingTimeMs": 1,
            }));
        })
        .await;

    let client = client_for(&server);
    let filters = unisearch::SearchFilters {
        kind: Some(ResultKind::Job),
        category: Some("development".to_string()),
    };
    let page = client.search_with_facets("developer", &filters).await.unwrap();
    mock.assert_async().await;
    check!(page.hits.is_empty());
}
