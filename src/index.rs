//! External full-text index client.
//!
//! A thin adapter over the managed search service: ranked queries, faceted
//! queries, suggestion queries, and fire-and-forget analytics events. All
//! operations are independently failable; telemetry failures are swallowed
//! here, everything else is reported as [`IndexError`] for the orchestrator
//! to contain.

use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::config::IndexConfig;
use crate::error::IndexError;
use crate::types::{ResultKind, SearchFilters, SearchPage, SearchResult};

/// Operations the orchestrator needs from the managed index service.
///
/// Object-safe so the orchestrator can hold `Arc<dyn IndexClient>` and tests
/// can substitute failing or counting implementations.
pub trait IndexClient: Send + Sync {
    /// Ranked search returning one result page.
    fn search<'a>(
        &'a self,
        query: &'a str,
        page: usize,
        hits_per_page: usize,
    ) -> BoxFuture<'a, Result<SearchPage, IndexError>>;

    /// Facet-filtered search. Takes precedence over [`IndexClient::search`]
    /// when the caller supplies non-empty filters.
    fn search_with_facets<'a>(
        &'a self,
        query: &'a str,
        filters: &'a SearchFilters,
    ) -> BoxFuture<'a, Result<SearchPage, IndexError>>;

    /// Ranked suggestions from the service's own suggestion index.
    fn suggestions<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<String>, IndexError>>;

    /// Impression telemetry. Never fails; transport errors are swallowed.
    fn track_search<'a>(&'a self, query: &'a str, result_count: usize) -> BoxFuture<'a, ()>;

    /// Click-through telemetry. Never fails; transport errors are swallowed.
    fn track_click<'a>(
        &'a self,
        object_id: &'a str,
        position: usize,
        query: &'a str,
    ) -> BoxFuture<'a, ()>;
}

/// HTTP implementation of [`IndexClient`].
pub struct HttpIndexClient {
    http: reqwest::Client,
    config: IndexConfig,
}

impl HttpIndexClient {
    pub fn new(config: IndexConfig) -> Result<Self, IndexError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(IndexError::Transport)?;
        Ok(Self { http, config })
    }

    fn index_url(&self, operation: &str) -> String {
        format!(
            "{}/1/indexes/{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.index_name,
            operation
        )
    }

    fn events_url(&self) -> String {
        format!("{}/1/events", self.config.endpoint.trim_end_matches('/'))
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: serde_json::Value,
    ) -> Result<T, IndexError> {
        let response = self
            .http
            .post(url)
            .header("X-Application-Id", &self.config.application_id)
            .header("X-API-Key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexError::Service {
                status: status.as_u16(),
            });
        }
        response.json::<T>().await.map_err(IndexError::Decode)
    }

    /// Fire an analytics event, swallowing any failure.
    async fn post_event(&self, body: serde_json::Value) {
        let result = self
            .http
            .post(self.events_url())
            .header("X-Application-Id", &self.config.application_id)
            .header("X-API-Key", &self.config.api_key)
            .json(&body)
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                tracing::debug!("analytics event rejected: HTTP {}", response.status());
            }
            Err(e) => tracing::debug!("analytics event dropped: {e}"),
            Ok(_) => {}
        }
    }

    async fn run_query(&self, body: serde_json::Value) -> Result<SearchPage, IndexError> {
        let response: QueryResponse = self.post_json(&self.index_url("query"), body).await?;
        Ok(SearchPage {
            hits: response.hits.into_iter().map(IndexHit::into_result).collect(),
            total_hits: response.total_hits,
            processing_time_ms: response.processing_time_ms,
        })
    }
}

impl IndexClient for HttpIndexClient {
    fn search<'a>(
        &'a self,
        query: &'a str,
        page: usize,
        hits_per_page: usize,
    ) -> BoxFuture<'a, Result<SearchPage, IndexError>> {
        Box::pin(async move {
            self.run_query(json!({
                "query": query,
                "page": page,
                "hitsPerPage": hits_per_page,
            }))
            .await
        })
    }

    fn search_with_facets<'a>(
        &'a self,
        query: &'a str,
        filters: &'a SearchFilters,
    ) -> BoxFuture<'a, Result<SearchPage, IndexError>> {
        Box::pin(async move {
            self.run_query(json!({
                "query": query,
                "filters": facet_expression(filters),
            }))
            .await
        })
    }

    fn suggestions<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<Vec<String>, IndexError>> {
        Box::pin(async move {
            let response: SuggestResponse = self
                .post_json(&self.index_url("suggest"), json!({ "query": query }))
                .await?;
            Ok(response.suggestions)
        })
    }

    fn track_search<'a>(&'a self, query: &'a str, result_count: usize) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            self.post_event(json!({
                "eventType": "search",
                "index": self.config.index_name,
                "query": query,
                "resultCount": result_count,
            }))
            .await;
        })
    }

    fn track_click<'a>(
        &'a self,
        object_id: &'a str,
        position: usize,
        query: &'a str,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            self.post_event(json!({
                "eventType": "click",
                "index": self.config.index_name,
                "objectID": object_id,
                "position": position,
                "query": query,
            }))
            .await;
        })
    }
}

/// Render facet filters as the service's filter expression.
fn facet_expression(filters: &SearchFilters) -> String {
    let mut parts = Vec::with_capacity(2);
    if let Some(kind) = filters.kind {
        parts.push(format!("type:{kind}"));
    }
    if let Some(category) = &filters.category {
        parts.push(format!("category:{category}"));
    }
    parts.join(" AND ")
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    hits: Vec<IndexHit>,
    #[serde(rename = "totalHits")]
    total_hits: u64,
    #[serde(rename = "processingTimeMs")]
    processing_time_ms: u64,
}

#[derive(Debug, Deserialize)]
struct SuggestResponse {
    suggestions: Vec<String>,
}

/// One hit as the service returns it.
#[derive(Debug, Deserialize)]
struct IndexHit {
    #[serde(rename = "objectID")]
    object_id: String,
    title: String,
    #[serde(default)]
    description: String,
    url: String,
    #[serde(rename = "type")]
    kind: ResultKind,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

impl IndexHit {
    fn into_result(self) -> SearchResult {
        SearchResult {
            id: self.object_id,
            title: self.title,
            description: self.description,
            url: self.url,
            kind: self.kind,
            category: self.category,
            snippet: self.snippet,
            relevance: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn facet_expression_joins_set_fields() {
        check!(facet_expression(&SearchFilters::default()) == "");

        let filters = SearchFilters {
            kind: Some(ResultKind::Job),
            category: Some("development".into()),
        };
        check!(facet_expression(&filters) == "type:job AND category:development");
    }

    #[test]
    fn hit_decodes_service_field_names() {
        let hit: IndexHit = serde_json::from_value(serde_json::json!({
            "objectID": "course-42",
            "title": "Intro to <em>React</em>",
            "url": "/academy/courses/42",
            "type": "course",
            "snippet": "components and <em>hooks</em>",
        }))
        .unwrap();
        let result = hit.into_result();
        check!(result.id == "course-42");
        check!(result.kind == ResultKind::Course);
        check!(result.snippet.as_deref() == Some("components and <em>hooks</em>"));
        check!(result.relevance.is_none());
    }
}
