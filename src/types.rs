//! Shared result and wire types for the search engine.

use serde::{Deserialize, Serialize};

/// The canonical output unit of every search path.
///
/// Both the external index adapter and the local fallback map their rows
/// into this shape before anything reaches the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Unique within a result set (not globally unique across sources).
    pub id: String,
    /// Display title; may carry inline emphasis markup from the external index.
    pub title: String,
    /// Short summary.
    pub description: String,
    /// Destination path (internal route or external link).
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ResultKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Highlighted excerpt shown in place of `description` when the
    /// external index supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Local ranking score. Populated by the fallback path only; the
    /// external index's own ordering is authoritative when it is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<u32>,
}

/// Closed set of content kinds. Consumers must not assume additional
/// variants without a type update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Page,
    Blog,
    Job,
    Course,
    Tool,
}

impl ResultKind {
    /// Fixed tie-break priority used when two candidates score equal
    /// in the fallback path.
    pub const fn priority(self) -> u32 {
        match self {
            Self::Page => 3,
            Self::Tool => 2,
            Self::Course | Self::Blog => 1,
            Self::Job => 0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Blog => "blog",
            Self::Job => "job",
            Self::Course => "course",
            Self::Tool => "tool",
        }
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of hits from the external index, with the service's own
/// aggregate metrics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    pub hits: Vec<SearchResult>,
    #[serde(rename = "totalHits")]
    pub total_hits: u64,
    #[serde(rename = "processingTimeMs")]
    pub processing_time_ms: u64,
}

/// Facet filters for the external index. When any field is set, the
/// faceted query operation takes precedence over the plain search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResultKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.category.is_none()
    }
}

/// Which strategy served the current result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchSource {
    ExternalIndex,
    #[default]
    LocalFallback,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case(ResultKind::Page, 3)]
    #[case(ResultKind::Tool, 2)]
    #[case(ResultKind::Course, 1)]
    #[case(ResultKind::Blog, 1)]
    #[case(ResultKind::Job, 0)]
    fn kind_priority_table(#[case] kind: ResultKind, #[case] priority: u32) {
        check!(kind.priority() == priority);
    }

    #[test]
    fn kind_round_trips_through_serde() {
        let json = serde_json::to_string(&ResultKind::Course).unwrap();
        check!(json == "\"course\"");
        let back: ResultKind = serde_json::from_str(&json).unwrap();
        check!(back == ResultKind::Course);
    }

    #[test]
    fn empty_filters_detected() {
        check!(SearchFilters::default().is_empty());
        let filters = SearchFilters {
            kind: Some(ResultKind::Job),
            category: None,
        };
        check!(!filters.is_empty());
    }
}
