//! Orchestrator configuration.
//!
//! Explicit construction input rather than ambient state: the engine-choice
//! toggle, debounce interval and caps all live here so the orchestrator is
//! testable without any environment.

use anyhow::Context;
use serde::Deserialize;

use crate::error::Result;

/// Configuration for the search orchestrator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Whether to try the external full-text index before falling back.
    pub use_external_index: bool,
    /// Quiet period from the trailing edge of the last keystroke.
    pub debounce_ms: u64,
    /// Fallback path truncates to this many results.
    pub max_results: usize,
    /// Page size requested from the external index.
    pub hits_per_page: usize,
    /// Row cap for each relational source query.
    pub per_source_limit: usize,
    /// Suggestion list cap.
    pub max_suggestions: usize,
    /// External index connection details; required when
    /// `use_external_index` is set and an HTTP client is constructed.
    pub index: Option<IndexConfig>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            use_external_index: false,
            debounce_ms: 300,
            max_results: 10,
            hits_per_page: 10,
            per_source_limit: 5,
            max_suggestions: 5,
            index: None,
        }
    }
}

impl SearchConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid search configuration")
    }
}

/// Connection details for the managed full-text index service.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    pub endpoint: String,
    pub application_id: String,
    pub api_key: String,
    pub index_name: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn defaults_match_engine_constants() {
        let config = SearchConfig::default();
        check!(!config.use_external_index);
        check!(config.debounce_ms == 300);
        check!(config.max_results == 10);
        check!(config.per_source_limit == 5);
        check!(config.max_suggestions == 5);
        check!(config.index.is_none());
    }

    #[test]
    fn parses_index_block() {
        let config = SearchConfig::from_toml(
            r#"
            use_external_index = true
            debounce_ms = 150

            [index]
            endpoint = "https://search.example.com"
            application_id = "APP123"
            api_key = "secret"
            index_name = "site_content"
            "#,
        )
        .unwrap();

        check!(config.use_external_index);
        check!(config.debounce_ms == 150);
        let index = config.index.unwrap();
        check!(index.index_name == "site_content");
        check!(index.timeout_secs == 5);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = SearchConfig::from_toml("use_remote_index = true");
        check!(parsed.is_err());
    }
}
