//! Error handling types and utilities.

/// A specialized Result type for unisearch operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()`
/// and `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned by the external index adapter.
///
/// The orchestrator never surfaces these to the UI; it logs them and falls
/// back to the local path. They exist so callers of the adapter itself can
/// distinguish transport trouble from a misbehaving service.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("index transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("index service returned HTTP {status}")]
    Service { status: u16 },
    #[error("index response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("index client is not configured: {0}")]
    Config(String),
}

/// Error returned by the relational content store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("content store query failed: {0}")]
    Query(#[from] rusqlite::Error),
}
