//! Unified site search engine.
//!
//! A debounced search orchestrator over an external full-text index with a
//! locally ranked fallback (static content catalog + relational content
//! store), suggestion derivation and click analytics. The UI layer consumes
//! [`SearchState`] snapshots and feeds keyboard events through
//! [`InputSurface`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod index;
pub mod input;
pub mod orchestrator;
pub mod ranking;
pub mod store;
pub mod suggest;
pub mod tracing;
pub mod types;

pub use catalog::StaticCatalog;
pub use config::{IndexConfig, SearchConfig};
pub use error::{IndexError, Result, StoreError};
pub use index::{HttpIndexClient, IndexClient};
pub use input::{ClickThrough, InputAction, InputEvent, InputSurface, SearchPhase};
pub use orchestrator::{SearchOrchestrator, SearchState};
pub use store::{ContentStore, SqliteStore};
pub use types::{ResultKind, SearchFilters, SearchPage, SearchResult, SearchSource};
