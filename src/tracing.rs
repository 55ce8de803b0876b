//! Tracing initialization.
//!
//! The orchestrator logs its fallback decisions and swallowed transport
//! errors through `tracing`; embedding applications usually install their
//! own subscriber, so this helper is opt-in.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a compact stderr subscriber honoring `RUST_LOG`, defaulting to
/// `unisearch=info`. Safe to call multiple times.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("unisearch=info"));

        if let Err(e) = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .compact()
            .try_init()
        {
            eprintln!("failed to initialize tracing: {e}");
        }
    });
}
