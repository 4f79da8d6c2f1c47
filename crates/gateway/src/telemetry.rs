//! Tracing initialization for embedders and integration tests.

use tracing_subscriber::EnvFilter;

/// Install a compact, env-filtered subscriber.
///
/// Safe to call multiple times; later calls are no-ops. Filtering follows
/// `RUST_LOG`, defaulting to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init();
}
