//! Logging setup for services embedding the engine

use tracing_subscriber::EnvFilter;

/// Initialize tracing with an env-filter (`RUST_LOG`), defaulting to `info`
///
/// Call once at process startup; subsequent calls are ignored so tests can
/// invoke it freely.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .try_init();
}
