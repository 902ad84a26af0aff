//! Tracing subscriber setup.
//!
//! Console-only structured logging; filter via `RUST_LOG`
//! (default `info`).
//!
//! # Usage
//!
//! ```rust,ignore
//! sizing_engine::telemetry::init();
//! tracing::info!("engine ready");
//! ```

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Safe to call more than once; later calls are no-ops, which keeps test
/// binaries that each call it from panicking.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init();
}
