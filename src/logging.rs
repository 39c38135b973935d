//! Logging setup
//!
//! Diagnostics (claim tracing, timings) go through tracing; the per-test
//! report lines do not, since their format is part of the harness contract.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for the harness binary.
///
/// `debug` raises the default level to DEBUG; an explicit `RUST_LOG` still
/// takes precedence.
pub fn init(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("micro_harness={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
