//! Diagnostic tracing for branch-retire.
//!
//! Diagnostics go to stderr and are filtered by `RUST_LOG`, falling back to a
//! level chosen by `-v` flags. Status lines are written to stdout by the
//! clean command and never pass through here.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// `verbosity` 0 → `warn`, 1 → `info`, 2+ → `debug`.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
