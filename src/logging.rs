//! Diagnostic logging setup.

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LogVerbosity;

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` overrides `verbosity`. Calling this twice is harmless: the second
/// install is ignored.
pub fn init(verbosity: LogVerbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
