//! Diagnostic logging setup.
//!
//! Command results go to stdout; `tracing` diagnostics go to stderr and are filtered by
//! `RUST_LOG` unless a `-v` flag raises the level.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber for the given `-v` count.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
