//! Logging setup for the command-line binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the application. The binary writes human-readable lines to stderr so
//! they never mix with report output on stdout.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for the given `-v` count and `-q` flag.
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr subscriber.
///
/// `RUST_LOG`, when set, overrides the flag-derived level. Calling this twice
/// keeps the first subscriber.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet)));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level = level_for(verbose, quiet), "logging initialized");
    }
}
