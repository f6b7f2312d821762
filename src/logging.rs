//! Tracing/logging initialization
//!
//! Logs go to stderr so they never mix with command output. `RUST_LOG`
//! takes precedence over the verbosity flag.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "ledgerdesk=info,warn",
        _ => "ledgerdesk=debug,info",
    }
}

/// Initialize tracing for the process
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .try_init();
}
