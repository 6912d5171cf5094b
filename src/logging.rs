//! Diagnostics output
//!
//! Everything logged goes to stderr so it never mixes with text written to stdout.

use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `CTXPICK_LOG=debug`
pub const LOG_ENV: &str = "CTXPICK_LOG";

pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}
