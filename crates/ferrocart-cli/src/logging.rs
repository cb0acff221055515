//! Tracing subscriber setup for the binary.

use std::io;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "FERROCART_LOG";

pub const DEFAULT_FILTER: &str = "ferrocart=info";

static INIT_ONCE: Once = Once::new();

/// Installs a stderr `fmt` subscriber once; stdout stays reserved for results.
pub fn init() {
    INIT_ONCE.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init();
    });
}
