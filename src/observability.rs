//! Shared tracing configuration for installer instrumentation.
//!
//! Centralises the log target used by the crate so subscribers can filter
//! installer events without pulling in unrelated application logs.

use tracing_subscriber::EnvFilter;

/// Target used by installer spans and logs.
pub(crate) const LOG_TARGET: &str = "loopback_oracle::installer";

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "LOOPBACK_ORACLE_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr `fmt` subscriber filtered by [`LOG_FILTER_ENV`].
///
/// Standard output is left untouched so the platform installer's own output
/// reaches the user unmodified. Installing twice is harmless: the second
/// registration is ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
    if let Err(err) = installed {
        tracing::debug!(target: LOG_TARGET, "tracing subscriber already installed: {err}");
    }
}
