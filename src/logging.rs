use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var holding the log filter for this crate's diagnostics.
pub const LOG_ENV: &str = "MODELKIT_LOG";

/// Initialize tracing to stderr.
///
/// The filter comes from `MODELKIT_LOG`, then `RUST_LOG`, then defaults to
/// `warn` so configuration warnings (duplicate action types, malformed
/// options) stay visible.
///
/// Safe to call more than once; later calls are ignored when a global
/// subscriber is already installed.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
