use tracing_subscriber::layer::SubscriberExt as _;
pub use tracing_subscriber::util::TryInitError;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, Layer as _};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Filter from `RUST_LOG`, falling back to `default_filter`.
#[must_use]
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Installs the global subscriber. Logs go to stderr so that command output
/// on stdout stays clean.
pub fn setup_telemetry(default_filter: &str) -> Result<(), TryInitError> {
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(env_filter(default_filter)))
        .try_init()
}
