//! Logging initialisation via tracing-subscriber.

use tracing_subscriber::EnvFilter;

use crate::domain::error::KeyconfError;

/// Installs the global subscriber on stderr.
///
/// `RUST_LOG` takes precedence; `level` is the fallback filter. Calling this
/// twice is an error, which callers may ignore.
pub fn init(level: &str) -> Result<(), KeyconfError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(level, env.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| KeyconfError::Logger(format!("failed to set subscriber: {e}")))
}

/// Picks the `RUST_LOG` directives when they are set and parse, otherwise
/// `level`.
pub fn build_filter(level: &str, env: Option<&str>) -> Result<EnvFilter, KeyconfError> {
    env.filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .map_or_else(|| EnvFilter::try_new(level), Ok)
        .map_err(|e| KeyconfError::Logger(format!("invalid log level '{level}': {e}")))
}
