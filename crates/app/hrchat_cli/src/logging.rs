use tracing_subscriber::EnvFilter;

use crate::Error;

/// Used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn,hrchat_core=info";

/// Logs go to stderr; stdout carries command output only.
///
/// A `RUST_LOG` that does not parse is an error rather than silently
/// replaced by the default.
pub fn init() -> Result<(), Error> {
    let filter = match std::env::var_os(EnvFilter::DEFAULT_ENV) {
        Some(_) => EnvFilter::try_from_default_env()
            .map_err(|e| Error::Custom(format!("invalid log filter in RUST_LOG: {e}")))?,
        None => EnvFilter::try_new(DEFAULT_FILTER)
            .map_err(|e| Error::Custom(format!("invalid log filter: {e}")))?,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Custom(format!("logging init failed: {e}")))?;

    Ok(())
}
