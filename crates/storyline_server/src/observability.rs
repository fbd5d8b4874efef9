//! Tracing subscriber setup.

use crate::LogFormat;
use storyline_error::{ServerError, ServerErrorKind};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Fails if a
/// subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| ServerError::new(ServerErrorKind::Observability(e.to_string())))?;
    tracing::debug!(%format, "Tracing initialized");
    Ok(())
}
