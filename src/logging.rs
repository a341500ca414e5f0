use crate::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Builds the log filter from a level (`info`) or a directive list
/// (`whisper_relay=debug,tower_http=info`).
pub fn env_filter(spec: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(spec).map_err(|e| {
        Error::config(format!(
            "Invalid log filter '{}': {}. Use a level (error, warn, info, debug, trace) or target=level directives",
            spec, e
        ))
    })
}
