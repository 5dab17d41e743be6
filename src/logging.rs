use tracing_subscriber::EnvFilter;

use crate::error::CourierError;

/// Build the filter for `level`, or `debug` when `verbose` is set.
pub fn env_filter(level: &str, verbose: bool) -> Result<EnvFilter, CourierError> {
    let directive = if verbose { "debug" } else { level };
    EnvFilter::try_new(directive)
        .map_err(|err| CourierError::Config(format!("invalid log level {directive:?}: {err}")))
}

/// Install the global subscriber. Logs go to stderr so stdout stays
/// reserved for notices and reports.
pub fn init_logging(level: &str, verbose: bool) -> Result<(), CourierError> {
    let filter = env_filter(level, verbose)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}
