use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "FINCALC_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Resolve the log filter: explicit flag, then FINCALC_LOG, then RUST_LOG,
/// then warnings only.
fn make_filter(level: Option<&str>) -> Result<EnvFilter, Box<dyn std::error::Error>> {
    if let Some(level) = level {
        return EnvFilter::try_new(level)
            .map_err(|e| format!("invalid log level '{level}': {e}").into());
    }
    Ok(EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
}

/// Install the global subscriber. Logs go to stderr so they never mix with
/// command output on stdout; colour only when stderr is a terminal.
pub fn init_logging(level: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let filter = make_filter(level)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .try_init();
    // try_init only fails when a global subscriber exists; events still reach it.
    if let Err(e) = installed {
        tracing::debug!(error = %e, "keeping the existing subscriber");
    }
    Ok(())
}
