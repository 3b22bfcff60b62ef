use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Diagnostics go to stderr so the report on stdout stays clean.
/// `CMDLOG_LOG` takes an env-filter directive and overrides `--debug`.
pub(crate) fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CMDLOG_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
