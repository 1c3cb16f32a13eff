use tracing_subscriber::prelude::*;

/// Install the global tracing subscriber, log records are forwarded to it as well.
///
/// The verbosity is controlled with `RUST_LOG`, it defaults to `info`.
pub fn init() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(filter)
        .try_init()
}
