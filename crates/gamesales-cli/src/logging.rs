use tracing_subscriber::{EnvFilter, fmt::SubscriberBuilder};

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `default_filter`. Stdout stays free for
/// reports.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))
}
