use tracing_subscriber::EnvFilter;

/// Initialize structured logging. `RUST_LOG` wins over the configured
/// level when set.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
