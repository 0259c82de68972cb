use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

/// Initialize the logging system: console output on stderr, default level
/// from the CLI, `RUST_LOG` taking precedence.
pub fn init(level: &str) {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .unwrap_or_else(|_| tracing::Level::INFO.into()),
        )
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                // stderr for logs, stdout stays clean for CLI output
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();

    tracing::info!("Logging initialized at level: {}", level);
}
