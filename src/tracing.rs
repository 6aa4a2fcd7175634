use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

/// Filter used when `RUST_LOG` is not set; sqlx statement logs stay at `warn`.
pub const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Sets up the global fmt subscriber for the `api_server` and `catalog` binaries.
///
/// `RUST_LOG` wins over `default_filter` when present. Events go to stderr;
/// stdout carries the `catalog` report lines.
pub fn init_tracing(default_filter: &str) -> Result<(), anyhow::Error> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}
