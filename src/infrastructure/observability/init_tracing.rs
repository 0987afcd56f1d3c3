use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use super::TracingConfig;

/// Initialize the tracing subscriber with structured logging. `RUST_LOG`
/// takes precedence over the configured level.
pub fn init_tracing(config: &TracingConfig, port: u16) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if config.json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing already initialized: {e}");
    }

    tracing::info!(
        port = port,
        environment = %config.environment,
        json_format = config.json_format,
        "Server initialized"
    );
}
