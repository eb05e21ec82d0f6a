//! Tracing initialisation for embedding shells

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Initialise tracing from the logging configuration.
///
/// `RUST_LOG` takes precedence when set. Safe to call more than once; later
/// calls are no-ops.
pub fn init(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("elidune_client={}", config.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        let _ = registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init();
    } else {
        let _ = registry.with(tracing_subscriber::fmt::layer()).try_init();
    }
}
