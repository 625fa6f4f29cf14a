//! Structured logging.
//!
//! Uses the tracing crate; the level comes from `RUST_LOG` when set and
//! falls back to the configured default otherwise.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging subsystem. Call once at startup.
pub fn init(default_level: &str) {
    let fallback = format!("relay_proxy={default_level},tower_http={default_level}");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
