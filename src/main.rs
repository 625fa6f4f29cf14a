//! Single-hop HTTP forwarding proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────┐
//!                    │               RELAY PROXY                  │
//!                    │                                            │
//!   Client Request   │  ┌────────┐   ┌───────────┐   ┌─────────┐ │
//!   ─────────────────┼─▶│  http  │──▶│ validate  │──▶│ forward │─┼──▶ Target
//!                    │  │ server │   │  target   │   │ engine  │ │    (http/https)
//!   Client Response  │  └────────┘   └───────────┘   └────┬────┘ │
//!   ◀────────────────┼────────────────────────────────────┘      │
//!                    │                                            │
//!                    │  ┌──────────────────────────────────────┐  │
//!                    │  │         Cross-Cutting Concerns        │  │
//!                    │  │  config · observability · lifecycle   │  │
//!                    │  └──────────────────────────────────────┘  │
//!                    └───────────────────────────────────────────┘
//! ```
//!
//! Each inbound request is handled independently; the only suspension
//! point is the outbound round trip, bounded by a fixed timeout budget.

use tokio::net::TcpListener;

use relay_proxy::config;
use relay_proxy::http::HttpServer;
use relay_proxy::lifecycle::{signals, Shutdown};
use relay_proxy::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");

    let config = config::loader::from_env();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.bind_address(),
        forward_timeout_secs = config.timeouts.forward_secs,
        max_body_bytes = config.limits.max_body_bytes,
        "relay-proxy starting"
    );

    let listener = TcpListener::bind(config.bind_address()).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::watch(shutdown));

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
