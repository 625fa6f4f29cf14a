//! Single-hop HTTP forwarding proxy library.
//!
//! Accepts `ANY /proxy?url=<target>`, re-issues an equivalent request to
//! the target, and relays the response back verbatim apart from a fixed
//! set of header overrides.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
