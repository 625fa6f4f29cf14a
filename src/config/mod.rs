//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (HOST, PORT)
//!     → loader.rs (read & parse, fall back to defaults)
//!     → ProxyConfig (immutable for the process lifetime)
//!     → shared via AppState with the request handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload mechanism
//! - All fields have defaults so the proxy runs unconfigured
//! - Only the listener address is environment-tunable

pub mod loader;
pub mod schema;

pub use schema::{LimitsConfig, ListenerConfig, ProxyConfig, TimeoutConfig};
