//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch by path)
//!     → request_id.rs (correlation ID as early as possible)
//!     → proxy::validate / proxy::forward (the actual round trip)
//!     → error.rs (failures rendered as structured JSON)
//!     → Send to client
//! ```

pub mod error;
pub mod request_id;
pub mod server;

pub use error::{ProxyError, ProxyResult};
pub use request_id::{MakeProxyRequestId, X_REQUEST_ID};
pub use server::HttpServer;
