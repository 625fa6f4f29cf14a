//! Core proxying subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → validate.rs (extract + parse target URL, fail fast)
//!     → forward.rs (build outbound request, bounded round trip)
//!     → response relayed to caller (or mapped error)
//! ```
//!
//! # Design Decisions
//! - Validation is pure and happens before any network activity
//! - One outbound attempt per request; outcomes are final, never retried
//! - Bodies are fully buffered on both legs (capped by config)

pub mod forward;
pub mod validate;

pub use forward::{build_client, forward, ForwardClient, PROXY_USER_AGENT};
pub use validate::{validate_target, TargetDescriptor};
