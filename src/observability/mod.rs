//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing, configured once at startup
//! - Request ID flows through all log events for one request
//! - Client input errors are never logged as system faults

pub mod logging;
