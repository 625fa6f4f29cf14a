//! Request-level error taxonomy and the JSON shapes it renders to.
//!
//! Every failure is recovered at the request boundary: an error here
//! becomes a JSON response for the caller and never affects any other
//! in-flight request or the server process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors that can occur while validating or forwarding a request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The `url` query parameter was absent or empty.
    #[error("missing url parameter")]
    MissingTarget,

    /// The supplied target is not an absolute http(s) URL.
    #[error("invalid target url: {target}")]
    InvalidTarget { target: String },

    /// The inbound body exceeded the relay's buffering cap.
    #[error("request body exceeds the {0}-byte limit")]
    PayloadTooLarge(usize),

    /// The target could not be reached (DNS, connect, transport).
    #[error("failed to reach target: {0}")]
    UnreachableTarget(String),

    /// The target did not complete the round trip within the budget.
    #[error("target did not respond within {0} seconds")]
    TargetTimeout(u64),

    /// Unexpected fault while constructing or relaying the request.
    #[error("internal fault: {0}")]
    InternalFault(String),
}

/// Result type for validation and forwarding operations.
pub type ProxyResult<T> = Result<T, ProxyError>;

impl ProxyError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingTarget | ProxyError::InvalidTarget { .. } => {
                StatusCode::BAD_REQUEST
            }
            ProxyError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::UnreachableTarget(_) | ProxyError::TargetTimeout(_) => {
                StatusCode::BAD_GATEWAY
            }
            ProxyError::InternalFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            ProxyError::MissingTarget => json!({
                "error": "Missing URL parameter",
                "usage": "/proxy?url=<percent-encoded absolute URL>",
                "example": "/proxy?url=https%3A%2F%2Fexample.com%2Fapi%2Fdata",
            }),
            ProxyError::InvalidTarget { target } => json!({
                "error": "Invalid URL format",
                "target": target,
            }),
            ProxyError::PayloadTooLarge(limit) => json!({
                "error": "Request body too large",
                "limit": limit,
            }),
            ProxyError::UnreachableTarget(detail) => json!({
                "error": "Failed to reach external URL",
                "message": detail,
            }),
            ProxyError::TargetTimeout(secs) => json!({
                "error": "Failed to reach external URL",
                "message": format!("target did not respond within {secs} seconds"),
            }),
            ProxyError::InternalFault(detail) => json!({
                "error": "Internal server error",
                "message": detail,
            }),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        // Client input errors are not system faults; keep them quiet.
        match &self {
            ProxyError::MissingTarget
            | ProxyError::InvalidTarget { .. }
            | ProxyError::PayloadTooLarge(_) => {
                tracing::debug!(error = %self, "Rejecting request");
            }
            ProxyError::UnreachableTarget(_) | ProxyError::TargetTimeout(_) => {
                tracing::warn!(error = %self, "Forwarding failed");
            }
            ProxyError::InternalFault(_) => {
                tracing::error!(error = %self, "Internal fault while proxying");
            }
        }

        (self.status(), Json(self.body())).into_response()
    }
}
