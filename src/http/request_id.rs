//! Request ID generation.
//!
//! Every inbound request gets an `x-request-id` (UUID v4) as early as
//! possible so log lines for one request can be correlated; the ID is
//! propagated onto the response.

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// UUID v4 request ID source for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeProxyRequestId;

impl MakeRequestId for MakeProxyRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}
