//! The forwarding engine: builds the outbound request, executes one
//! bounded round trip against the target, and relays the result.
//!
//! # Responsibilities
//! - Select plain vs encrypted transport from the target scheme
//! - Merge inbound headers with the fixed override set
//! - Execute connect + send + receive under a single timeout budget
//! - Buffer and relay the target's response verbatim
//! - Map local failures to the request-level error taxonomy

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Request, Response, Uri};
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::{connect::HttpConnector, Client};

use crate::config::{LimitsConfig, TimeoutConfig};
use crate::http::error::{ProxyError, ProxyResult};
use crate::proxy::validate::TargetDescriptor;

/// Fixed identity the target sees, overriding any inbound user-agent.
pub const PROXY_USER_AGENT: &str = concat!("relay-proxy/", env!("CARGO_PKG_VERSION"));

/// Encodings we are willing to relay opaquely. The response body is passed
/// through as raw bytes without decompression, so we never advertise more
/// than this.
pub const FORWARDED_ACCEPT_ENCODING: &str = "gzip, deflate";

/// Outbound HTTP client: plain transport for `http` targets, TLS for
/// `https`, selected per request by the connector.
pub type ForwardClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Build the outbound client.
pub fn build_client() -> ForwardClient {
    Client::builder(hyper_util::rt::TokioExecutor::new()).build(HttpsConnector::new())
}

/// Transport selected from the target scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetScheme {
    Http,
    Https,
}

impl TargetScheme {
    /// The validator only checks syntax, so a non-http(s) scheme can
    /// still arrive here; it is rejected as an invalid target.
    pub fn from_target(target: &TargetDescriptor) -> ProxyResult<Self> {
        match target.scheme() {
            "http" => Ok(TargetScheme::Http),
            "https" => Ok(TargetScheme::Https),
            _ => Err(ProxyError::InvalidTarget {
                target: target.raw().to_string(),
            }),
        }
    }
}

/// Headers that describe the inbound connection or its framing, not the
/// request itself. The body is fully buffered on both legs, so these must
/// not travel with it; content-length is recomputed by the client.
const CONNECTION_HEADERS: &[HeaderName] = &[
    header::CONNECTION,
    header::TRANSFER_ENCODING,
    header::CONTENT_LENGTH,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
];

/// Render an error with its full source chain. The client's top-level
/// error ("client error (Connect)") hides the part callers need, like
/// "Connection refused".
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn strip_connection_headers(headers: &mut HeaderMap) {
    for name in CONNECTION_HEADERS {
        headers.remove(name);
    }
    headers.remove("keep-alive");
    headers.remove("proxy-connection");
}

/// Ordered merge: base = full inbound header set, then the override set
/// {host, user-agent, accept-encoding} applied last.
fn build_outbound_headers(
    inbound: &HeaderMap,
    target: &TargetDescriptor,
) -> ProxyResult<HeaderMap> {
    let mut headers = inbound.clone();
    strip_connection_headers(&mut headers);

    let host = HeaderValue::from_str(&target.host_header()).map_err(|e| {
        ProxyError::InternalFault(format!("target host is not a valid header value: {e}"))
    })?;
    headers.insert(header::HOST, host);
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(PROXY_USER_AGENT),
    );
    headers.insert(
        header::ACCEPT_ENCODING,
        HeaderValue::from_static(FORWARDED_ACCEPT_ENCODING),
    );

    Ok(headers)
}

/// Execute the proxying round trip.
///
/// Method and body are copied verbatim from the inbound request; the URI
/// (path and query included) comes entirely from the target. The whole
/// round trip, response buffering included, shares one timeout budget.
/// On timeout the outbound attempt is abandoned and its result discarded.
pub async fn forward(
    client: &ForwardClient,
    timeouts: TimeoutConfig,
    limits: LimitsConfig,
    inbound: &axum::http::request::Parts,
    body: Bytes,
    target: &TargetDescriptor,
) -> ProxyResult<Response<Body>> {
    let scheme = TargetScheme::from_target(target)?;

    let uri: Uri = target.url().as_str().parse().map_err(|e| {
        ProxyError::InternalFault(format!("validated target did not convert to a URI: {e}"))
    })?;

    let headers = build_outbound_headers(&inbound.headers, target)?;

    let mut builder = Request::builder().method(inbound.method.clone()).uri(uri);
    if let Some(outbound_headers) = builder.headers_mut() {
        *outbound_headers = headers;
    }
    let outbound = builder
        .body(if body.is_empty() {
            Body::empty()
        } else {
            Body::from(body)
        })
        .map_err(|e| ProxyError::InternalFault(format!("failed to build outbound request: {e}")))?;

    tracing::debug!(
        method = %inbound.method,
        target = %target.url(),
        scheme = ?scheme,
        "Forwarding request"
    );

    let budget = Duration::from_secs(timeouts.forward_secs);
    let round_trip = async {
        let response = client
            .request(outbound)
            .await
            .map_err(|e| ProxyError::UnreachableTarget(describe(&e)))?;

        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(Body::new(body), limits.max_body_bytes)
            .await
            .map_err(|e| {
                ProxyError::UnreachableTarget(format!(
                    "error reading response body: {}",
                    describe(&e)
                ))
            })?;
        Ok::<_, ProxyError>((parts, bytes))
    };

    let (mut parts, bytes) = tokio::time::timeout(budget, round_trip)
        .await
        .map_err(|_| ProxyError::TargetTimeout(timeouts.forward_secs))??;

    tracing::debug!(
        status = %parts.status,
        bytes = bytes.len(),
        target = %target.url(),
        "Relaying response"
    );

    // Status, headers, and body relay verbatim; only the framing headers
    // of the (now fully buffered) upstream connection are dropped.
    strip_connection_headers(&mut parts.headers);
    Ok(Response::from_parts(parts, Body::from(bytes)))
}
