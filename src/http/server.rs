//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, body limits)
//! - Dispatch `/proxy` requests through validator and forwarding engine
//! - Serve the static health document
//! - Bind the server to a listener and drain on shutdown

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{LimitsConfig, ProxyConfig, TimeoutConfig};
use crate::http::error::ProxyError;
use crate::http::request_id::{MakeProxyRequestId, X_REQUEST_ID};
use crate::proxy::{build_client, forward, validate_target, ForwardClient};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: ForwardClient,
    pub timeouts: TimeoutConfig,
    pub limits: LimitsConfig,
}

/// HTTP server for the forwarding proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let state = AppState {
            client: build_client(),
            timeouts: config.timeouts,
            limits: config.limits,
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        // Permissive CORS: any origin may call the proxy, and preflight
        // OPTIONS requests are answered directly by this layer.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/proxy", any(proxy_handler))
            .route("/health", get(health_handler))
            .route("/", get(health_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeProxyRequestId))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TraceLayer::new_for_http())
                    .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
                    .layer(cors),
            )
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler: validate the target, then forward.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let (parts, body) = request.into_parts();
    let raw_target = extract_url_param(parts.uri.query());

    let target = match validate_target(raw_target.as_deref()) {
        Ok(target) => target,
        Err(err) => return err.into_response(),
    };

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        target = %target.url(),
        "Proxying request"
    );

    let body = match axum::body::to_bytes(body, state.limits.max_body_bytes).await {
        Ok(bytes) => bytes,
        // A chunked body with no content-length slips past the limit
        // layer and only overruns the cap here.
        Err(err) if is_length_limit(&err) => {
            return ProxyError::PayloadTooLarge(state.limits.max_body_bytes).into_response()
        }
        Err(err) => {
            return ProxyError::InternalFault(format!("error reading request body: {err}"))
                .into_response()
        }
    };

    match forward(
        &state.client,
        state.timeouts,
        state.limits,
        &parts,
        body,
        &target,
    )
    .await
    {
        Ok(response) => response.into_response(),
        Err(err) => err.into_response(),
    }
}

/// Whether a body-read error was the buffering cap being hit, as opposed
/// to a transport fault.
fn is_length_limit(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = Some(err);
    while let Some(cause) = source {
        if cause
            .downcast_ref::<http_body_util::LengthLimitError>()
            .is_some()
        {
            return true;
        }
        source = cause.source();
    }
    false
}

/// Pull the (percent-decoded) `url` parameter out of the query string.
fn extract_url_param(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
}

/// Static status document for `/health` and `/`.
async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
