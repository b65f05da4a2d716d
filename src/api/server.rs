//! API Server Module
//! 
//! This module implements the HTTP binding of the transaction inquiry.
//! Every inquiry response carries exactly one coded `Result` entry:
//! - validation failures (E1-E7, and E9 for a malformed envelope) are `400`
//! - resolved outcomes (R1-R4) are `200`, the inquiry itself succeeded
//! - an unreachable store (E8) is `503`, any other fault (E9) is `500`
//! - a body over `BODY_LIMIT_BYTES` is E9 with `413`

use crate::{
    config::ApiConfig,
    resolver::Resolver,
    store::TransactionLog,
    validation::Validator,
    InquiryRequest,
    InquiryResponse,
    ResultCode,
};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, warn, Level};

/// Path of the single inquiry operation
pub const INQUIRY_PATH: &str = "/api/inquired";

/// Largest accepted request body
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Headers added to every response unless a handler already set them
const SECURITY_HEADERS: [(HeaderName, &str); 7] = [
    (header::CONTENT_SECURITY_POLICY, "default-src 'self';base-uri 'self';frame-ancestors 'self';object-src 'none'"),
    (header::STRICT_TRANSPORT_SECURITY, "max-age=15552000; includeSubDomains"),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_DNS_PREFETCH_CONTROL, "off"),
    (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
    (header::X_XSS_PROTECTION, "0"),
    (header::REFERRER_POLICY, "no-referrer"),
];

const SERVICE_NAME: &str = "Bank Inquired API";

/// Shared application state that is accessible across all request handlers
/// 
/// Both members are stateless between requests:
/// - `validator`: Checks inbound fields
/// - `resolver`: Looks the transaction up through the injected store handle
#[derive(Clone)]
pub struct AppState {
    validator: Validator,
    resolver: Resolver,
}

impl AppState {
    pub fn new(store: Arc<dyn TransactionLog>) -> Self {
        Self {
            validator: Validator::new(),
            resolver: Resolver::new(store),
        }
    }
}

/// The main API server struct
/// 
/// Encapsulates the listen configuration and application state.
pub struct Server {
    config: ApiConfig,
    state: AppState,
}

impl Server {
    /// Creates a new API server instance
    /// 
    /// # Arguments
    /// * `config` - Listen address settings
    /// * `store` - Transaction log every inquiry is resolved against
    pub fn new(config: ApiConfig, store: Arc<dyn TransactionLog>) -> Self {
        Self {
            config,
            state: AppState::new(store),
        }
    }

    /// Starts the API server and serves until `shutdown` completes
    /// 
    /// In-flight requests are allowed to finish before this returns.
    pub async fn start<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = router(self.state);

        let addr = format!("{}:{}", self.config.host, self.config.port);
        info!("API server listening on {}", addr);
        info!("Inquiry endpoint: http://{}{}", addr, INQUIRY_PATH);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

/// Build the router with all routes bound to `state`
/// 
/// Unknown paths, and known paths hit with the wrong method, get the JSON 404.
pub fn router(state: AppState) -> Router {
    let [csp, hsts, nosniff, dns_prefetch, frame, xss, referrer] = SECURITY_HEADERS.map(
        |(name, value)| SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value)),
    );
    let security_headers = ServiceBuilder::new()
        .layer(csp)
        .layer(hsts)
        .layer(nosniff)
        .layer(dns_prefetch)
        .layer(frame)
        .layer(xss)
        .layer(referrer);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route(INQUIRY_PATH, post(handle_inquiry).fallback(handle_not_found))
        .route("/health", get(handle_health).fallback(handle_not_found))
        .fallback(handle_not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(security_headers)
        .layer(cors)
        .layer(trace)
        .with_state(state)
}

/// Resolves once Ctrl-C or SIGTERM is received
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received, shutting down gracefully"),
        _ = terminate => info!("SIGTERM received, shutting down gracefully"),
    }
}

/// Inquiry handler
/// 
/// The body is taken raw so that a malformed or oversized envelope is answered
/// with the coded E9 result rather than the framework's own rejection.
async fn handle_inquiry(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<InquiryResponse>) {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!("Unreadable inquiry body: {}", rejection.body_text());
            return respond(rejection.status(), ResultCode::SystemError.into());
        }
    };
    info!("Received inquiry request ({} bytes)", body.len());
    debug!("Inquiry body: {}", String::from_utf8_lossy(&body));

    // Step 1: Parse the envelope
    let request: InquiryRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Malformed inquiry envelope: {}", e);
            return respond(StatusCode::BAD_REQUEST, ResultCode::SystemError.into());
        }
    };

    // Step 2: Validate; the first failing field ends the request
    let lookup = match state.validator.validate(&request) {
        Ok(lookup) => lookup,
        Err(code) => {
            warn!("Validation failed: {}", code);
            return respond(StatusCode::BAD_REQUEST, code.into());
        }
    };

    // Step 3: Resolve against the transaction log
    let outcome = state.resolver.resolve(&lookup).await;
    respond(outcome_status(outcome.code), outcome.into())
}

fn respond(status: StatusCode, response: InquiryResponse) -> (StatusCode, Json<InquiryResponse>) {
    info!("Sending response {}: {:?}", status.as_u16(), response.result);
    (status, Json(response))
}

/// HTTP status for a resolver outcome
fn outcome_status(code: ResultCode) -> StatusCode {
    if code.is_inquiry_success() {
        StatusCode::OK
    } else if code == ResultCode::DestinationUnreachable {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

async fn handle_health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    warn!("No route for {}", uri);
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "message": format!("The requested endpoint {} does not exist", uri),
        })),
    )
}
