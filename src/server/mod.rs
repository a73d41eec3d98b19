//! HTTP surface: routing, middleware, and server lifecycle.

pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::{
    config::Config, convert::Converter, limiter::SlidingWindowLimiter, metrics,
    timezone::TimezoneProvider,
};

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub converter: Arc<Converter>,
    pub limiter: Arc<SlidingWindowLimiter>,
    pub provider: Arc<dyn TimezoneProvider>,
    pub default_timezone: String,
}

/// Build the application router.
///
/// The index page and the conversion endpoint sit behind the rate limiter;
/// the timezone listing, static assets, and the health probe do not.
pub fn router(state: AppState) -> Router {
    let rate_limited = Router::new()
        .route("/", get(handlers::index))
        .route("/convert", post(handlers::convert))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .merge(rate_limited)
        .route("/timezones", get(handlers::timezones))
        .route("/static/main.js", get(handlers::main_js))
        .route("/health", get(handlers::health))
        .layer(middleware::from_fn(security_headers))
        .with_state(state)
}

pub struct HttpServer {
    config: Config,
    shutdown_tx: Arc<parking_lot::Mutex<Option<oneshot::Sender<()>>>>,
}

impl HttpServer {
    pub fn new(config: Config) -> Self {
        Self { config, shutdown_tx: Arc::new(parking_lot::Mutex::new(None)) }
    }

    /// Serve until shutdown is requested or the process receives ctrl-c.
    pub async fn run(&self, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(state);

        let addr: SocketAddr =
            format!("{}:{}", self.config.server.host, self.config.server.port).parse()?;
        info!("Starting HTTP server on {}", addr);

        let (tx, rx) = oneshot::channel();
        *self.shutdown_tx.lock() = Some(tx);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(shutdown_signal(rx))
            .await?;

        Ok(())
    }

    /// Request a graceful shutdown.
    pub fn shutdown(&self) {
        if let Some(tx) = self.shutdown_tx.lock().take() {
            if tx.send(()).is_err() {
                warn!("HTTP server already stopped");
            }
        }
    }
}

async fn shutdown_signal(rx: oneshot::Receiver<()>) {
    tokio::select! {
        _ = rx => info!("HTTP server received shutdown signal"),
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!("Failed to listen for ctrl-c: {}", e);
            }
            info!("Received ctrl-c, shutting down");
        },
    }
}

/// Admission gate in front of the handlers; rejection never reaches the
/// dispatcher.
async fn rate_limit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let client = addr.ip().to_string();
    if !state.limiter.is_allowed(&client) {
        warn!(client = %client, "request rejected by rate limiter");
        metrics::client().incr("rate_limit.rejected");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(handlers::ErrorBody::new("Too many requests. Please try again later.")),
        )
            .into_response();
    }
    next.run(request).await
}

async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert("X-XSS-Protection", HeaderValue::from_static("1; mode=block"));
    headers.insert("Content-Security-Policy", HeaderValue::from_static("default-src 'self'"));
    response
}
