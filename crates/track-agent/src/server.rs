//! HTTP surface for the dashboard
//!
//! Serves the metrics snapshot as JSON, a health probe, and the dashboard
//! page. Every API request triggers one fresh aggregation; nothing is
//! cached between requests.

use crate::page;
use crate::{AgentError, Result};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use track_collect::{Aggregator, ShellRunner};
use track_core::TrackerConfig;
use tracing::{info, warn};

/// Header carrying the shared-secret API key
const API_KEY_HEADER: &str = "x-api-key";

/// Shared request-handling state.
///
/// The aggregator is stateless, so sharing it across concurrent requests
/// shares no mutable data.
struct AppState {
    aggregator: Aggregator,
    api_key: Option<String>,
    poll_interval_seconds: u64,
}

/// HTTP server for the dashboard and the metrics API
pub struct DashboardServer {
    state: Arc<AppState>,
    bind_addr: SocketAddr,
    local_addr: Option<SocketAddr>,
    server_handle: Option<Arc<tokio::task::JoinHandle<()>>>,
}

impl DashboardServer {
    /// Create a new dashboard server from a validated configuration
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        let state = Arc::new(AppState {
            aggregator: Aggregator::new(Arc::new(ShellRunner::new())),
            api_key: config.security.api_key.clone(),
            poll_interval_seconds: config.monitoring.poll_interval_seconds,
        });

        Ok(Self {
            state,
            bind_addr: config.bind_addr()?,
            local_addr: None,
            server_handle: None,
        })
    }

    /// Start the HTTP server
    pub async fn start(&mut self) -> Result<()> {
        if self.server_handle.is_some() {
            return Err(AgentError::Server("Server already started".to_string()));
        }

        let app = create_app(self.state.clone());
        let listener = TcpListener::bind(self.bind_addr).await?;
        let local_addr = listener.local_addr()?;
        self.local_addr = Some(local_addr);

        info!("Starting dashboard server on {}", local_addr);

        let server_handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                warn!("Dashboard server error: {}", e);
            }
        });

        self.server_handle = Some(Arc::new(server_handle));
        Ok(())
    }

    /// Stop the HTTP server
    pub async fn stop(&mut self) {
        self.local_addr = None;
        if let Some(handle) = self.server_handle.take() {
            if let Ok(handle) = Arc::try_unwrap(handle) {
                handle.abort();
                let _ = handle.await;
            }
        }
    }

    /// Check if the server is running
    pub fn is_running(&self) -> bool {
        self.server_handle.is_some()
    }

    /// Address the server is actually bound to, once started
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Get the metrics API URL
    pub fn metrics_url(&self) -> String {
        format!("http://{}/api/metrics", self.local_addr.unwrap_or(self.bind_addr))
    }
}

impl Drop for DashboardServer {
    fn drop(&mut self) {
        if let Some(handle) = self.server_handle.take() {
            if let Ok(handle) = Arc::try_unwrap(handle) {
                handle.abort();
            }
        }
    }
}

/// Create the Axum application
fn create_app(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/metrics", get(metrics_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .merge(api)
        .layer(permissive_cors())
        .with_state(state)
}

/// Permissive CORS so external dashboards can poll the API.
///
/// The deployed origin policy is environment-specific; nothing in the
/// metrics contract depends on it.
fn permissive_cors() -> tower_http::cors::CorsLayer {
    use tower_http::cors::{Any, CorsLayer};
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Middleware enforcing the shared-secret API key when one is configured
async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = &state.api_key else {
        // No key configured: open access.
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if provided == Some(expected.as_str()) {
        next.run(request).await
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid or missing API Key" })),
        )
            .into_response()
    }
}

/// Handler for the metrics snapshot API.
///
/// Always answers 200 with a best-effort snapshot; source failures were
/// already degraded to empty collections inside the collectors.
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state.aggregator.collect_all().await;
    Json(snapshot).into_response()
}

/// Handler for the health probe
async fn health_handler() -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
        .into_response()
}

/// Handler for the dashboard page
async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(page::render(state.poll_interval_seconds))
}
