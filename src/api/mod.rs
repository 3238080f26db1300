//! HTTP server: chat page, session issuance, WebSocket channel, and health.

mod session;
mod socket;

pub use session::SessionKeys;

use crate::gateway::Gateway;
use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use nursebot_core::config::ServerConfig;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Chat page, embedded at compile time.
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Shared state for API handlers.
#[derive(Clone)]
pub struct AppState {
    pub(crate) gateway: Arc<Gateway>,
    pub(crate) sessions: SessionKeys,
    uptime: Instant,
}

impl AppState {
    pub fn new(gateway: Arc<Gateway>, sessions: SessionKeys) -> Self {
        Self {
            gateway,
            sessions,
            uptime: Instant::now(),
        }
    }
}

/// `GET /`: serve the chat page, issuing a session cookie on first visit.
async fn index(headers: HeaderMap, State(state): State<AppState>) -> Response {
    if state.sessions.user_from_headers(&headers).is_some() {
        return Html(INDEX_HTML).into_response();
    }

    let user_id = SessionKeys::new_user_id();
    debug!("session: issued {user_id}");
    (
        [(SET_COOKIE, state.sessions.set_cookie(&user_id))],
        Html(INDEX_HTML),
    )
        .into_response()
}

/// `GET /health`: liveness with uptime and provider name.
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "uptime_secs": state.uptime.elapsed().as_secs(),
        "provider": state.gateway.provider_name(),
    }))
}

/// Build the axum router with shared state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/socket", get(socket::upgrade))
        .layer(axum::extract::DefaultBodyLimit::max(64 * 1024))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;

    info!("NurseBot listening on http://{addr}");

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
