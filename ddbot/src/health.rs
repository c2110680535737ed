//! HTTP health endpoints for process supervisors.
//!
//! - `GET /api/v1/health/liveness`: 200 while the process serves requests.
//! - `GET /api/v1/health/readiness`: 200 once the bot username has been resolved, 503 before.
//!
//! The listener is bound during startup so a busy port fails the start, and served as part of the
//! main operation until [`HealthServer::shutdown`] is called.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, Notify};
use tracing::{info, instrument};

use crate::handlers::BotUsername;

#[derive(Clone)]
struct HealthState {
    bot_username: BotUsername,
}

async fn liveness() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness(State(state): State<HealthState>) -> (StatusCode, Json<Value>) {
    match state.bot_username.read().await.as_deref() {
        Some(username) => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "bot_username": username })),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not_ready" })),
        ),
    }
}

/// Router with the liveness and readiness routes.
pub fn router(bot_username: BotUsername) -> Router {
    Router::new()
        .route("/api/v1/health/liveness", get(liveness))
        .route("/api/v1/health/readiness", get(readiness))
        .with_state(HealthState { bot_username })
}

pub struct HealthServer {
    addr: String,
    bot_username: BotUsername,
    listener: Mutex<Option<TcpListener>>,
    shutdown: Arc<Notify>,
}

impl HealthServer {
    pub fn new(addr: impl Into<String>, bot_username: BotUsername) -> Arc<Self> {
        Arc::new(Self {
            addr: addr.into(),
            bot_username,
            listener: Mutex::new(None),
            shutdown: Arc::new(Notify::new()),
        })
    }

    /// Binds the listening socket. Returns the bound address (useful with port 0).
    #[instrument(skip(self), fields(addr = %self.addr))]
    pub async fn bind(&self) -> anyhow::Result<SocketAddr> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("Failed to bind health server to {}", self.addr))?;
        let local_addr = listener.local_addr()?;
        info!(addr = %local_addr, "Health server listening");
        *self.listener.lock().await = Some(listener);
        Ok(local_addr)
    }

    /// Serves requests on the bound listener until [`HealthServer::shutdown`] is called.
    pub async fn serve(&self) -> anyhow::Result<()> {
        let listener = self
            .listener
            .lock()
            .await
            .take()
            .context("Health server is not bound")?;

        let shutdown = self.shutdown.clone();
        axum::serve(listener, router(self.bot_username.clone()))
            .with_graceful_shutdown(async move {
                shutdown.notified().await;
                info!("Health server shutting down");
            })
            .await
            .context("Health server failed")?;
        Ok(())
    }

    /// Stops a running [`HealthServer::serve`]; if it has not started yet it returns right away.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}
