//! Server construction and lifecycle.
//!
//! The listener is an explicit value owned by the caller: `Server::bind`
//! returns a bound but not-yet-running server, and the caller decides when
//! (and for how long) it runs. Nothing here is process-global.

use std::future::Future;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::lifecycle;

/// Shared state for request handlers.
///
/// The only cross-request resource is the outbound HTTP client used for the
/// CONFIRMATION callout; reqwest clients are cheap to clone and pool
/// connections internally.
#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound webhook server that has not started serving yet.
pub struct Server {
    listener: TcpListener,
    router: Router,
}

impl Server {
    /// Bind the listener and assemble the router.
    pub async fn bind(addr: &str, state: AppState) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        Ok(Self {
            listener,
            router: build_router(state),
        })
    }

    /// The address the listener is actually bound to (useful with port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("failed to read local address")
    }

    /// Serve until the connection loop fails.
    pub async fn run(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .await
            .context("server error")
    }

    /// Serve until `shutdown` resolves, then stop accepting connections.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("server error")
    }
}

/// Assemble the application router. Exposed so tests can drive handlers
/// without binding a socket.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(lifecycle::router())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
