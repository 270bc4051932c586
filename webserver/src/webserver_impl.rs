//! Main webserver implementation
//!
//! Wires the API handlers around a shared `Analyzer` and serves them.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use analyzer::{Analyzer, WorkflowClient};
use shared::{logging, process_error, process_info, ProcessId};

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::web::handlers::api;

/// HTTP front end over an analyzer
pub struct WebServer<C>
where
    C: WorkflowClient,
{
    state: Arc<WebServerState>,
    analyzer: Analyzer<C>,
}

impl<C> Clone for WebServer<C>
where
    C: WorkflowClient,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            analyzer: self.analyzer.clone(),
        }
    }
}

impl<C> WebServer<C>
where
    C: WorkflowClient + 'static,
{
    pub fn new(bind_address: SocketAddr, analyzer: Analyzer<C>) -> Self {
        Self {
            state: Arc::new(WebServerState::new(bind_address)),
            analyzer,
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/api/analyze", post(api::analyze_url::<C>))
            .route("/api/state", get(api::get_analysis_state::<C>))
            .route("/health", get(api::health::<C>))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    // The extension popup calls from its own origin
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Serve until Ctrl+C
    pub async fn run(&self) -> WebServerResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(self.state.bind_address)
            .await
            .map_err(|e| {
                process_error!(
                    ProcessId::current(),
                    "❌ Failed to bind to {}: {}",
                    self.state.bind_address,
                    e
                );
                WebServerError::ServerStartup(format!(
                    "Failed to bind to {}: {}",
                    self.state.bind_address, e
                ))
            })?;

        self.state.set_running(true);
        process_info!(
            ProcessId::current(),
            "🌐 Web server listening on http://{}",
            self.state.bind_address
        );

        let state = self.state.clone();
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal"),
                    Err(e) => logging::log_error(ProcessId::current(), "Signal handling", &e),
                }
                state.set_running(false);
            })
            .await?;

        Ok(())
    }

    pub fn state(&self) -> &Arc<WebServerState> {
        &self.state
    }

    pub fn analyzer(&self) -> &Analyzer<C> {
        &self.analyzer
    }
}
