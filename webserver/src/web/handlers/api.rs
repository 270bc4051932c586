//! REST API handlers
//!
//! JSON endpoints used by the extension popup.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use analyzer::WorkflowClient;
use shared::{process_debug, process_info, AnalysisRecord, ProcessId};

use crate::error::{WebServerError, WebServerResult};
use crate::webserver_impl::WebServer;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct StateQuery {
    pub url: Option<String>,
}

/// Start or join an analysis - POST /api/analyze
pub async fn analyze_url<C>(
    State(webserver): State<WebServer<C>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> WebServerResult<Json<AnalysisRecord>>
where
    C: WorkflowClient + 'static,
{
    let Json(request) = payload.map_err(|e| WebServerError::invalid_request(e.body_text()))?;

    let url = request.url.trim();
    if url.is_empty() {
        return Err(WebServerError::invalid_request("url is required"));
    }

    process_info!(ProcessId::current(), "📨 Analysis requested for {}", url);
    let record = webserver.analyzer().analyze(url).await;
    Ok(Json(record))
}

/// Current snapshot, for one URL or process-wide - GET /api/state
pub async fn get_analysis_state<C>(
    State(webserver): State<WebServer<C>>,
    Query(query): Query<StateQuery>,
) -> Json<AnalysisRecord>
where
    C: WorkflowClient + 'static,
{
    let url = query.url.as_deref().map(str::trim).filter(|url| !url.is_empty());
    process_debug!(ProcessId::current(), "State requested for {:?}", url);
    Json(webserver.analyzer().get_snapshot(url).await)
}

/// Health check - GET /health
pub async fn health<C>(State(webserver): State<WebServer<C>>) -> Json<Value>
where
    C: WorkflowClient + 'static,
{
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": webserver.state().get_uptime_seconds(),
        "in_flight": webserver.analyzer().in_flight_count().await,
    }))
}
