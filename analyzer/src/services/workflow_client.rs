//! Real workflow service client
//!
//! Talks to the workflow HTTP API: `create-run` then `start-async` for a
//! fixed workflow id.

use async_trait::async_trait;
use serde_json::{json, Value};

use shared::{process_debug, AnalyzerConfig, ProcessId};
use crate::core::extract_run_id;
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::traits::{AnalysisInput, WorkflowClient};

/// reqwest-backed workflow client
#[derive(Debug, Clone)]
pub struct RealWorkflowClient {
    client: reqwest::Client,
    base_url: String,
    workflow_id: String,
}

impl RealWorkflowClient {
    /// Create a client for `workflow_id` on the service at `base_url`
    pub fn new(base_url: impl Into<String>, workflow_id: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            workflow_id: workflow_id.into(),
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.trimmed_base_url(), config.workflow_id.clone())
    }

    /// `{base}/api/workflows/{workflowId}/{action}`
    pub fn endpoint(&self, action: &str) -> String {
        format!("{}/api/workflows/{}/{}", self.base_url, self.workflow_id, action)
    }
}

#[async_trait]
impl WorkflowClient for RealWorkflowClient {
    async fn create_run(&self) -> AnalyzerResult<String> {
        let response = self
            .client
            .post(self.endpoint("create-run"))
            .json(&json!({}))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::CreateRun {
                status: status.as_u16(),
                body,
            });
        }

        let run_data = read_json(response).await?;
        let run_id = extract_run_id(&run_data)?;
        process_debug!(ProcessId::current(), "🆔 Created workflow run {}", run_id);
        Ok(run_id)
    }

    async fn start_run(&self, run_id: &str, input: &AnalysisInput) -> AnalyzerResult<Value> {
        let body = json!({ "inputData": input });

        let response = self
            .client
            .post(self.endpoint("start-async"))
            .query(&[("runId", run_id)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::StartRun {
                status: status.as_u16(),
                body,
            });
        }

        read_json(response).await
    }
}

async fn read_json(response: reqwest::Response) -> AnalyzerResult<Value> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| AnalyzerError::InvalidResponse {
        message: e.to_string(),
    })
}
