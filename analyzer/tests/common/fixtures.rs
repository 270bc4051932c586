//! Test fixtures and data for analyzer tests

use serde_json::{json, Value};
use shared::{AnalyzerConfig, OutputPolicy};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const URL_1: &'static str = "http://x.com";
    pub const URL_2: &'static str = "https://news.example.com/politics/markets-in-freefall";
    pub const URL_3: &'static str = "https://blog.example.org/2024/05/quiet-day";

    pub const RUN_ID: &'static str = "run-1";
    pub const WORKFLOW_ID: &'static str = "headlineMeterWorkflow";

    pub const CREATE_RUN_PATH: &'static str = "/api/workflows/headlineMeterWorkflow/create-run";
    pub const START_PATH: &'static str = "/api/workflows/headlineMeterWorkflow/start-async";

    pub const ASSESSMENT: &'static str = "Biased, alarmist tone.";
    pub const CACHED_TEXT: &'static str = "cached text";

    /// Config for a workflow service at `base_url`
    pub fn config(base_url: &str) -> AnalyzerConfig {
        AnalyzerConfig {
            base_url: base_url.to_string(),
            workflow_id: Self::WORKFLOW_ID.to_string(),
            ..AnalyzerConfig::default()
        }
    }

    pub fn strict_config(base_url: &str) -> AnalyzerConfig {
        AnalyzerConfig {
            output_policy: OutputPolicy::Required,
            ..Self::config(base_url)
        }
    }

    pub fn create_run_response() -> Value {
        json!({ "runId": Self::RUN_ID })
    }

    /// start-async response with the assessment at the top level
    pub fn top_level_response(text: &str) -> Value {
        json!({ "output": text })
    }

    /// start-async response with the assessment inside the workflow state
    pub fn workflow_state_response(text: &str) -> Value {
        json!({
            "runId": Self::RUN_ID,
            "payload": {
                "workflowState": {
                    "status": "success",
                    "result": { "output": text }
                }
            }
        })
    }

    /// start-async response without any recognizable output
    pub fn outputless_response() -> Value {
        json!({ "status": "ok" })
    }
}
