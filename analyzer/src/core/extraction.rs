//! Normalization of workflow service responses
//!
//! The service has returned its run id and its output under several
//! shapes over time. Each known shape is a strategy; strategies are tried
//! in order and the first match wins.

use serde_json::Value;
use shared::OutputPolicy;

use crate::error::{AnalyzerError, AnalyzerResult};

/// Known locations of the analysis text in a `start-async` response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStrategy {
    /// `payload.workflowState.result.output`
    WorkflowState,
    /// `result.output`
    RunResult,
    /// `output`
    TopLevel,
}

impl OutputStrategy {
    /// Strategies in the order they are tried
    pub const ORDERED: [OutputStrategy; 3] = [
        OutputStrategy::WorkflowState,
        OutputStrategy::RunResult,
        OutputStrategy::TopLevel,
    ];

    pub fn path(&self) -> &'static [&'static str] {
        match self {
            OutputStrategy::WorkflowState => &["payload", "workflowState", "result", "output"],
            OutputStrategy::RunResult => &["result", "output"],
            OutputStrategy::TopLevel => &["output"],
        }
    }

    /// Apply this strategy to a response
    pub fn extract(&self, response: &Value) -> Option<String> {
        let value = self
            .path()
            .iter()
            .try_fold(response, |node, key| node.get(*key))?;
        output_text(value)
    }
}

/// Extract the analysis text from a `start-async` response.
///
/// With `OutputPolicy::RawFallback` a response without a recognizable
/// output yields its own compact JSON serialization.
pub fn extract_output(response: &Value, policy: OutputPolicy) -> AnalyzerResult<String> {
    if let Some(output) = OutputStrategy::ORDERED
        .iter()
        .find_map(|strategy| strategy.extract(response))
    {
        return Ok(output);
    }

    match policy {
        OutputPolicy::RawFallback => Ok(response.to_string()),
        OutputPolicy::Required => Err(AnalyzerError::NoOutput),
    }
}

/// Extract the run id from a `create-run` response.
///
/// Accepts `runId`, then `id`, then a bare JSON string.
pub fn extract_run_id(response: &Value) -> AnalyzerResult<String> {
    ["runId", "id"]
        .iter()
        .find_map(|field| response.get(*field).and_then(run_id_text))
        .or_else(|| match response {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            _ => None,
        })
        .ok_or(AnalyzerError::MissingRunId)
}

fn run_id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) if id.as_f64() == Some(0.0) => None,
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Empty values (null, "", false, 0) do not count as output
fn output_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
