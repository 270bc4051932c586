//! Trait definitions with mockall annotations for testing
//!
//! Network and storage access go through these traits so the analyzer can
//! be exercised against mocks.

use serde::Serialize;
use serde_json::Value;

use crate::error::AnalyzerResult;

/// Input handed to a workflow run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisInput {
    pub url: String,
    pub task: String,
}

/// Remote workflow service abstraction
///
/// One analysis is a `create_run` followed by a `start_run` on the returned id.
#[mockall::automock]
#[async_trait::async_trait]
pub trait WorkflowClient: Send + Sync {
    /// Create a workflow run and return its server-issued id
    async fn create_run(&self) -> AnalyzerResult<String>;

    /// Start the run and return the parsed response body
    ///
    /// # Parameters
    /// - `run_id`: Id returned by `create_run`
    /// - `input`: URL and instruction for the run
    async fn start_run(&self, run_id: &str, input: &AnalysisInput) -> AnalyzerResult<Value>;
}

/// Durable key-value storage for successful results
#[mockall::automock]
#[async_trait::async_trait]
pub trait PersistentCache: Send + Sync {
    /// Look up a stored value
    async fn get(&self, key: &str) -> AnalyzerResult<Option<String>>;

    /// Store a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> AnalyzerResult<()>;
}
