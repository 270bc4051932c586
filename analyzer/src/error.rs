//! Analyzer-specific error types

use thiserror::Error;
use shared::SharedError;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Failed to create run: {status} - {body}")]
    CreateRun { status: u16, body: String },

    #[error("No runId found in create-run response")]
    MissingRunId,

    #[error("Failed to start workflow: {status} - {body}")]
    StartRun { status: u16, body: String },

    #[error("No analysis output found in workflow response")]
    NoOutput,

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Invalid workflow response: {message}")]
    InvalidResponse { message: String },

    #[error("Cache {operation} failed on {path}: {message}")]
    Storage { operation: String, path: String, message: String },

    #[error("Configuration error: {field}")]
    Configuration { field: String },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(error: reqwest::Error) -> Self {
        AnalyzerError::Network {
            message: error.to_string(),
        }
    }
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
