//! Core shared types and identifiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Used by library code running without an initialized binary (tests)
static DEFAULT_PROCESS_ID: ProcessId = ProcessId::Analyzer;

/// Process identifier for any component in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// Standalone analyzer CLI
    Analyzer,
    /// HTTP API process
    WebServer,
}

impl ProcessId {
    /// Initialize the global process ID for the analyzer CLI
    pub fn init_analyzer() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Analyzer)
    }

    /// Initialize the global process ID for webserver
    pub fn init_webserver() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::WebServer)
    }

    /// Get the global process ID, falling back to `Analyzer` when no
    /// binary has initialized it
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get().unwrap_or(&DEFAULT_PROCESS_ID)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Analyzer => write!(f, "analyzer"),
            ProcessId::WebServer => write!(f, "webserver"),
        }
    }
}

/// State of one URL's analysis as seen by readers.
///
/// Once `in_progress` is false and an attempt has finished, exactly one of
/// `result` and `error` is set. Both are empty while a run is in flight and
/// in the idle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub url: String,
    pub result: Option<String>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub in_progress: bool,
}

impl AnalysisRecord {
    /// Process-wide state before any analysis was requested
    pub fn idle() -> Self {
        Self {
            url: String::new(),
            result: None,
            error: None,
            timestamp: Utc::now(),
            in_progress: false,
        }
    }

    /// Record for a run that has just been started
    pub fn pending(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            result: None,
            error: None,
            timestamp: Utc::now(),
            in_progress: true,
        }
    }

    pub fn succeeded(url: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            result: Some(result.into()),
            error: None,
            timestamp: Utc::now(),
            in_progress: false,
        }
    }

    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            result: None,
            error: Some(error.into()),
            timestamp: Utc::now(),
            in_progress: false,
        }
    }

    /// Build the completed record for a finished run
    pub fn from_outcome(url: impl Into<String>, outcome: Result<String, String>) -> Self {
        match outcome {
            Ok(result) => Self::succeeded(url, result),
            Err(error) => Self::failed(url, error),
        }
    }

    /// True for the state reported before any analysis was requested
    pub fn is_idle(&self) -> bool {
        self.url.is_empty() && !self.in_progress && self.result.is_none() && self.error.is_none()
    }

    /// True once a run has finished, successfully or not
    pub fn is_complete(&self) -> bool {
        !self.in_progress && (self.result.is_some() || self.error.is_some())
    }

    /// True when the record can be served as a cache hit
    pub fn has_result(&self) -> bool {
        !self.in_progress && self.result.is_some()
    }
}
