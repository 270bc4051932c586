//! Analyzer library for headline and article assessment
//!
//! Submits page URLs to a remote analysis workflow, normalizes the
//! response into a single assessment text and caches results per URL so
//! repeated requests cost nothing.

pub mod analyzer;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use analyzer::{Analyzer, CANCELLED_MESSAGE};
pub use core::{AnalysisStore, OutputStrategy};
pub use error::{AnalyzerError, AnalyzerResult};
pub use traits::{AnalysisInput, PersistentCache, WorkflowClient};
pub use traits::{MockPersistentCache, MockWorkflowClient};
