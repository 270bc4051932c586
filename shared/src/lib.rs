//! Shared types for the headline meter
//!
//! Contains the analysis record exchanged between the analyzer and the
//! webserver, the runtime configuration and the tracing setup used by
//! every binary.

pub mod config;
pub mod errors;
pub mod logging;
pub mod types;

pub use config::{AnalyzerConfig, ConfigOverrides, OutputPolicy};
pub use errors::*;
pub use types::*;
