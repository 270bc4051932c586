//! Core business logic modules
//!
//! This module contains pure business logic with no I/O dependencies.
//! All functions are deterministic and easily testable.

pub mod extraction;
pub mod store;

pub use extraction::{extract_output, extract_run_id, OutputStrategy};
pub use store::AnalysisStore;
