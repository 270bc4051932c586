//! Common test utilities and infrastructure
//!
//! Shared fixtures and helpers used by the analyzer test suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::TestFixtures;
pub use helpers::{AnalyzerBuilder, TestHelpers};
