//! Service implementations
//!
//! This module contains real implementations of all service traits.
//! These are the production implementations that handle actual I/O operations.

pub mod cache;
pub mod workflow_client;

#[cfg(test)]
mod tests;

// Re-export all service implementations
pub use cache::{cache_key, FileCache, MemoryCache, CACHE_KEY_PREFIX};
pub use workflow_client::RealWorkflowClient;
