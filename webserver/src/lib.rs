//! Webserver library for Headline Meter
//!
//! Exposes an `Analyzer` over a small JSON API that a browser extension
//! popup can call: submit a URL, poll its state, check health.

pub mod error;
pub mod state;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use webserver_impl::WebServer;
