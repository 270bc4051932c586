//! Shared fixtures and helpers for the webserver test suites

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;
