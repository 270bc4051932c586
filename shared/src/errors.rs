//! Shared error types for the headline meter

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Invalid URL: {input}")]
    InvalidUrl { input: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
