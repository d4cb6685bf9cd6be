//! Error types for payload and configuration decoding

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
