//! Error types for the Navi host.

use navi_retrieval::RetrievalError;
use thiserror::Error;

use crate::rpc::JsonRpcError;

/// Errors that can occur in the host boundary and its chunk store.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Knowledge base not initialized")]
    NotInitialized,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HostError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

impl From<HostError> for JsonRpcError {
    fn from(err: HostError) -> Self {
        match &err {
            HostError::Config(_) => JsonRpcError::invalid_params(err.to_string()),
            HostError::NotInitialized => JsonRpcError::server_not_initialized(err.to_string()),
            _ => JsonRpcError::internal_error(err.to_string()),
        }
    }
}

/// Result type alias for host operations.
pub type HostResult<T> = Result<T, HostError>;
