//! Context store error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextError {
    /// No context stored under the key.
    #[error("Context not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Redis error: {0}")]
    Redis(String),
    /// The store has been closed; no further calls are served.
    #[error("Context store is closed")]
    Closed,
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for ContextError {
    fn from(err: sqlx::Error) -> Self {
        ContextError::Database(err.to_string())
    }
}

impl From<redis::RedisError> for ContextError {
    fn from(err: redis::RedisError) -> Self {
        ContextError::Redis(err.to_string())
    }
}

impl From<serde_json::Error> for ContextError {
    fn from(err: serde_json::Error) -> Self {
        ContextError::Serialization(err.to_string())
    }
}
