use thiserror::Error;

/// Error for catalog operations.
#[derive(Debug, Clone, Error)]
pub enum CarError {
    #[error("Car not found: {0}")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage deadline exceeded")]
    Timeout,
}
