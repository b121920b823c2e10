use thiserror::Error;

/// Errors that can occur when reading or writing local state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The backing file could not be read or written.
    #[error("State I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for storage.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for state store operations.
pub type Result<T> = std::result::Result<T, StateError>;
