//! Error types for the Catena rope solver.
//!
//! All crates return `CatenaResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Catena rope solver.
#[derive(Debug, Error)]
pub enum CatenaError {
    /// Rope definition is malformed or inconsistent.
    #[error("Invalid rope definition: {0}")]
    InvalidDefinition(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, CatenaError>`.
pub type CatenaResult<T> = Result<T, CatenaError>;
