//! Error types for the cache engines
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engines.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A constructor received an invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engines.
pub type Result<T> = std::result::Result<T, CacheError>;
