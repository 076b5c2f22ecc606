//! Error types for conversion operations

use std::fmt;

/// Errors that can occur during HTML to AMP conversion
#[derive(Debug)]
pub enum ConversionError {
    /// Invalid input data
    InvalidInput(String),
    /// Serializing the transformed tree back to HTML failed
    SerializeError(String),
    /// Internal error
    InternalError(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ConversionError::SerializeError(msg) => write!(f, "Serialize error: {}", msg),
            ConversionError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ConversionError {}
