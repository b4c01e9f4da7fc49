//! Error types for bravia-state

use std::fmt;

/// Result type for bravia-state operations
pub type Result<T> = std::result::Result<T, StateError>;

/// Errors that can occur while tracking television state
#[derive(Debug)]
pub enum StateError {
    /// Error from bravia-api
    Api(bravia_api::ApiError),

    /// A `startDateTime` or `HH:MM:SS` value that could not be read
    InvalidTimestamp(String),

    /// Invalid adapter configuration
    Config(String),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::Api(err) => write!(f, "API error: {}", err),
            StateError::InvalidTimestamp(value) => write!(f, "Invalid timestamp: {}", value),
            StateError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StateError::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<bravia_api::ApiError> for StateError {
    fn from(err: bravia_api::ApiError) -> Self {
        StateError::Api(err)
    }
}

impl From<chrono::ParseError> for StateError {
    fn from(err: chrono::ParseError) -> Self {
        StateError::InvalidTimestamp(err.to_string())
    }
}
