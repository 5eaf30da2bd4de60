//! Error types and handling for the packwise application

use thiserror::Error;

/// Main error type for the packwise application
#[derive(Error, Debug)]
pub enum PackwiseError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid or missing user input (dates, coordinates, units)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The upstream weather or geocoding service could not be reached
    /// or answered with a non-success status
    #[error("Upstream request failed: {message}")]
    Upstream { message: String },

    /// The upstream service answered, but not in the shape we rely on
    #[error("Unexpected upstream response: {message}")]
    UnexpectedResponse { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },
}

impl PackwiseError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new unexpected-response error
    pub fn unexpected_response<S: Into<String>>(message: S) -> Self {
        Self::UnexpectedResponse {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Whether the failure was caused by the caller's input
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(self, PackwiseError::Validation { .. })
    }

    /// Whether the failure was caused by the weather/geocoding dependency
    #[must_use]
    pub fn is_dependency_error(&self) -> bool {
        matches!(
            self,
            PackwiseError::Upstream { .. } | PackwiseError::UnexpectedResponse { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PackwiseError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            PackwiseError::Validation { message }
            | PackwiseError::Upstream { message }
            | PackwiseError::UnexpectedResponse { message } => message.clone(),
            PackwiseError::Cache { .. } => {
                "Cache operation failed. You may need to clear your cache.".to_string()
            }
        }
    }
}
