//! Error types and handling for `tripweave`

use thiserror::Error;

/// Main error type for the `tripweave` library
#[derive(Error, Debug)]
pub enum TripweaveError {
    /// Required input missing or invalid, rejected before any provider call
    #[error("Precondition failed: {message}")]
    Precondition { message: String },

    /// Mapping, generation or translation provider failure
    #[error("Provider error: {message}")]
    Provider { message: String },

    /// Generation provider answered without usable text
    #[error("Empty response from generation provider")]
    EmptyGeneration,

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TripweaveError {
    /// Create a new precondition error
    pub fn precondition<S: Into<String>>(message: S) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripweaveError::Precondition { message } => format!("Invalid request: {message}"),
            TripweaveError::Provider { .. } => {
                "Unable to reach an external service. Please try again later.".to_string()
            }
            TripweaveError::EmptyGeneration => {
                "Failed to generate itinerary: the model returned no text.".to_string()
            }
            TripweaveError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TripweaveError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
