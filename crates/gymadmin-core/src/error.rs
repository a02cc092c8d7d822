//! Error types for the gym admin toolkit
//!
//! Every error renders as a single line suitable for a banner.

use std::{error::Error as StdError, fmt};

/// Main error type for the gym admin toolkit
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// Serialization error
    Serialization(serde_json::Error),

    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Credentials did not match a known account
    Authentication(String),

    /// Credentials matched but the account may not use the admin tools
    Unauthorized,

    /// Not found error
    NotFound {
        /// Resource that was not found
        resource: String,
    },

    /// Transport-level HTTP failure
    Http(String),

    /// The backend answered with a non-success status
    Api {
        /// HTTP status code
        status: u16,
        /// Response message
        message: String,
    },

    /// An entity action is not allowed from its current state
    InvalidTransition {
        /// Current state
        from: String,
        /// Requested state
        to: String,
    },

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a single-field validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a missing resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::Authentication(msg) => write!(f, "{msg}"),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::NotFound { resource } => write!(f, "Resource not found: {resource}"),
            Self::Http(msg) => write!(f, "Request failed: {msg}"),
            Self::Api { status, message } => write!(f, "API returned {status}: {message}"),
            Self::InvalidTransition { from, to } => {
                write!(f, "Cannot change status from {from} to {to}")
            }
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}
