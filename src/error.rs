//! Error types for teamcity-harness
//!
//! This module defines the error hierarchy used throughout the harness.
//! Checked requests report status mismatches as [`RequestError::UnexpectedStatus`],
//! which tests surface as assertion failures; transport problems stay separate
//! so a refused connection is never mistaken for a product verdict.

use thiserror::Error;

/// Top-level harness error
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("Role scope error: {0}")]
    Scope(#[from] ScopeError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the request layer
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Expected HTTP {expected} but got HTTP {actual}: {body}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("Failed to parse {resource} response: {reason} (body: {body})")]
    Deserialize {
        resource: &'static str,
        reason: String,
        body: String,
    },

    #[error("Operation '{operation}' is not supported for {resource}")]
    Unsupported {
        resource: &'static str,
        operation: &'static str,
    },

    #[error("Failed to serialize request payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl RequestError {
    /// Whether the server answered but not with the expected status.
    ///
    /// Distinguishes assertion failures from transport errors when reporting.
    pub fn is_assertion_failure(&self) -> bool {
        matches!(self, RequestError::UnexpectedStatus { .. })
    }

    /// The HTTP status the server actually returned, if it answered.
    pub fn actual_status(&self) -> Option<u16> {
        match self {
            RequestError::UnexpectedStatus { actual, .. } => Some(*actual),
            RequestError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Role and scope construction errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScopeError {
    #[error("Invalid role scope '{0}': expected 'g' or 'p:<projectId>'")]
    InvalidScope(String),

    #[error("Unknown role '{0}'")]
    UnknownRole(String),
}

/// Result type alias for the harness
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Result type alias for request operations
pub type RequestResult<T> = std::result::Result<T, RequestError>;
