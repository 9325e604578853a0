//! PTV client error types

use thiserror::Error;

/// Errors that can occur while building, signing or executing a PTV request
#[derive(Debug, Error)]
pub enum PtvError {
    /// Credentials or client configuration are missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A required parameter is missing or a supplied one is malformed
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The HTTP exchange failed (network error, timeout or non-2xx status)
    #[error("Transport error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Transport {
        /// HTTP status code, if a response was received
        status: Option<u16>,
        /// Error detail from the transport or from the API error body
        message: String,
    },

    /// The response body was not a JSON object
    #[error("Response format error: {0}")]
    ResponseFormat(String),
}

impl PtvError {
    /// Shorthand for [`PtvError::InvalidParameter`]
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// HTTP status attached to a transport error
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}
