//! # Client Error Types
//!
//! Error types for API calls, configuration and session storage.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ApiError (outcome of one REST call)                                   │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Unauthorized   │  │   Rejected      │  │  Transport / Decode     │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  HTTP 401       │  │  other non-2xx  │  │  no response / response │ │
//! │  │  session wiped  │  │  server message │  │  not the expected JSON  │ │
//! │  │  → login view   │  │  → notify       │  │  → notify               │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ClientError (local setup)                                             │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │  Configuration  │  │   Storage       │                              │
//! │  │  InvalidConfig  │  │  StorageFailed  │                              │
//! │  │  InvalidUrl     │  │                 │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ApiError` is never surfaced to the user by the client itself. The caller
//! decides how to present it, normally through [`ApiError::user_message`].

use thiserror::Error;

/// Result type alias for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for configuration and storage operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Fallback message when the server gives no usable `detail`.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Message shown when the request never got an answer.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check if the server is running.";

// =============================================================================
// API Errors
// =============================================================================

/// Why a REST call produced no result.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// HTTP 401. The session has already been cleared.
    #[error("Not authenticated")]
    Unauthorized,

    /// Any other non-success status, with the server's message.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request could not be sent or the response could not be received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A success response whose body was not the expected JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The single notification text for this failure.
    ///
    /// `None` for [`ApiError::Unauthorized`]: that case sends the user back to
    /// the login view without a message.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ApiError::Unauthorized => None,
            ApiError::Rejected { message, .. } => Some(message.clone()),
            ApiError::Transport(_) => Some(NETWORK_ERROR_MESSAGE.to_string()),
            ApiError::Decode(_) => Some("Unexpected response from server.".to_string()),
        }
    }

    /// Returns true for the 401 case.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

// =============================================================================
// Client Errors
// =============================================================================

/// Local failures: configuration and the durable session store.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Base URL is not a usable http(s) URL.
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// Session store could not be read or written.
    #[error("Session storage failed: {0}")]
    StorageFailed(String),

    /// Building the HTTP client failed.
    #[error("HTTP client setup failed: {0}")]
    HttpSetup(String),
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::StorageFailed(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::StorageFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::HttpSetup(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(ApiError::Unauthorized.user_message(), None);
        assert_eq!(
            ApiError::Rejected {
                status: 422,
                message: "Name required".into()
            }
            .user_message()
            .as_deref(),
            Some("Name required")
        );
        assert_eq!(
            ApiError::Transport("connection refused".into())
                .user_message()
                .as_deref(),
            Some(NETWORK_ERROR_MESSAGE)
        );
    }

    #[test]
    fn test_status() {
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert_eq!(ApiError::Transport("x".into()).status(), None);
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Rejected {
            status: 404,
            message: "Supplier not found".into(),
        };
        assert_eq!(err.to_string(), "Request rejected (404): Supplier not found");
    }
}
