//! # Error Types
//!
//! Domain-specific error types for bizdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bizdesk-core errors (this file)                                       │
//! │  └── CoreError        - Parsing of user-supplied names and lines       │
//! │                                                                         │
//! │  bizdesk-client errors (separate crate)                                │
//! │  ├── ApiError         - Outcome of a failed REST call                  │
//! │  └── ClientError      - Config and session storage failures            │
//! │                                                                         │
//! │  Flow: CoreError → CLI usage error                                     │
//! │        ApiError  → Ui (login screen or one notification)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Errors raised while turning user input into core types.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// Module name outside the closed navigation set.
    #[error("Unknown module: {0}")]
    UnknownModule(String),

    /// An order line given as text could not be parsed.
    ///
    /// Expected form is `ITEM:QUANTITY:RATE`, e.g. `3:2.5:120`.
    #[error("Invalid line item '{input}': {reason}")]
    InvalidLineItem { input: String, reason: String },

    /// A date was not in `YYYY-MM-DD` form.
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Status / flow type text not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed {
        field: String,
        allowed: Vec<String>,
    },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidLineItem {
            input: "x:1".to_string(),
            reason: "expected ITEM:QUANTITY:RATE".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid line item 'x:1': expected ITEM:QUANTITY:RATE"
        );

        let err = CoreError::UnknownModule("settings".to_string());
        assert_eq!(err.to_string(), "Unknown module: settings");
    }
}
