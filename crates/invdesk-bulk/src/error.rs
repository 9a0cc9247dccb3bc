//! Error types for bulk operations.

use invdesk_selection::SelectionError;
use thiserror::Error;

/// Errors that can occur while running a bulk operation.
///
/// None of these leave the selection modified: a failed delete keeps
/// everything selected so the user can retry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BulkError {
    /// The request did not complete.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The server answered `status: "error"` or `"fail"`.
    #[error("server rejected the operation: {msg}")]
    Rejected { msg: String },

    /// A response that should carry data could not be understood.
    #[error("invalid server response: {0}")]
    InvalidResponse(String),

    /// Another bulk operation is still running.
    #[error("a bulk operation is already in progress")]
    InFlight,

    /// Client configuration is unusable.
    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

impl BulkError {
    /// Returns a user-friendly error message suitable for a notice.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Could not reach the server. Nothing was deleted.".to_string(),
            Self::Http { status, message } if message.is_empty() => {
                format!("The server could not complete the request (HTTP {status}).")
            }
            Self::Http { message, .. } | Self::Rejected { msg: message } => {
                format!("The server refused the request: {message}")
            }
            Self::InvalidResponse(_) => "The server sent a response that could not be read.".to_string(),
            Self::InFlight => "A delete is already running. Wait for it to finish.".to_string(),
            Self::Config(detail) => format!("The client configuration is invalid: {detail}"),
            Self::Selection(err) => err.user_message(),
        }
    }

    /// Returns a hint for what the user can do next, if there is one.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Network(_) => Some("Check the connection and try again."),
            Self::Http { status, .. } if *status == 403 => {
                Some("Your session may have expired. Reload the page and try again.")
            }
            Self::Http { .. } if self.is_retryable() => Some("Try again in a moment."),
            Self::InFlight => Some("The delete button is enabled again once it completes."),
            Self::Selection(SelectionError::FilterInvalidated { .. }) => {
                Some("Use \"select all\" again under the current filter.")
            }
            _ => None,
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::InFlight => true,
            Self::Http { status, .. } => *status >= 500 || matches!(status, 408 | 429),
            Self::Selection(err) => err.is_retryable(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for BulkError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for BulkError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

/// Result type alias for bulk operations.
pub type Result<T> = std::result::Result<T, BulkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = BulkError::Network("connection refused".to_string());
        assert!(err.user_message().contains("Nothing was deleted"));

        let err = BulkError::Rejected {
            msg: "registro vinculado".to_string(),
        };
        assert!(err.user_message().contains("registro vinculado"));

        let err = BulkError::Http {
            status: 500,
            message: String::new(),
        };
        assert!(err.user_message().contains("HTTP 500"));
    }

    #[test]
    fn test_retryable() {
        assert!(BulkError::Network("timeout".to_string()).is_retryable());
        assert!(
            BulkError::Http {
                status: 503,
                message: String::new()
            }
            .is_retryable()
        );
        assert!(
            !BulkError::Http {
                status: 400,
                message: String::new()
            }
            .is_retryable()
        );
        assert!(!BulkError::Rejected { msg: String::new() }.is_retryable());
    }

    #[test]
    fn test_suggestions() {
        let err = BulkError::Http {
            status: 403,
            message: "CSRF".to_string(),
        };
        assert!(err.suggestion().unwrap().contains("session"));
        assert_eq!(BulkError::Config("x".to_string()).suggestion(), None);
    }
}
