//! Selection error types.

use std::path::PathBuf;

use thiserror::Error;

/// Selection operation error.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// An all-matching selection was made under a filter the view no longer
    /// shows. The flag has been cleared; the user must select again.
    #[error("selection of all matching records was made under a different filter")]
    FilterInvalidated {
        /// Fingerprint of the filter the selection was made under.
        selected_under: String,
        /// Fingerprint of the filter currently shown.
        current: String,
    },

    /// File I/O error on the selection state file.
    #[error("Failed to {operation} selection state file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file exists but is not a JSON object of strings.
    #[error("Failed to read selection state from {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Selection state could not be encoded.
    #[error("Failed to encode selection state")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Temp file couldn't be renamed over the state file.
    #[error("Failed to complete selection state save")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SelectionError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::FilterInvalidated { .. } => {
                "The filter changed after selecting all records. Select all again to \
                 apply the action to the new results."
                    .to_string()
            }
            Self::Io {
                operation, path, ..
            } => {
                format!(
                    "Could not {} the selection file at {}",
                    operation,
                    path.display()
                )
            }
            Self::Deserialization { path, .. } => {
                format!(
                    "The selection file at {} is corrupted. Delete it to start over.",
                    path.display()
                )
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the selection.".to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the selection to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    /// Check if this error is recoverable by retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::AtomicWriteFailed { .. })
    }
}

/// Result type for selection operations.
pub type Result<T> = std::result::Result<T, SelectionError>;
