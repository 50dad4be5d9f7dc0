//! Error types for signing-cli

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the form session
    #[error(transparent)]
    Form(#[from] signing_form::Error),

    /// Error from the drag-surface replay
    #[error(transparent)]
    Sync(#[from] signing_sync::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Script file could not be parsed
    #[error("Invalid script at {path}: {message}")]
    Script { path: PathBuf, message: String },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Whether the session refused the step but stays usable
    pub fn is_rejection(&self) -> bool {
        match self {
            CliError::Form(e) => e.is_rejection(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signing_core::Identity;

    #[test]
    fn test_locked_removal_is_a_rejection() {
        let err = CliError::from(signing_form::Error::from(signing_core::Error::LockedEntry {
            identity: Identity::new("s1"),
        }));
        assert!(err.is_rejection());
    }

    #[test]
    fn test_user_error_is_not_a_rejection() {
        assert!(!CliError::user("no signer named Zed").is_rejection());
    }
}
