//! Error types for signing-form

use std::path::PathBuf;

/// Result type for signing-form operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in a signer form session
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejection or lookup failure from the reorder engine
    #[error(transparent)]
    Core(#[from] signing_core::Error),

    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file could not be parsed
    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// Unknown signing mode name
    #[error("Invalid signing mode: {mode}")]
    InvalidMode { mode: String },

    /// Add-self was requested but no user is signed in
    #[error("No current user to add as a signer")]
    NoCurrentUser,

    /// The sequence is not contiguous and cannot be submitted
    #[error("Signing order is not contiguous: {orders:?}")]
    InconsistentOrder { orders: Vec<u32> },

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    /// Whether this is a rejected intent the user should be told about
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Core(inner) if inner.is_rejection())
    }
}
