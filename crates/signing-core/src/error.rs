//! Error types for signing-core

use crate::entry::Identity;

/// Result type for signing-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconciling a signing order
///
/// None of these are fatal: every operation that returns an error leaves the
/// sequence exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The signer has already completed their action and cannot be moved,
    /// re-numbered or removed
    #[error("Signer {identity} has already signed and cannot be changed")]
    LockedEntry { identity: Identity },

    /// No signer with the given identity exists in the sequence
    #[error("Signer not found: {identity}")]
    EntryNotFound { identity: Identity },

    /// A list position outside the sequence was supplied
    #[error("Position {position} is out of range for {len} signers")]
    PositionOutOfRange { position: usize, len: usize },

    /// Unknown signer role name
    #[error("Invalid signer role: {role}")]
    InvalidRole { role: String },
}

impl Error {
    /// Whether this error is a user-facing rejection of an intent on a
    /// locked signer, rather than a caller mistake.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::LockedEntry { .. })
    }
}
