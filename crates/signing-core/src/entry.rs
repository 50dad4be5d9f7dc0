//! Signer entries
//!
//! An [`Entry`] is one signer's record within the ordered sequence. Its lock
//! status is never stored on the entry: it is derived on demand from the
//! entry's [`NativeId`] through a [`LockOracle`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::lock::LockOracle;

/// Stable opaque key of an entry, unique for its lifetime and never reused
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Reference to a signer record that already exists on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NativeId(u64);

impl NativeId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NativeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// What a recipient is asked to do with the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignerRole {
    /// Must sign the document
    #[default]
    Signer,
    /// Must approve the document
    Approver,
    /// Must open the document
    Viewer,
    /// Receives a copy once everyone is done
    Cc,
}

impl FromStr for SignerRole {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "signer" | "sign" => Ok(SignerRole::Signer),
            "approver" | "approve" => Ok(SignerRole::Approver),
            "viewer" | "view" => Ok(SignerRole::Viewer),
            "cc" => Ok(SignerRole::Cc),
            _ => Err(Error::InvalidRole {
                role: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SignerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignerRole::Signer => write!(f, "signer"),
            SignerRole::Approver => write!(f, "approver"),
            SignerRole::Viewer => write!(f, "viewer"),
            SignerRole::Cc => write!(f, "cc"),
        }
    }
}

/// One signer within the ordered sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Client-side identity, assigned at creation
    pub identity: Identity,
    /// Persisted record this entry mirrors, if any
    pub native_id: Option<NativeId>,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Recipient role
    pub role: SignerRole,
    /// 1-based signing order
    pub order: u32,
}

impl Entry {
    /// Create a blank, unpersisted entry
    ///
    /// The order is assigned when the entry joins a sequence.
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            native_id: None,
            name: String::new(),
            email: String::new(),
            role: SignerRole::default(),
            order: 0,
        }
    }

    pub fn with_contact(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.name = name.into();
        self.email = email.into();
        self
    }

    pub fn with_native_id(mut self, native_id: NativeId) -> Self {
        self.native_id = Some(native_id);
        self
    }

    pub fn with_role(mut self, role: SignerRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// True when neither name nor email has been filled in
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.email.trim().is_empty()
    }

    /// Ask `oracle` whether this entry may no longer move.
    ///
    /// Entries without a native id were never persisted and are always movable.
    pub fn is_locked<O: LockOracle + ?Sized>(&self, oracle: &O) -> bool {
        oracle.is_locked(self.native_id.as_ref())
    }
}
