//! Lock oracle
//!
//! Whether an entry may move is a pure predicate over its native id, read
//! from an external status source every time it is needed. Nothing in this
//! crate caches the answer.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::NativeId;

/// Decides whether a persisted signer can still be moved or renumbered
pub trait LockOracle {
    /// Returns true once the real-world action behind `native_id` has been
    /// completed. Must return false for `None`.
    fn is_locked(&self, native_id: Option<&NativeId>) -> bool;
}

impl<T: LockOracle + ?Sized> LockOracle for &T {
    fn is_locked(&self, native_id: Option<&NativeId>) -> bool {
        (**self).is_locked(native_id)
    }
}

impl<T: LockOracle + ?Sized> LockOracle for Arc<T> {
    fn is_locked(&self, native_id: Option<&NativeId>) -> bool {
        (**self).is_locked(native_id)
    }
}

/// An explicit set of locked native ids
impl LockOracle for HashSet<NativeId> {
    fn is_locked(&self, native_id: Option<&NativeId>) -> bool {
        native_id.is_some_and(|id| self.contains(id))
    }
}

/// Oracle for documents nobody has acted on yet
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlocked;

impl LockOracle for Unlocked {
    fn is_locked(&self, _native_id: Option<&NativeId>) -> bool {
        false
    }
}

/// Server-side progress of one signer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerStatus {
    /// When the signer completed their action
    #[serde(default)]
    pub signed_at: Option<DateTime<Utc>>,
    /// Fields this signer has already filled in on the document
    #[serde(default)]
    pub placed_fields: Vec<String>,
}

impl SignerStatus {
    pub fn signed(at: DateTime<Utc>) -> Self {
        Self {
            signed_at: Some(at),
            placed_fields: Vec::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.signed_at.is_some()
    }

    /// Signed, or at least one field already filled in
    pub fn has_acted(&self) -> bool {
        self.is_completed() || !self.placed_fields.is_empty()
    }
}

/// Status of every persisted signer of a document
///
/// An entry is locked once its signer has signed or filled in any field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerStatusBook {
    statuses: HashMap<NativeId, SignerStatus>,
}

impl SignerStatusBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, native_id: NativeId, status: SignerStatus) {
        self.statuses.insert(native_id, status);
    }

    /// Record that `native_id` completed at `at`
    pub fn mark_signed(&mut self, native_id: NativeId, at: DateTime<Utc>) {
        self.statuses.entry(native_id).or_default().signed_at = Some(at);
    }

    pub fn get(&self, native_id: &NativeId) -> Option<&SignerStatus> {
        self.statuses.get(native_id)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl LockOracle for SignerStatusBook {
    fn is_locked(&self, native_id: Option<&NativeId>) -> bool {
        native_id
            .and_then(|id| self.statuses.get(id))
            .is_some_and(SignerStatus::has_acted)
    }
}
