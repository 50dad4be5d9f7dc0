//! Signer-list fixtures
//!
//! A lineup is written as whitespace-separated names in signing order; a
//! trailing `*` marks a signer who has already signed:
//!
//! ```
//! use signing_test_utils::{layout, lineup};
//!
//! let fixture = lineup("alice bob* carol");
//! assert_eq!(
//!     layout(&fixture.sequence),
//!     vec![("alice", 1), ("bob", 2), ("carol", 3)]
//! );
//! assert_eq!(fixture.locked.len(), 1);
//! ```

use std::collections::HashSet;

use signing_core::{Entry, Identity, NativeId, Sequence};
use signing_sync::MemorySurface;

/// A sequence together with the native ids that are locked
#[derive(Debug, Clone)]
pub struct Lineup {
    pub sequence: Sequence,
    pub locked: HashSet<NativeId>,
}

impl Lineup {
    /// Identities of the locked entries
    pub fn pinned(&self) -> HashSet<Identity> {
        self.sequence
            .iter()
            .filter(|e| e.is_locked(&self.locked))
            .map(|e| e.identity.clone())
            .collect()
    }

    /// A drag surface mirroring the sequence, with locked entries pinned
    pub fn surface(&self) -> MemorySurface {
        let surface = MemorySurface::new(self.sequence.identities());
        for identity in self.pinned() {
            surface.pin(identity);
        }
        surface
    }
}

/// Build a persisted lineup; every entry gets native id `position + 1`
pub fn lineup(spec: &str) -> Lineup {
    let mut sequence = Sequence::new();
    let mut locked = HashSet::new();
    for (index, token) in spec.split_whitespace().enumerate() {
        let native_id = NativeId::new(index as u64 + 1);
        let name = token.trim_end_matches('*');
        if token.ends_with('*') {
            locked.insert(native_id);
        }
        sequence.append(
            Entry::new(Identity::new(name))
                .with_contact(name, format!("{name}@example.com"))
                .with_native_id(native_id),
        );
    }
    Lineup { sequence, locked }
}

/// Identity names in list order
pub fn names(sequence: &Sequence) -> Vec<&str> {
    sequence.iter().map(|e| e.identity.as_str()).collect()
}

/// `(identity, order)` pairs in list order
pub fn layout(sequence: &Sequence) -> Vec<(&str, u32)> {
    sequence
        .iter()
        .map(|e| (e.identity.as_str(), e.order))
        .collect()
}

pub fn identities(names: &[&str]) -> Vec<Identity> {
    names.iter().map(|n| Identity::new(*n)).collect()
}
