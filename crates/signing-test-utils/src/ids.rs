//! Deterministic identities

use std::sync::atomic::{AtomicU64, Ordering};

use signing_core::{Identity, IdentityGenerator};

/// Hands out `new-1`, `new-2`, ... in call order
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityGenerator for SequentialIds {
    fn generate(&self) -> Identity {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        Identity::new(format!("new-{n}"))
    }
}
