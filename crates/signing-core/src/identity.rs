//! Identity generation for newly added entries

use uuid::Uuid;

use crate::entry::Identity;

/// Produces a fresh identity for every new entry
pub trait IdentityGenerator: Send + Sync {
    fn generate(&self) -> Identity;
}

/// Random v4 UUID identities
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdentityGenerator for UuidGenerator {
    fn generate(&self) -> Identity {
        Identity::new(Uuid::new_v4().to_string())
    }
}
