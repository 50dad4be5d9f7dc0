//! Signing-order reconciliation engine
//!
//! This crate keeps a document's list of signers in a contiguous, 1-based
//! signing order while entries are added, removed, dragged or re-numbered by
//! hand. Signers who have already completed their action are *locked*: they
//! keep both their list position and their order value, and every reorder
//! treats them as fixed obstacles.
//!
//! - **Entry model**: [`Entry`], [`Identity`], [`NativeId`], [`SignerRole`]
//! - **Lock oracle**: [`LockOracle`] and the [`SignerStatusBook`] backing it
//! - **Sequence**: the ordered list with add, remove and normalization
//! - **Reorder engine**: drag-originated moves and typed manual orders
//!
//! # Architecture
//!
//! ```text
//!          signing-cli
//!               |
//!         signing-form
//!          /        \
//! signing-core   signing-sync
//! ```
//!
//! # Example
//!
//! ```
//! use signing_core::{Entry, Identity, Sequence, Unlocked};
//!
//! let mut sequence = Sequence::new();
//! for name in ["a", "b", "c", "d"] {
//!     sequence.append(Entry::new(Identity::new(name)));
//! }
//!
//! let moved = sequence.reorder_via_drag(&Unlocked, 0, Some(2)).unwrap();
//! assert_eq!(moved.map(|m| m.to), Some(2));
//! assert_eq!(sequence.entries()[2].identity.as_str(), "a");
//! assert!(sequence.is_contiguous());
//! ```

pub mod entry;
pub mod error;
pub mod identity;
pub mod lock;
pub mod reorder;
pub mod sequence;

pub use entry::{Entry, Identity, NativeId, SignerRole};
pub use error::{Error, Result};
pub use identity::{IdentityGenerator, UuidGenerator};
pub use lock::{LockOracle, SignerStatus, SignerStatusBook, Unlocked};
pub use reorder::{ManualOrder, Move};
pub use sequence::Sequence;
