//! Signer form session
//!
//! Ties the reorder engine to the outside world: a [`SignerForm`] owns the
//! authoritative [`Sequence`](signing_core::Sequence) of one form, turns user
//! intents into engine calls, asks the lock oracle which signers are fixed
//! and hands typed reorders to the drag-surface bridge.
//!
//! # Example
//!
//! ```
//! use signing_core::{SignerRole, Unlocked};
//! use signing_form::{FormConfig, SignerForm};
//! use std::sync::Arc;
//!
//! let mut form = SignerForm::new(&FormConfig::default(), Arc::new(Unlocked));
//! form.add_signer("Ada", "ada@example.com", SignerRole::Signer);
//! form.add_signer("Grace", "grace@example.com", SignerRole::Approver);
//!
//! let payload = form.submit().unwrap();
//! assert_eq!(payload.signers.len(), 2);
//! assert_eq!(payload.signers[1].signing_order, 2);
//! ```

pub mod config;
pub mod error;
pub mod payload;
pub mod session;
pub mod user;

pub use config::{FormConfig, ReplayConfig, SigningMode};
pub use error::{Error, Result};
pub use payload::{SignerRecord, SigningPayload};
pub use session::{ManualEdit, SharedOracle, SignerForm};
pub use user::CurrentUser;
