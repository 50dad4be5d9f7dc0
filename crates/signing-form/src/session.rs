//! Signer form session
//!
//! [`SignerForm`] owns the authoritative signer list of one document and is
//! the single mutator of it. Rendering code forwards user intents here and
//! re-reads [`SignerForm::sequence`] afterwards.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use signing_core::{
    Entry, Identity, IdentityGenerator, LockOracle, ManualOrder, Move, Sequence, SignerRole,
    UuidGenerator,
};
use signing_sync::{DragSurface, ReplayBridge, ReplayPlan, ReplayTicket, ReplayTiming};
use tracing::{debug, info, warn};

use crate::config::{FormConfig, SigningMode};
use crate::error::{Error, Result};
use crate::payload::{SignerRecord, SigningPayload};
use crate::user::CurrentUser;

/// Lock status source shared with the rest of the application
pub type SharedOracle = Arc<dyn LockOracle + Send + Sync>;

/// Result of a typed order edit
#[derive(Debug)]
pub struct ManualEdit {
    /// What the engine made of the typed value
    pub outcome: ManualOrder,
    /// The drag-surface replay, when one was started or skipped
    pub replay: Option<ReplayTicket>,
}

impl ManualEdit {
    /// The value the order field should show for a reverted edit
    pub fn reverted_display(&self) -> Option<&str> {
        match &self.outcome {
            ManualOrder::Reverted { display } => Some(display),
            _ => None,
        }
    }
}

/// An editing session over the signers of one document
pub struct SignerForm {
    sequence: Sequence,
    mode: SigningMode,
    max_signers: Option<usize>,
    timing: ReplayTiming,
    identities: Arc<dyn IdentityGenerator>,
    oracle: SharedOracle,
    bridge: Option<ReplayBridge>,
    current_user: Option<CurrentUser>,
}

impl fmt::Debug for SignerForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerForm")
            .field("sequence", &self.sequence)
            .field("mode", &self.mode)
            .field("max_signers", &self.max_signers)
            .field("bridge", &self.bridge)
            .field("current_user", &self.current_user)
            .finish_non_exhaustive()
    }
}

impl SignerForm {
    /// Create an empty form
    pub fn new(config: &FormConfig, oracle: SharedOracle) -> Self {
        Self {
            sequence: Sequence::new(),
            mode: config.signing_mode,
            max_signers: config.max_signers,
            timing: config.replay.into(),
            identities: Arc::new(UuidGenerator),
            oracle,
            bridge: None,
            current_user: None,
        }
    }

    /// Start from previously persisted signers
    pub fn with_sequence(mut self, sequence: Sequence) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_identities(mut self, identities: Arc<dyn IdentityGenerator>) -> Self {
        self.identities = identities;
        self
    }

    /// Replay typed reorders onto `surface`
    pub fn with_drag_surface(mut self, surface: Arc<dyn DragSurface>) -> Self {
        self.bridge = Some(ReplayBridge::new(surface).with_timing(self.timing));
        self
    }

    pub fn with_current_user(mut self, user: CurrentUser) -> Self {
        self.current_user = Some(user);
        self
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn mode(&self) -> SigningMode {
        self.mode
    }

    /// Switch between sequential and parallel signing; orders are kept
    pub fn set_mode(&mut self, mode: SigningMode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "Signing mode changed");
            self.mode = mode;
        }
    }

    pub fn max_signers(&self) -> Option<usize> {
        self.max_signers
    }

    /// Whether another signer fits under the configured limit
    pub fn can_add(&self) -> bool {
        self.max_signers
            .is_none_or(|limit| self.sequence.len() < limit)
    }

    /// Whether the signer with `identity` has already signed
    pub fn is_locked(&self, identity: &Identity) -> bool {
        self.sequence
            .find(identity)
            .is_some_and(|e| e.is_locked(&self.oracle))
    }

    /// Identities of every locked signer
    pub fn pinned(&self) -> HashSet<Identity> {
        self.sequence
            .iter()
            .filter(|e| e.is_locked(&self.oracle))
            .map(|e| e.identity.clone())
            .collect()
    }

    /// Add a signer at the end of the list
    ///
    /// The limit reported by [`can_add`](Self::can_add) is left to the caller.
    pub fn add_signer(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        role: SignerRole,
    ) -> Identity {
        let identity = self.identities.generate();
        let entry = Entry::new(identity.clone())
            .with_contact(name, email)
            .with_role(role);
        self.sequence.append(entry);
        identity
    }

    /// Add the signed-in user as a signer
    ///
    /// Fills in the first blank movable signer when there is one, otherwise
    /// appends a new signer.
    ///
    /// # Errors
    ///
    /// [`Error::NoCurrentUser`] when no user was provided.
    pub fn add_self(&mut self) -> Result<Identity> {
        let user = self.current_user.clone().ok_or(Error::NoCurrentUser)?;

        if let Some(position) = self.sequence.first_blank(&self.oracle) {
            let identity = self.sequence.entries()[position].identity.clone();
            self.sequence.set_contact(&identity, user.name, user.email)?;
            info!(%identity, position, "Current user filled a blank signer");
            return Ok(identity);
        }

        Ok(self.add_signer(user.name, user.email, SignerRole::Signer))
    }

    /// Change the name and email of a signer
    pub fn update_contact(
        &mut self,
        identity: &Identity,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<()> {
        Ok(self.sequence.set_contact(identity, name, email)?)
    }

    /// Remove a signer who has not signed yet
    ///
    /// # Errors
    ///
    /// A rejection ([`Error::is_rejection`]) when the signer is locked; the
    /// list is left as it was.
    pub fn remove_signer(&mut self, identity: &Identity) -> Result<Entry> {
        Ok(self.sequence.remove_entry(&self.oracle, identity)?)
    }

    /// Apply a drag gesture that already happened on the drag surface
    ///
    /// The surface moved the item itself, so nothing is replayed.
    pub fn drag(&mut self, source: usize, destination: Option<usize>) -> Result<Option<Move>> {
        Ok(self
            .sequence
            .reorder_via_drag(&self.oracle, source, destination)?)
    }

    /// Apply a value typed into the order field of the signer at `position`
    ///
    /// When the signer moves and a drag surface is attached, the move is
    /// replayed onto it in the background.
    pub fn type_order(&mut self, position: usize, typed: &str) -> Result<ManualEdit> {
        let before = self.sequence.identities();
        let outcome = self
            .sequence
            .apply_manual_order(&self.oracle, position, typed)?;

        let replay = match (&outcome, &self.bridge) {
            (ManualOrder::Moved(primary), Some(bridge)) => {
                Some(bridge.replay(self.replay_plan(&before, primary)))
            }
            _ => None,
        };

        Ok(ManualEdit { outcome, replay })
    }

    fn replay_plan(&self, before: &[Identity], primary: &Move) -> ReplayPlan {
        let after = self.sequence.identities();
        match ReplayPlan::between(before, &after, primary, &self.pinned()) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(error = %err, "Could not plan replay, replaying the primary move only");
                ReplayPlan::single(primary.clone())
            }
        }
    }

    /// Build the payload handed to the submission transport
    ///
    /// # Errors
    ///
    /// [`Error::InconsistentOrder`] if the orders are not exactly `1..=N` in
    /// list order.
    pub fn submit(&self) -> Result<SigningPayload> {
        if !self.sequence.is_at_rest() {
            return Err(Error::InconsistentOrder {
                orders: self.sequence.orders(),
            });
        }

        info!(
            signers = self.sequence.len(),
            mode = %self.mode,
            "Signer list submitted"
        );
        Ok(SigningPayload {
            signing_order: self.mode,
            signers: self.sequence.iter().map(SignerRecord::from).collect(),
        })
    }
}
