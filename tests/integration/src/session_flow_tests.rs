//! End-to-end signer sessions
//!
//! A form, its lock oracle and a drag surface are wired together the way a
//! host application does it: drags and list edits re-render the surface,
//! typed orders are replayed onto it.

use chrono::Utc;
use pretty_assertions::assert_eq;
use signing_core::{Identity, ManualOrder, NativeId, SignerRole, SignerStatus, SignerStatusBook};
use signing_form::{CurrentUser, FormConfig, SignerForm, SigningMode};
use signing_sync::MemorySurface;
use signing_test_utils::{SequentialIds, identities, layout, lineup, names};
use std::collections::HashSet;
use std::sync::Arc;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Status book in which every id of `locked` has signed
fn signed_book(locked: &HashSet<NativeId>) -> SignerStatusBook {
    let mut book = SignerStatusBook::new();
    for id in locked {
        book.insert(
            *id,
            SignerStatus {
                signed_at: Some(Utc::now()),
                placed_fields: vec!["signature".to_string()],
            },
        );
    }
    book
}

struct Session {
    form: SignerForm,
    surface: MemorySurface,
}

impl Session {
    fn start(spec: &str) -> Self {
        let fixture = lineup(spec);
        let surface = fixture.surface();
        let config = FormConfig::from_toml_str("[replay]\nsettle_delay_ms = 0\n").unwrap();
        let form = SignerForm::new(&config, Arc::new(signed_book(&fixture.locked)))
            .with_sequence(fixture.sequence)
            .with_identities(Arc::new(SequentialIds::new()))
            .with_current_user(CurrentUser::new("Me", "me@example.com"))
            .with_drag_surface(Arc::new(surface.clone()));
        Self { form, surface }
    }

    fn rerender(&self) {
        self.surface.reset(self.form.sequence().identities());
    }

    async fn type_order(&mut self, position: usize, typed: &str) -> ManualOrder {
        let edit = self.form.type_order(position, typed).unwrap();
        if let Some(ticket) = edit.replay {
            ticket.finished().await.unwrap();
        }
        edit.outcome
    }

    fn assert_converged(&self) {
        assert_eq!(self.surface.items(), self.form.sequence().identities());
        assert!(!self.surface.is_held());
    }
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn test_owner_reshuffles_around_signed_signers() {
    let mut session = Session::start("ann bo* cy dee* eve");

    // Eve should sign first.
    let outcome = session.type_order(4, "1").await;
    assert!(matches!(outcome, ManualOrder::Moved(_)));
    session.assert_converged();
    assert_eq!(
        layout(session.form.sequence()),
        vec![("eve", 1), ("bo", 2), ("ann", 3), ("dee", 4), ("cy", 5)]
    );

    // Drag Cy onto Bo's slot; it settles on the next free slot instead.
    session.form.drag(4, Some(1)).unwrap();
    session.rerender();
    assert_eq!(
        names(session.form.sequence()),
        vec!["eve", "bo", "cy", "dee", "ann"]
    );

    // A typo is reverted and nothing moves.
    let outcome = session.type_order(2, "7").await;
    assert_eq!(
        outcome,
        ManualOrder::Reverted {
            display: "3".to_string()
        }
    );
    session.assert_converged();
}

#[tokio::test]
async fn test_owner_adds_and_removes_signers() {
    let mut session = Session::start("ann bo*");

    let me = session.form.add_self().unwrap();
    let extra = session
        .form
        .add_signer("Fay", "fay@example.com", SignerRole::Viewer);
    session.rerender();
    assert_eq!(names(session.form.sequence()), vec!["ann", "bo", "new-1", "new-2"]);
    assert_eq!(me, Identity::new("new-1"));

    // Fay moves to the front, past signed Bo.
    session.type_order(3, "1").await;
    session.assert_converged();
    assert_eq!(names(session.form.sequence()), vec!["new-2", "bo", "ann", "new-1"]);

    // Bo has signed and stays; Ann goes.
    assert!(session.form.remove_signer(&Identity::new("bo")).unwrap_err().is_rejection());
    session.form.remove_signer(&Identity::new("ann")).unwrap();
    session.rerender();

    let payload = session.form.submit().unwrap();
    let submitted: Vec<(&str, u32)> = payload
        .signers
        .iter()
        .map(|s| (s.identity.as_str(), s.signing_order))
        .collect();
    assert_eq!(submitted, vec![("new-2", 1), ("bo", 2), ("new-1", 3)]);
    assert_eq!(payload.signers[0].identity, extra);
}

#[tokio::test]
async fn test_mode_switch_does_not_touch_the_surface() {
    let mut session = Session::start("ann bo cy");

    session.form.set_mode(SigningMode::Sequential);
    session.type_order(0, "2").await;
    session.form.set_mode(SigningMode::Parallel);

    session.assert_converged();
    assert_eq!(session.surface.items(), identities(&["bo", "ann", "cy"]));
    assert_eq!(session.form.submit().unwrap().signing_order, SigningMode::Parallel);
}
