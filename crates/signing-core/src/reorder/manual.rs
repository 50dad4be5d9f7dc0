//! Typed signing-order edits
//!
//! The order field of each entry is editable. A typed number N asks for the
//! entry to become the N-th signer: the entry takes order N and the movable
//! entries it passes shift by one to make room.

use tracing::debug;

use super::Move;
use super::frame::Frame;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::lock::LockOracle;
use crate::sequence::{Sequence, order_at};

/// What became of a typed order value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualOrder {
    /// The field is blank; wait for more input
    Pending,
    /// The input was not a usable order; show `display` in the field again
    Reverted { display: String },
    /// The entry already holds the typed place
    Unchanged,
    /// The entry moved; the drag surface still has to catch up
    Moved(Move),
}

impl Sequence {
    /// Apply a value typed into the order field of the entry at `position`
    ///
    /// Blank input is pending. Input that is not a whole number between 1 and
    /// the number of entries reverts the field to `position + 1`. Otherwise
    /// the entry is moved to the typed place, shifting the movable entries in
    /// between; locked entries keep their position and order, so an entry
    /// typed onto a locked place settles on the nearest free slot on its way.
    ///
    /// # Errors
    ///
    /// [`Error::PositionOutOfRange`] for a bad `position`, and
    /// [`Error::LockedEntry`] when the entry itself is locked.
    pub fn apply_manual_order<O: LockOracle + ?Sized>(
        &mut self,
        oracle: &O,
        position: usize,
        typed: &str,
    ) -> Result<ManualOrder> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get(position)
            .ok_or(Error::PositionOutOfRange { position, len })?;

        let typed = typed.trim();
        if typed.is_empty() {
            return Ok(ManualOrder::Pending);
        }

        if entry.is_locked(oracle) {
            return Err(Error::LockedEntry {
                identity: entry.identity.clone(),
            });
        }

        // ASCII digits only, no sign
        let place = typed
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| typed.parse::<usize>().ok())
            .flatten();
        let target = match place {
            Some(place) if (1..=len).contains(&place) => place - 1,
            _ => {
                debug!(position, typed, "Rejected typed order");
                return Ok(ManualOrder::Reverted {
                    display: order_at(position).to_string(),
                });
            }
        };

        if target == position {
            return Ok(ManualOrder::Unchanged);
        }

        let identity = entry.identity.clone();
        shift_orders(&mut self.entries, oracle, position, target);
        self.settle(oracle);

        let landed = self.position_of(&identity).unwrap_or(position);
        if landed == position {
            debug!(%identity, position, target, "Typed order blocked by locked signers");
            return Ok(ManualOrder::Unchanged);
        }

        debug!(%identity, position, target, landed, "Typed order applied");
        Ok(ManualOrder::Moved(Move::new(identity, position, landed)))
    }

    /// Lay movable entries out by their (possibly shifted) order values
    fn settle<O: LockOracle + ?Sized>(&mut self, oracle: &O) {
        let mut frame = Frame::split(std::mem::take(&mut self.entries), oracle);
        frame.movable.sort_by_key(|e| e.order);
        self.entries = frame.assemble();
    }
}

/// Assign the moved entry its typed order and shift the movable entries it
/// passes by one. List positions are not touched.
fn shift_orders<O: LockOracle + ?Sized>(
    entries: &mut [Entry],
    oracle: &O,
    from: usize,
    to: usize,
) {
    if to < from {
        for entry in &mut entries[to..from] {
            if !entry.is_locked(oracle) {
                entry.order = entry.order.saturating_add(1);
            }
        }
    } else {
        for entry in &mut entries[from + 1..=to] {
            if !entry.is_locked(oracle) {
                entry.order = entry.order.saturating_sub(1).max(1);
            }
        }
    }
    entries[from].order = order_at(to);
}
