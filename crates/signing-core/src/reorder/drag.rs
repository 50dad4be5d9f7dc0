//! Drag-originated reorders

use tracing::debug;

use super::Move;
use super::frame::Frame;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::lock::LockOracle;
use crate::sequence::Sequence;

impl Sequence {
    /// Apply a drag of the entry at `source` onto list position `destination`
    ///
    /// `destination` is the position the user dropped onto, or `None` when
    /// the drop landed outside every target. Locked entries are obstacles:
    /// when the destination holds one, the insertion point slides forward
    /// past it (and past any locked entries that follow). A slide that runs
    /// off the end settles on the last free slot.
    ///
    /// Returns the resulting move, or `None` when nothing changed.
    ///
    /// # Errors
    ///
    /// [`Error::PositionOutOfRange`] for a bad `source`, and
    /// [`Error::LockedEntry`] when the dragged entry is locked. The sequence
    /// is unchanged in both cases.
    pub fn reorder_via_drag<O: LockOracle + ?Sized>(
        &mut self,
        oracle: &O,
        source: usize,
        destination: Option<usize>,
    ) -> Result<Option<Move>> {
        let len = self.entries.len();
        let dragged = self
            .entries
            .get(source)
            .ok_or(Error::PositionOutOfRange {
                position: source,
                len,
            })?;

        if dragged.is_locked(oracle) {
            return Err(Error::LockedEntry {
                identity: dragged.identity.clone(),
            });
        }

        let Some(destination) = destination else {
            debug!(source, "Drop outside any target, ignoring");
            return Ok(None);
        };

        let identity = dragged.identity.clone();
        let target = resolve_drop_slot(&self.entries, oracle, source, destination);
        if target == source {
            debug!(source, destination, "Drag resolved onto its own slot");
            return Ok(None);
        }

        let mut frame = Frame::split(std::mem::take(&mut self.entries), oracle);
        let from_rank = frame.rank_of(source);
        let to_rank = frame.rank_of(target);
        let moved = frame.movable.remove(from_rank);
        frame.movable.insert(to_rank, moved);
        self.entries = frame.assemble();

        debug!(%identity, source, destination, target, "Drag applied");
        Ok(Some(Move::new(identity, source, target)))
    }
}

/// Final position for an entry dropped onto `destination`
fn resolve_drop_slot<O: LockOracle + ?Sized>(
    entries: &[Entry],
    oracle: &O,
    source: usize,
    destination: usize,
) -> usize {
    let len = entries.len();
    let mut candidate = destination.min(len.saturating_sub(1));
    while candidate < len && entries[candidate].is_locked(oracle) {
        candidate += 1;
    }
    if candidate < len {
        return candidate;
    }
    (0..len)
        .rev()
        .find(|&position| !entries[position].is_locked(oracle))
        .unwrap_or(source)
}
