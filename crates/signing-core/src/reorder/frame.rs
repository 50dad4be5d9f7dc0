//! Split of a sequence into pinned and free slots

use crate::entry::Entry;
use crate::lock::LockOracle;
use crate::sequence::order_at;

/// Locked entries held at their positions, movable entries lifted out
///
/// `slots[p]` holds the locked entry at position `p`, or `None` for a free
/// slot. `movable` lists the lifted entries in their current relative order;
/// its length always equals the number of free slots.
pub(crate) struct Frame {
    slots: Vec<Option<Entry>>,
    pub(crate) movable: Vec<Entry>,
}

impl Frame {
    pub(crate) fn split<O: LockOracle + ?Sized>(entries: Vec<Entry>, oracle: &O) -> Self {
        let mut slots = Vec::with_capacity(entries.len());
        let mut movable = Vec::new();
        for entry in entries {
            if entry.is_locked(oracle) {
                slots.push(Some(entry));
            } else {
                slots.push(None);
                movable.push(entry);
            }
        }
        Self { slots, movable }
    }

    /// Index into `movable` of the free slot at `position`
    pub(crate) fn rank_of(&self, position: usize) -> usize {
        self.slots[..position.min(self.slots.len())]
            .iter()
            .filter(|slot| slot.is_none())
            .count()
    }

    /// Lay the movable entries over the free slots and renumber them
    pub(crate) fn assemble(self) -> Vec<Entry> {
        let mut movable = self.movable.into_iter();
        let mut entries = Vec::with_capacity(self.slots.len());
        for (position, slot) in self.slots.into_iter().enumerate() {
            match slot {
                Some(locked) => entries.push(locked),
                None => {
                    if let Some(mut entry) = movable.next() {
                        entry.order = order_at(position);
                        entries.push(entry);
                    }
                }
            }
        }
        entries
    }
}
