//! The ordered signer list
//!
//! A [`Sequence`] owns every entry of a signing form. At rest the entry at
//! list position `p` carries order `p + 1`, which gives the two invariants
//! callers rely on:
//!
//! - order values are exactly `1..=N`, each used once
//! - walking the list by position yields non-decreasing orders
//!
//! Locked entries keep their position and order through every operation
//! except [`Sequence::remove_entry`], which renumbers the whole list.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::entry::{Entry, Identity};
use crate::error::{Error, Result};
use crate::lock::LockOracle;

/// Order value of the entry at list position `position`
pub(crate) fn order_at(position: usize) -> u32 {
    u32::try_from(position)
        .map(|p| p.saturating_add(1))
        .unwrap_or(u32::MAX)
}

/// Ordered list of signer entries
///
/// Deserialized sequences go through [`Sequence::from_entries`], so stored
/// orders are normalized on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredSequence")]
pub struct Sequence {
    pub(crate) entries: Vec<Entry>,
}

#[derive(Deserialize)]
struct StoredSequence {
    entries: Vec<Entry>,
}

impl From<StoredSequence> for Sequence {
    fn from(stored: StoredSequence) -> Self {
        Self::from_entries(stored.entries)
    }
}

impl Sequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sequence from previously stored entries
    ///
    /// Entries are sorted by their stored order (ties keep the given
    /// position) and renumbered so the result is at rest.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut sequence = Self { entries };
        sequence.normalize();
        sequence
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn position_of(&self, identity: &Identity) -> Option<usize> {
        self.entries.iter().position(|e| &e.identity == identity)
    }

    pub fn find(&self, identity: &Identity) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.identity == identity)
    }

    /// Identities in list order
    pub fn identities(&self) -> Vec<Identity> {
        self.entries.iter().map(|e| e.identity.clone()).collect()
    }

    /// Order values in list order
    pub fn orders(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.order).collect()
    }

    /// Highest order value in use, 0 when empty
    pub fn max_order(&self) -> u32 {
        self.entries.iter().map(|e| e.order).max().unwrap_or(0)
    }

    /// Position of the first blank entry that is still movable
    pub fn first_blank<O: LockOracle + ?Sized>(&self, oracle: &O) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.is_blank() && !e.is_locked(oracle))
    }

    /// Append `entry` with the next free order value
    ///
    /// Existing entries are not renumbered. Returns the assigned order.
    pub fn append(&mut self, mut entry: Entry) -> u32 {
        entry.order = self.max_order().saturating_add(1);
        info!(identity = %entry.identity, order = entry.order, "Signer added");
        let order = entry.order;
        self.entries.push(entry);
        order
    }

    /// Update name and email of an entry in place
    pub fn set_contact(
        &mut self,
        identity: &Identity,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| &e.identity == identity)
            .ok_or_else(|| Error::EntryNotFound {
                identity: identity.clone(),
            })?;
        entry.name = name.into();
        entry.email = email.into();
        Ok(())
    }

    /// Remove an unlocked entry and renumber the remainder
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockedEntry`] without touching the sequence when the
    /// entry is locked, and [`Error::EntryNotFound`] for unknown identities.
    pub fn remove_entry<O: LockOracle + ?Sized>(
        &mut self,
        oracle: &O,
        identity: &Identity,
    ) -> Result<Entry> {
        let position = self
            .position_of(identity)
            .ok_or_else(|| Error::EntryNotFound {
                identity: identity.clone(),
            })?;

        if self.entries[position].is_locked(oracle) {
            warn!(%identity, "Refusing to remove a signer who already signed");
            return Err(Error::LockedEntry {
                identity: identity.clone(),
            });
        }

        let removed = self.entries.remove(position);
        self.normalize();
        info!(%identity, position, remaining = self.entries.len(), "Signer removed");
        Ok(removed)
    }

    /// Renumber every entry to a contiguous `1..=N`
    ///
    /// Entries are stably sorted by their current order first. Locked entries
    /// are renumbered too, so a gap left by a removal closes.
    pub fn normalize(&mut self) {
        self.entries.sort_by_key(|e| e.order);
        for (position, entry) in self.entries.iter_mut().enumerate() {
            entry.order = order_at(position);
        }
        debug!(len = self.entries.len(), "Sequence normalized");
    }

    /// Order values are exactly `1..=N`, each used once
    pub fn is_contiguous(&self) -> bool {
        let mut orders = self.orders();
        orders.sort_unstable();
        orders
            .iter()
            .enumerate()
            .all(|(position, &order)| order == order_at(position))
    }

    /// Movable entries appear in non-decreasing order by list position
    pub fn is_consistent<O: LockOracle + ?Sized>(&self, oracle: &O) -> bool {
        let movable: Vec<u32> = self
            .entries
            .iter()
            .filter(|e| !e.is_locked(oracle))
            .map(|e| e.order)
            .collect();
        movable.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Every entry carries order `position + 1`
    pub fn is_at_rest(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(position, e)| e.order == order_at(position))
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
