//! Reorder engine
//!
//! Both reorder channels, dragging and typing a target number, end the same
//! way: locked entries stay pinned to their list positions and the movable
//! entries are laid out, in their new relative order, over the remaining
//! free slots. Each movable entry then takes order `position + 1`.

mod drag;
mod frame;
mod manual;

use serde::{Deserialize, Serialize};

use crate::entry::Identity;

pub use manual::ManualOrder;

/// A completed reorder of one entry, in list positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The entry that moved
    pub identity: Identity,
    /// Position before the move
    pub from: usize,
    /// Position after the move
    pub to: usize,
}

impl Move {
    pub fn new(identity: Identity, from: usize, to: usize) -> Self {
        Self { identity, from, to }
    }

    /// Number of one-position steps the move spans
    pub fn distance(&self) -> usize {
        self.from.abs_diff(self.to)
    }
}
