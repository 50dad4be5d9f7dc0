//! Drag surface traits
//!
//! A drag surface is treated as a remote replica of the signer list. It is
//! never mutated directly; the only way in is to take the interaction lock
//! for one item and drive it with lift / step / drop primitives.

use std::fmt;

use async_trait::async_trait;
use signing_core::Identity;

use crate::Result;

/// One-position move of the lifted item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    /// Toward the start of the list
    Up,
    /// Toward the end of the list
    Down,
}

impl fmt::Display for StepDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepDirection::Up => write!(f, "up"),
            StepDirection::Down => write!(f, "down"),
        }
    }
}

/// An interactive list that supports programmatic drags
pub trait DragSurface: Send + Sync {
    /// Take the exclusive interaction lock for `draggable`
    ///
    /// Returns `None` when another gesture holds the surface or the item
    /// cannot be dragged. Must not block.
    fn try_lock(&self, draggable: &Identity) -> Option<Box<dyn SurfaceLock>>;
}

/// Exclusive hold on a drag surface for one item
#[async_trait]
pub trait SurfaceLock: Send {
    /// Pick the item up
    async fn lift(&mut self) -> Result<()>;

    /// Move the lifted item one position
    async fn step(&mut self, direction: StepDirection) -> Result<()>;

    /// Put the item down at its current position
    async fn drop_item(&mut self) -> Result<()>;

    /// Give the surface back after a completed drop
    fn release(self: Box<Self>);

    /// Abandon the gesture, returning the item to where it was lifted
    fn cancel(self: Box<Self>);
}
