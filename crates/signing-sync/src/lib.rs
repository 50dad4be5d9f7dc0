//! Drag-surface replay for signing-order changes
//!
//! The interactive drag surface that renders the signer list keeps its own
//! idea of item positions. When the order changes through a typed number
//! instead of a drag gesture, this crate replays the change onto the surface
//! as a series of one-step moves, the same primitives a keyboard drag would
//! produce, so both views agree again.
//!
//! Replays are fire-and-forget: [`ReplayBridge::replay`] acquires the
//! surface's interaction lock synchronously and then runs the steps on the
//! tokio runtime. When the surface is busy the replay is skipped; the
//! signing order itself is already final.

pub mod bridge;
pub mod error;
pub mod memory;
pub mod plan;
pub mod surface;

pub use bridge::{ReplayBridge, ReplayReport, ReplayTicket, ReplayTiming, SkipReason};
pub use error::{Error, Result};
pub use memory::{MemorySurface, Primitive};
pub use plan::{ReplayPlan, steps_for};
pub use surface::{DragSurface, StepDirection, SurfaceLock};
