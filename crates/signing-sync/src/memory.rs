//! In-memory drag surface
//!
//! Headless stand-in for the interactive list: keeps the item order, honours
//! the single interaction lock and records every primitive it receives.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use signing_core::Identity;
use tracing::trace;

use crate::error::{Error, Result};
use crate::surface::{DragSurface, StepDirection, SurfaceLock};

/// A primitive received by a [`MemorySurface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    Lift(Identity),
    Step(StepDirection),
    Drop,
    Release,
    Cancel,
}

#[derive(Debug, Default)]
struct SurfaceState {
    items: Vec<Identity>,
    pinned: HashSet<Identity>,
    held: bool,
    journal: Vec<Primitive>,
}

/// Shared, cloneable in-memory drag surface
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl MemorySurface {
    pub fn new(items: impl IntoIterator<Item = Identity>) -> Self {
        let surface = Self::default();
        surface.reset(items);
        surface
    }

    /// Replace the item list, as a full re-render would
    pub fn reset(&self, items: impl IntoIterator<Item = Identity>) {
        self.state().items = items.into_iter().collect();
    }

    /// Mark `identity` as not draggable
    pub fn pin(&self, identity: Identity) {
        self.state().pinned.insert(identity);
    }

    pub fn items(&self) -> Vec<Identity> {
        self.state().items.clone()
    }

    pub fn journal(&self) -> Vec<Primitive> {
        self.state().journal.clone()
    }

    /// Whether a gesture currently holds the surface
    pub fn is_held(&self) -> bool {
        self.state().held
    }

    fn state(&self) -> MutexGuard<'_, SurfaceState> {
        lock_state(&self.state)
    }
}

fn lock_state(state: &Mutex<SurfaceState>) -> MutexGuard<'_, SurfaceState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DragSurface for MemorySurface {
    fn try_lock(&self, draggable: &Identity) -> Option<Box<dyn SurfaceLock>> {
        let mut state = self.state();
        if state.held || state.pinned.contains(draggable) || !state.items.contains(draggable) {
            return None;
        }
        state.held = true;
        Some(Box::new(MemoryLock {
            state: Arc::clone(&self.state),
            identity: draggable.clone(),
            origin: None,
            released: false,
        }))
    }
}

struct MemoryLock {
    state: Arc<Mutex<SurfaceState>>,
    identity: Identity,
    origin: Option<usize>,
    released: bool,
}

impl MemoryLock {
    fn position(&self, state: &SurfaceState) -> Result<usize> {
        state
            .items
            .iter()
            .position(|item| item == &self.identity)
            .ok_or_else(|| Error::SurfaceRejected {
                primitive: "step".to_string(),
                reason: format!("{} is no longer on the surface", self.identity),
            })
    }

    fn finish(&mut self, last: Primitive) {
        if self.released {
            return;
        }
        let mut state = lock_state(&self.state);
        state.journal.push(last);
        state.held = false;
        self.released = true;
    }
}

#[async_trait]
impl SurfaceLock for MemoryLock {
    async fn lift(&mut self) -> Result<()> {
        let mut state = lock_state(&self.state);
        let position = self.position(&state)?;
        self.origin = Some(position);
        state.journal.push(Primitive::Lift(self.identity.clone()));
        trace!(identity = %self.identity, position, "Lifted");
        Ok(())
    }

    async fn step(&mut self, direction: StepDirection) -> Result<()> {
        let mut state = lock_state(&self.state);
        let position = self.position(&state)?;
        let neighbour = match direction {
            StepDirection::Up => position.checked_sub(1),
            StepDirection::Down => Some(position + 1).filter(|&p| p < state.items.len()),
        };
        let Some(neighbour) = neighbour else {
            return Err(Error::StepOutOfBounds {
                identity: self.identity.clone(),
                direction,
                position,
            });
        };
        state.items.swap(position, neighbour);
        state.journal.push(Primitive::Step(direction));
        Ok(())
    }

    async fn drop_item(&mut self) -> Result<()> {
        lock_state(&self.state).journal.push(Primitive::Drop);
        Ok(())
    }

    fn release(mut self: Box<Self>) {
        self.finish(Primitive::Release);
    }

    fn cancel(mut self: Box<Self>) {
        if let Some(origin) = self.origin {
            let mut state = lock_state(&self.state);
            if let Ok(position) = self.position(&state) {
                let item = state.items.remove(position);
                let origin = origin.min(state.items.len());
                state.items.insert(origin, item);
            }
        }
        self.finish(Primitive::Cancel);
    }
}

impl Drop for MemoryLock {
    fn drop(&mut self) {
        self.finish(Primitive::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(names: &[&str]) -> Vec<Identity> {
        names.iter().map(|n| Identity::new(*n)).collect()
    }

    #[test]
    fn only_one_lock_at_a_time() {
        let surface = MemorySurface::new(ids(&["a", "b"]));

        let held = surface.try_lock(&Identity::new("a"));
        assert!(held.is_some());
        assert!(surface.is_held());
        assert!(surface.try_lock(&Identity::new("b")).is_none());

        drop(held);
        assert!(!surface.is_held());
        assert!(surface.try_lock(&Identity::new("b")).is_some());
    }

    #[test]
    fn pinned_and_unknown_items_cannot_be_locked() {
        let surface = MemorySurface::new(ids(&["a", "b"]));
        surface.pin(Identity::new("b"));

        assert!(surface.try_lock(&Identity::new("b")).is_none());
        assert!(surface.try_lock(&Identity::new("zz")).is_none());
    }

    #[tokio::test]
    async fn steps_move_the_item() {
        let surface = MemorySurface::new(ids(&["a", "b", "c"]));
        let mut lock = surface.try_lock(&Identity::new("c")).unwrap();

        lock.lift().await.unwrap();
        lock.step(StepDirection::Up).await.unwrap();
        lock.step(StepDirection::Up).await.unwrap();
        lock.drop_item().await.unwrap();
        lock.release();

        assert_eq!(surface.items(), ids(&["c", "a", "b"]));
        assert_eq!(
            surface.journal(),
            vec![
                Primitive::Lift(Identity::new("c")),
                Primitive::Step(StepDirection::Up),
                Primitive::Step(StepDirection::Up),
                Primitive::Drop,
                Primitive::Release,
            ]
        );
    }

    #[tokio::test]
    async fn step_past_the_edge_fails() {
        let surface = MemorySurface::new(ids(&["a", "b"]));
        let mut lock = surface.try_lock(&Identity::new("a")).unwrap();

        lock.lift().await.unwrap();
        let result = lock.step(StepDirection::Up).await;

        assert!(matches!(result, Err(Error::StepOutOfBounds { .. })));
    }

    #[tokio::test]
    async fn cancel_returns_item_to_origin() {
        let surface = MemorySurface::new(ids(&["a", "b", "c"]));
        let mut lock = surface.try_lock(&Identity::new("a")).unwrap();

        lock.lift().await.unwrap();
        lock.step(StepDirection::Down).await.unwrap();
        lock.cancel();

        assert_eq!(surface.items(), ids(&["a", "b", "c"]));
        assert!(!surface.is_held());
        assert_eq!(surface.journal().last(), Some(&Primitive::Cancel));
    }
}
