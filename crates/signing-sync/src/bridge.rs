//! Fire-and-forget replay of reorders onto a drag surface

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use signing_core::Move;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::Result;
use crate::plan::{ReplayPlan, steps_for};
use crate::surface::{DragSurface, SurfaceLock};

/// Pause between the last step and the drop, by default
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Delays the surface expects between primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayTiming {
    /// Pause between consecutive steps
    pub step_delay: Duration,
    /// Pause after the last step, before the drop
    pub settle_delay: Duration,
}

impl Default for ReplayTiming {
    fn default() -> Self {
        Self {
            step_delay: Duration::ZERO,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// Why a replay never started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The plan holds no moves
    NothingToReplay,
    /// Another gesture holds the surface, or the item is not draggable
    SurfaceBusy,
    /// No tokio runtime to run the replay on
    NoRuntime,
}

/// Outcome of a finished replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub moves_planned: usize,
    pub moves_completed: usize,
    pub steps: usize,
}

impl ReplayReport {
    pub fn is_complete(&self) -> bool {
        self.moves_completed == self.moves_planned
    }
}

/// Handle to a replay the caller may ignore or await
#[derive(Debug)]
pub enum ReplayTicket {
    Scheduled(JoinHandle<ReplayReport>),
    Skipped(SkipReason),
}

impl ReplayTicket {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, ReplayTicket::Scheduled(_))
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            ReplayTicket::Skipped(reason) => Some(*reason),
            ReplayTicket::Scheduled(_) => None,
        }
    }

    /// Wait for the replay to finish; `None` if it was skipped
    pub async fn finished(self) -> Result<Option<ReplayReport>> {
        match self {
            ReplayTicket::Scheduled(handle) => Ok(Some(handle.await?)),
            ReplayTicket::Skipped(_) => Ok(None),
        }
    }
}

/// Replays reorders onto a [`DragSurface`]
#[derive(Clone)]
pub struct ReplayBridge {
    surface: Arc<dyn DragSurface>,
    timing: ReplayTiming,
}

impl fmt::Debug for ReplayBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplayBridge")
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}

impl ReplayBridge {
    pub fn new(surface: Arc<dyn DragSurface>) -> Self {
        Self {
            surface,
            timing: ReplayTiming::default(),
        }
    }

    pub fn with_timing(mut self, timing: ReplayTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn timing(&self) -> ReplayTiming {
        self.timing
    }

    /// Start replaying `plan` without waiting for it
    ///
    /// The interaction lock for the first move is taken before this returns,
    /// so a second replay issued while one is running is skipped rather than
    /// queued. Later moves of the same plan take the lock in turn; if the
    /// surface is taken in between, the rest of the plan is dropped.
    pub fn replay(&self, plan: ReplayPlan) -> ReplayTicket {
        let Some(first) = plan.moves().first() else {
            return ReplayTicket::Skipped(SkipReason::NothingToReplay);
        };

        let Ok(runtime) = Handle::try_current() else {
            debug!(identity = %first.identity, "No runtime for replay, skipping");
            return ReplayTicket::Skipped(SkipReason::NoRuntime);
        };

        let Some(lock) = self.surface.try_lock(&first.identity) else {
            debug!(identity = %first.identity, "Drag surface busy, skipping replay");
            return ReplayTicket::Skipped(SkipReason::SurfaceBusy);
        };

        debug!(
            moves = plan.len(),
            steps = plan.total_steps(),
            "Replaying reorder onto drag surface"
        );
        let surface = Arc::clone(&self.surface);
        ReplayTicket::Scheduled(runtime.spawn(run_plan(surface, lock, plan, self.timing)))
    }

    /// Replay a single move
    pub fn replay_move(&self, primary: Move) -> ReplayTicket {
        self.replay(ReplayPlan::single(primary))
    }
}

async fn run_plan(
    surface: Arc<dyn DragSurface>,
    first_lock: Box<dyn SurfaceLock>,
    plan: ReplayPlan,
    timing: ReplayTiming,
) -> ReplayReport {
    let mut report = ReplayReport {
        moves_planned: plan.len(),
        moves_completed: 0,
        steps: 0,
    };

    let mut pending = Some(first_lock);
    for mv in plan.moves() {
        let lock = match pending.take() {
            Some(lock) => lock,
            None => match surface.try_lock(&mv.identity) {
                Some(lock) => lock,
                None => {
                    debug!(identity = %mv.identity, "Drag surface taken mid-replay, stopping");
                    break;
                }
            },
        };

        match perform(lock, mv, timing).await {
            Ok(steps) => {
                report.moves_completed += 1;
                report.steps += steps;
            }
            Err(err) => {
                warn!(identity = %mv.identity, error = %err, "Replay aborted");
                break;
            }
        }
    }

    report
}

async fn perform(
    mut lock: Box<dyn SurfaceLock>,
    mv: &Move,
    timing: ReplayTiming,
) -> Result<usize> {
    match drive(lock.as_mut(), mv, timing).await {
        Ok(steps) => {
            lock.release();
            Ok(steps)
        }
        Err(err) => {
            lock.cancel();
            Err(err)
        }
    }
}

async fn drive(lock: &mut dyn SurfaceLock, mv: &Move, timing: ReplayTiming) -> Result<usize> {
    let steps = steps_for(mv);
    lock.lift().await?;
    for (index, direction) in steps.iter().enumerate() {
        if index > 0 && !timing.step_delay.is_zero() {
            tokio::time::sleep(timing.step_delay).await;
        }
        lock.step(*direction).await?;
    }
    tokio::time::sleep(timing.settle_delay).await;
    lock.drop_item().await?;
    Ok(steps.len())
}
