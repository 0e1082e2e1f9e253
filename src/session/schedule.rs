use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};

/// Source of frame-to-frame time deltas for the render loop.
pub trait FrameScheduler {
    /// Mark the start of playback. The first delta is measured from here.
    fn start(&mut self) {}

    /// Block until the next frame slot and return the real time since the previous call.
    ///
    /// The first call returns the time since [`FrameScheduler::start`].
    fn next_delta(&mut self) -> Duration;
}

/// Paces frames at a target rate against the monotonic clock and reports actual elapsed time.
#[derive(Debug)]
pub struct RealtimeScheduler {
    interval: Duration,
    last: Instant,
}

impl RealtimeScheduler {
    /// Pace at `fps`.
    pub fn new(fps: Fps) -> Self {
        Self {
            interval: fps.frame_duration(),
            last: Instant::now(),
        }
    }
}

impl FrameScheduler for RealtimeScheduler {
    fn start(&mut self) {
        self.last = Instant::now();
    }

    fn next_delta(&mut self) -> Duration {
        let due = self.last + self.interval;
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }
        let now = Instant::now();
        let delta = now.duration_since(self.last);
        self.last = now;
        delta
    }
}

/// Returns a constant delta immediately. Used for offline renders and tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedStepScheduler {
    step: Duration,
}

impl FixedStepScheduler {
    /// Constant `step` per frame.
    pub fn new(step: Duration) -> Self {
        Self { step }
    }

    /// One output frame duration per step.
    pub fn per_frame(fps: Fps) -> Self {
        Self::new(fps.frame_duration())
    }
}

impl FrameScheduler for FixedStepScheduler {
    fn next_delta(&mut self) -> Duration {
        self.step
    }
}

/// Replays recorded deltas, then repeats `fallback`.
#[derive(Clone, Debug)]
pub struct ScriptedScheduler {
    deltas: VecDeque<Duration>,
    fallback: Duration,
}

impl ScriptedScheduler {
    /// Replay `deltas`, then continue with `fallback` forever.
    pub fn new(deltas: impl IntoIterator<Item = Duration>, fallback: Duration) -> Self {
        Self {
            deltas: deltas.into_iter().collect(),
            fallback,
        }
    }
}

impl FrameScheduler for ScriptedScheduler {
    fn next_delta(&mut self) -> Duration {
        self.deltas.pop_front().unwrap_or(self.fallback)
    }
}

/// Cloneable flag that aborts a render from any thread.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once cancellation was requested.
    pub fn check(&self) -> ReelResult<()> {
        if self.is_cancelled() {
            Err(ReelError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// What the loop does after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    /// Schedule another step.
    Continue,
    /// Stop the loop successfully.
    Finish,
}

/// Drive `step` with scheduler deltas until it finishes, fails, or `cancel` is set.
///
/// The scheduler is started first, so time spent before the loop is never charged to a frame.
/// Cancellation is checked before every step. Returns the number of steps run.
pub fn run_loop<F>(
    scheduler: &mut dyn FrameScheduler,
    cancel: &CancelToken,
    mut step: F,
) -> ReelResult<u64>
where
    F: FnMut(Duration) -> ReelResult<LoopControl>,
{
    scheduler.start();
    let mut steps = 0u64;
    loop {
        cancel.check()?;
        let delta = scheduler.next_delta();
        cancel.check()?;
        steps += 1;
        if step(delta)? == LoopControl::Finish {
            return Ok(steps);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/schedule.rs"]
mod tests;
