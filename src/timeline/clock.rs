use std::time::Duration;

use crate::foundation::error::{ReelError, ReelResult};

/// Per-entry display and cross-fade durations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Screen time of each entry.
    pub display: Duration,
    /// Length of the cross-fade at the end of each entry, `<= display`.
    pub transition: Duration,
}

impl Timing {
    /// Create validated timing.
    pub fn new(display: Duration, transition: Duration) -> ReelResult<Self> {
        if display.is_zero() {
            return Err(ReelError::validation("display duration must be > 0"));
        }
        if transition > display {
            return Err(ReelError::validation(
                "transition duration must not exceed display duration",
            ));
        }
        Ok(Self {
            display,
            transition,
        })
    }

    /// Expected montage length for `entries` segments (cross-fades overlap, they do not extend).
    pub fn total(&self, entries: usize) -> Duration {
        self.display
            .saturating_mul(u32::try_from(entries).unwrap_or(u32::MAX))
    }
}

/// Result of advancing a [`PlaybackClock`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockTick {
    /// Entry `index` is on screen; `entered` is set on the first tick that shows it.
    Showing {
        /// Current entry index.
        index: usize,
        /// Whether this tick moved onto `index`.
        entered: bool,
    },
    /// Every entry has had its full screen time.
    Exhausted,
}

/// Render-loop position: current entry plus time spent on it.
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    len: usize,
    display: Duration,
    index: usize,
    elapsed: Duration,
    started: bool,
}

impl PlaybackClock {
    /// Start a clock for `len` entries.
    pub fn new(len: usize, timing: Timing) -> Self {
        Self {
            len,
            display: timing.display,
            index: 0,
            elapsed: Duration::ZERO,
            started: false,
        }
    }

    /// Add a real elapsed delta.
    ///
    /// Whole display durations roll over to the following entries, so a long stall never drops
    /// or double-counts time.
    pub fn advance(&mut self, delta: Duration) -> ClockTick {
        if self.is_exhausted() {
            return ClockTick::Exhausted;
        }
        let mut entered = !self.started;
        self.started = true;
        self.elapsed += delta;
        while self.elapsed >= self.display {
            self.elapsed -= self.display;
            self.index += 1;
            entered = true;
        }
        if self.is_exhausted() {
            return ClockTick::Exhausted;
        }
        ClockTick::Showing {
            index: self.index,
            entered,
        }
    }

    /// Current entry index (equal to the entry count once exhausted).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Time spent on the current entry.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of entries the clock walks over.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` for a clock over zero entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return `true` once every entry has been shown.
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.len
    }
}

/// How one entry is drawn in a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerPlan {
    /// Entry index.
    pub index: usize,
    /// Ken-Burns progress in `[0, 1]`.
    pub zoom: f64,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f32,
}

/// Layers of one frame, drawn in order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePlan {
    /// Entry on screen, full opacity.
    pub current: LayerPlan,
    /// Next entry fading in over `current` during the transition window.
    pub incoming: Option<LayerPlan>,
}

/// Decide what to draw for the clock's current position.
///
/// Returns `None` once the clock is exhausted.
pub fn plan_frame(clock: &PlaybackClock, timing: &Timing) -> Option<FramePlan> {
    if clock.is_exhausted() {
        return None;
    }
    let display = timing.display.as_secs_f64();
    let elapsed = clock.elapsed().as_secs_f64();
    let current = LayerPlan {
        index: clock.index(),
        zoom: (elapsed / display).clamp(0.0, 1.0),
        opacity: 1.0,
    };

    let next = clock.index() + 1;
    let window_start = timing.display - timing.transition;
    let incoming = (!timing.transition.is_zero()
        && next < clock.len()
        && clock.elapsed() > window_start)
        .then(|| {
            let t = (clock.elapsed() - window_start).as_secs_f64()
                / timing.transition.as_secs_f64();
            LayerPlan {
                index: next,
                // The incoming entry starts its zoom only once it becomes current.
                zoom: 0.0,
                opacity: t.clamp(0.0, 1.0) as f32,
            }
        });

    Some(FramePlan { current, incoming })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clock.rs"]
mod tests;
