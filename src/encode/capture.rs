use std::time::Duration;

use crate::encode::sink::CaptureSink;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::ReelResult;
use crate::render::frame::FrameRGBA;

/// Maps variable-rate drawn frames onto fixed-rate output slots.
///
/// Each drawn frame fills every not-yet-emitted slot that has started by the time it was drawn,
/// so scheduler jitter changes slot coverage but never drops or repeats a drawn frame's order.
#[derive(Clone, Copy, Debug)]
pub struct FrameCapture {
    fps: Fps,
    emitted: u64,
}

impl FrameCapture {
    /// Start sampling at slot 0.
    pub fn new(fps: Fps) -> Self {
        Self { fps, emitted: 0 }
    }

    /// Output slots emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// After a draw at cumulative time `t`, emit `frame` into every pending slot starting `<= t`.
    pub fn emit_through(
        &mut self,
        t: Duration,
        frame: &FrameRGBA,
        sink: &mut dyn CaptureSink,
    ) -> ReelResult<u64> {
        self.emit_until(self.fps.slots_until(t, true), frame, sink)
    }

    /// At the end time `t_end`, emit `frame` into every pending slot starting `< t_end`.
    pub fn finish_at(
        &mut self,
        t_end: Duration,
        frame: &FrameRGBA,
        sink: &mut dyn CaptureSink,
    ) -> ReelResult<u64> {
        self.emit_until(self.fps.slots_until(t_end, false), frame, sink)
    }

    fn emit_until(
        &mut self,
        target: u64,
        frame: &FrameRGBA,
        sink: &mut dyn CaptureSink,
    ) -> ReelResult<u64> {
        let start = self.emitted;
        while self.emitted < target {
            sink.push_frame(FrameIndex(self.emitted), frame)?;
            self.emitted += 1;
        }
        Ok(self.emitted - start)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/capture.rs"]
mod tests;
