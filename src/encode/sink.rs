use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::Fnv1a64;
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`CaptureSink`] when capture starts.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Straight-alpha RGBA color used to flatten transparent pixels.
    pub background: [u8; 4],
}

/// Consumer of captured canvas frames that produces an encoded container.
///
/// Lifecycle: `start`, any number of `push_frame` calls in strictly increasing index order, then
/// exactly one of `stop` or `abort`.
pub trait CaptureSink: Send {
    /// Called once before any frame is pushed.
    fn start(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Push one output frame slot.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()>;
    /// Finish encoding and hand over the encoded chunks in order.
    fn stop(&mut self) -> ReelResult<Vec<Vec<u8>>>;
    /// Tear down without producing output. Must be safe to call in any state.
    fn abort(&mut self);
    /// MIME type of the produced container.
    fn mime_type(&self) -> &str;
}

/// MIME type reported by [`InMemorySink`].
pub const DIGEST_MIME_TYPE: &str = "application/x-timereel-frame-digests";

/// In-memory sink for tests and debugging.
///
/// Records an FNV-1a digest of every frame and emits each digest as an 8-byte little-endian
/// chunk.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    digests: Vec<(FrameIndex, u64)>,
    silent: bool,
    fail_at: Option<u64>,
    started: bool,
    stopped: bool,
    aborted: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose `stop` returns no chunks.
    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Self::default()
        }
    }

    /// A sink that fails when frame `idx` is pushed.
    pub fn failing_at(idx: u64) -> Self {
        Self {
            fail_at: Some(idx),
            ..Self::default()
        }
    }

    /// Return the sink configuration captured in `start`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Frame digests in push order.
    pub fn digests(&self) -> &[(FrameIndex, u64)] {
        &self.digests
    }

    /// Whether `start` was called.
    pub fn was_started(&self) -> bool {
        self.started
    }

    /// Whether `stop` completed.
    pub fn was_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether `abort` was called.
    pub fn was_aborted(&self) -> bool {
        self.aborted
    }
}

/// FNV-1a digest of a frame's size and pixels.
pub fn frame_digest(frame: &FrameRGBA) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(u64::from(frame.width));
    h.write_u64(u64::from(frame.height));
    h.write_bytes(&frame.data);
    h.finish()
}

impl CaptureSink for InMemorySink {
    fn start(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.digests.clear();
        self.started = true;
        self.stopped = false;
        self.aborted = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        if self.cfg.is_none() {
            return Err(ReelError::pipeline_msg("in-memory sink not started"));
        }
        if let Some((last, _)) = self.digests.last()
            && idx.0 <= last.0
        {
            return Err(ReelError::pipeline_msg(
                "in-memory sink received out-of-order frame index",
            ));
        }
        if self.fail_at == Some(idx.0) {
            return Err(ReelError::pipeline_msg(format!(
                "in-memory sink configured to fail at frame {}",
                idx.0
            )));
        }
        self.digests.push((idx, frame_digest(frame)));
        Ok(())
    }

    fn stop(&mut self) -> ReelResult<Vec<Vec<u8>>> {
        if self.cfg.take().is_none() {
            return Err(ReelError::pipeline_msg("in-memory sink not started"));
        }
        self.stopped = true;
        if self.silent {
            return Ok(Vec::new());
        }
        Ok(self
            .digests
            .iter()
            .map(|(_, d)| d.to_le_bytes().to_vec())
            .collect())
    }

    fn abort(&mut self) {
        self.cfg = None;
        self.aborted = true;
    }

    fn mime_type(&self) -> &str {
        DIGEST_MIME_TYPE
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
