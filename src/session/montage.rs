use std::time::Duration;

use crate::assets::fonts::CaptionTypeface;
use crate::config::RenderConfig;
use crate::encode::capture::FrameCapture;
use crate::encode::sink::{CaptureSink, SinkConfig};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;
use crate::render::renderer::FrameRenderer;
use crate::session::progress::{ProgressMessage, ProgressSink};
use crate::session::schedule::{CancelToken, FrameScheduler, LoopControl, run_loop};
use crate::timeline::clock::{ClockTick, PlaybackClock, Timing, plan_frame};
use crate::timeline::input::TimelineInput;
use crate::timeline::sequencer::{TimelineEntry, build_timeline, decode_sequence, sequence_refs};

/// The finished video and render statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedOutput {
    /// Concatenated container bytes.
    pub bytes: Vec<u8>,
    /// Container MIME type reported by the sink.
    pub mime_type: String,
    /// Canvas frames drawn by the loop.
    pub frames_drawn: u64,
    /// Output frame slots pushed to the sink.
    pub frames_captured: u64,
    /// Encoded duration (`frames_captured / fps`).
    pub duration: Duration,
}

/// Lifecycle of one [`MontageSession::render`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MontageState {
    /// Nothing started yet.
    Idle,
    /// Decoding source images.
    Loading,
    /// Sink running, frames being drawn and captured.
    Capturing,
    /// Sequence exhausted, sink being stopped.
    Draining,
    /// Output produced.
    Done,
    /// The render ended with an error or cancellation.
    Failed,
}

/// Renders a timeline into a cross-fading, Ken-Burns montage video.
///
/// - Sequence the usable entries by year
/// - Decode every source image in parallel
/// - Drive a step loop from a [`FrameScheduler`], sampling the canvas into a [`CaptureSink`]
#[derive(Debug)]
pub struct MontageSession {
    config: RenderConfig,
    typeface: Option<CaptionTypeface>,
    state: MontageState,
}

impl MontageSession {
    /// Create a session for a validated `config`.
    pub fn new(config: RenderConfig) -> ReelResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            typeface: None,
            state: MontageState::Idle,
        })
    }

    /// Paint captions with `typeface` instead of the configured or discovered font.
    pub fn with_caption_typeface(mut self, typeface: CaptionTypeface) -> Self {
        self.typeface = Some(typeface);
        self
    }

    /// Session configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// State reached by the most recent render.
    pub fn state(&self) -> MontageState {
        self.state
    }

    /// Render `input` into `sink`.
    ///
    /// Progress is reported as "Initializing video renderer...", "Loading images...", one
    /// "Rendering <era>..." per entry as it becomes current, and "Finalizing video...". Once
    /// `cancel` is set no further messages are sent, the sink is aborted and the result is
    /// [`ReelError::Cancelled`].
    #[tracing::instrument(skip_all, fields(eras = input.len()))]
    pub fn render(
        &mut self,
        input: &TimelineInput,
        sink: &mut dyn CaptureSink,
        scheduler: &mut dyn FrameScheduler,
        cancel: &CancelToken,
        progress: &mut dyn ProgressSink,
    ) -> ReelResult<EncodedOutput> {
        self.state = MontageState::Idle;
        let out = self.render_inner(input, sink, scheduler, cancel, progress);
        if let Err(e) = &out {
            tracing::debug!(error = %e, "montage render failed");
            self.enter(MontageState::Failed);
        }
        out
    }

    fn render_inner(
        &mut self,
        input: &TimelineInput,
        sink: &mut dyn CaptureSink,
        scheduler: &mut dyn FrameScheduler,
        cancel: &CancelToken,
        progress: &mut dyn ProgressSink,
    ) -> ReelResult<EncodedOutput> {
        report(progress, cancel, ProgressMessage::Initializing)?;
        let refs = sequence_refs(input)?;

        self.enter(MontageState::Loading);
        report(progress, cancel, ProgressMessage::Loading)?;
        let entries = decode_sequence(&refs)?;
        let mut renderer = self.renderer()?;
        let timing = self.config.timing()?;
        let fps = self.config.fps()?;
        cancel.check()?;

        self.enter(MontageState::Capturing);
        let sink_cfg = SinkConfig {
            width: self.config.width,
            height: self.config.height,
            fps,
            background: self.config.background,
        };
        if let Err(e) = sink.start(sink_cfg) {
            sink.abort();
            return Err(ReelError::pipeline(e));
        }

        let mut run = CaptureRun {
            entries: &entries,
            timing,
            clock: PlaybackClock::new(entries.len(), timing),
            capture: FrameCapture::new(fps),
            renderer: &mut renderer,
            t: Duration::ZERO,
            frames_drawn: 0,
        };
        let looped = run_loop(scheduler, cancel, |delta| {
            run.step(delta, sink, cancel, progress)
        });
        if let Err(e) = looped {
            sink.abort();
            return Err(ReelError::pipeline(e));
        }
        let frames_drawn = run.frames_drawn;
        let frames_captured = run.capture.emitted();

        self.enter(MontageState::Draining);
        let chunks = sink.stop().map_err(ReelError::pipeline)?;
        if chunks.is_empty() {
            return Err(ReelError::EmptyRecording);
        }
        let bytes = chunks.concat();
        if bytes.is_empty() {
            return Err(ReelError::EmptyRecording);
        }

        self.enter(MontageState::Done);
        Ok(EncodedOutput {
            bytes,
            mime_type: sink.mime_type().to_string(),
            frames_drawn,
            frames_captured,
            duration: Duration::from_secs_f64(fps.frames_to_secs(frames_captured)),
        })
    }

    /// Render the canvas as it looks `at` into the montage, without capture.
    #[tracing::instrument(skip(self, input), fields(eras = input.len()))]
    pub fn render_still(&self, input: &TimelineInput, at: Duration) -> ReelResult<FrameRGBA> {
        let entries = build_timeline(input)?;
        let timing = self.config.timing()?;
        let mut clock = PlaybackClock::new(entries.len(), timing);
        if clock.advance(at) == ClockTick::Exhausted {
            return Err(ReelError::validation(format!(
                "{} ms is past the end of a {} ms montage",
                at.as_millis(),
                timing.total(entries.len()).as_millis()
            )));
        }
        let mut renderer = self.renderer()?;
        draw_planned(&mut renderer, &entries, &clock, &timing)?;
        Ok(renderer.surface().clone())
    }

    fn renderer(&self) -> ReelResult<FrameRenderer> {
        match &self.typeface {
            Some(t) if self.config.caption.enabled => {
                FrameRenderer::with_typeface(&self.config, t.clone())
            }
            _ => FrameRenderer::new(&self.config),
        }
    }

    fn enter(&mut self, next: MontageState) {
        tracing::debug!(from = ?self.state, to = ?next, "montage state");
        self.state = next;
    }
}

/// Mutable state of the capture loop.
struct CaptureRun<'a> {
    entries: &'a [TimelineEntry],
    timing: Timing,
    clock: PlaybackClock,
    capture: FrameCapture,
    renderer: &'a mut FrameRenderer,
    t: Duration,
    frames_drawn: u64,
}

impl CaptureRun<'_> {
    fn step(
        &mut self,
        delta: Duration,
        sink: &mut dyn CaptureSink,
        cancel: &CancelToken,
        progress: &mut dyn ProgressSink,
    ) -> ReelResult<LoopControl> {
        self.t += delta;
        match self.clock.advance(delta) {
            ClockTick::Exhausted => {
                // The sequence ends at its nominal length; overshoot from the last delta is not
                // captured.
                let t_end = self.t.min(self.timing.total(self.entries.len()));
                self.capture
                    .finish_at(t_end, self.renderer.surface(), sink)?;
                report(progress, cancel, ProgressMessage::Finalizing)?;
                Ok(LoopControl::Finish)
            }
            ClockTick::Showing { index, entered } => {
                if entered {
                    let era = self.entries[index].era.to_string();
                    report(progress, cancel, ProgressMessage::Rendering(era))?;
                }
                draw_planned(self.renderer, self.entries, &self.clock, &self.timing)?;
                self.frames_drawn += 1;
                self.capture
                    .emit_through(self.t, self.renderer.surface(), sink)?;
                Ok(LoopControl::Continue)
            }
        }
    }
}

fn draw_planned(
    renderer: &mut FrameRenderer,
    entries: &[TimelineEntry],
    clock: &PlaybackClock,
    timing: &Timing,
) -> ReelResult<()> {
    let plan = plan_frame(clock, timing)
        .ok_or_else(|| ReelError::pipeline_msg("no frame to draw after the last entry"))?;
    renderer.clear();
    for layer in std::iter::once(plan.current).chain(plan.incoming) {
        let entry = entries
            .get(layer.index)
            .ok_or_else(|| ReelError::pipeline_msg("frame plan points past the timeline"))?;
        renderer.draw_frame(&entry.image, &entry.era, layer.zoom, layer.opacity)?;
    }
    Ok(())
}

fn report(
    progress: &mut dyn ProgressSink,
    cancel: &CancelToken,
    message: ProgressMessage,
) -> ReelResult<()> {
    cancel.check()?;
    progress
        .report(&message.to_string())
        .map_err(ReelError::pipeline)
}
