//! timereel renders a chronological photo montage video from a set of era-tagged images.
//!
//! Each era's image is shown for a fixed time with a slow Ken-Burns zoom, cross-fades into the
//! next era, and carries an era overlay and caption. The public API is session-oriented:
//!
//! - Build a [`TimelineInput`] (directly or from a JSON mapping of era to generated image)
//! - Create a [`MontageSession`] from a [`RenderConfig`]
//! - Render into a [`CaptureSink`] driven by a [`FrameScheduler`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Image and font assets.
pub mod assets;
/// Render configuration.
pub mod config;
/// Compositing and era effects.
pub mod effects;
/// Capture sinks.
pub mod encode;
/// Frame rendering.
pub mod render;
/// Session-oriented rendering API.
pub mod session;
/// Timeline model and sequencing.
pub mod timeline;

pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::assets::decode::{ImageRef, decode_image};
pub use crate::assets::fonts::CaptionTypeface;
pub use crate::assets::raster::DecodedRaster;
pub use crate::config::{CaptionConfig, RenderConfig};
pub use crate::effects::overlay::OverlayEffect;
pub use crate::effects::style::{CaptionStyle, EraStyleTable, OverlaySpec, StyleTableSpec, YearRange};
pub use crate::encode::capture::FrameCapture;
pub use crate::encode::ffmpeg::{Container, FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::sink::{CaptureSink, InMemorySink, SinkConfig, frame_digest};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::renderer::FrameRenderer;
pub use crate::session::montage::{EncodedOutput, MontageSession, MontageState};
pub use crate::session::progress::{NoProgress, ProgressMessage, ProgressSink, TracingProgress};
pub use crate::session::schedule::{
    CancelToken, FixedStepScheduler, FrameScheduler, LoopControl, RealtimeScheduler,
    ScriptedScheduler, run_loop,
};
pub use crate::timeline::clock::{FramePlan, LayerPlan, PlaybackClock, Timing, plan_frame};
pub use crate::timeline::era::{DEFAULT_ERAS, EraTag};
pub use crate::timeline::input::{GeneratedImage, GenerationStatus, TimelineInput};
pub use crate::timeline::sequencer::{TimelineEntry, build_timeline};
