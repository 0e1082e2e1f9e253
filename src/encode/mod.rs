//! Capture sinks.
//!
//! Sinks consume canvas frames at a fixed output rate, in slot order, and hand back the encoded
//! container when stopped.

/// Variable-rate draw to fixed-rate slot sampling.
pub mod capture;
/// `ffmpeg`-based sinks (WebM or fragmented MP4 via system `ffmpeg`).
pub mod ffmpeg;
/// Capture sink trait and the in-memory sink.
pub mod sink;
