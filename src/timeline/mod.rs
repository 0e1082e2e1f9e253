//! Era tags, input mappings, sequencing and the playback clock.

/// Playback clock and per-frame layer planning.
pub mod clock;
/// Era tag parsing.
pub mod era;
/// Era to image input mapping.
pub mod input;
/// Chronological ordering and decode.
pub mod sequencer;
