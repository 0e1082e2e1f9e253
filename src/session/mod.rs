//! Montage rendering sessions.

/// The render loop state machine.
pub mod montage;
/// Progress reporting.
pub mod progress;
/// Frame schedulers, cancellation and the step loop.
pub mod schedule;
