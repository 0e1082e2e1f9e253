use std::fmt;

use crate::foundation::error::ReelResult;

/// Human-readable status updates sent while a montage renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressMessage {
    /// Before sequencing.
    Initializing,
    /// Before decoding source images.
    Loading,
    /// An entry became current.
    Rendering(String),
    /// The last entry finished and capture is being finalized.
    Finalizing,
}

impl fmt::Display for ProgressMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initializing => f.write_str("Initializing video renderer..."),
            Self::Loading => f.write_str("Loading images..."),
            Self::Rendering(era) => write!(f, "Rendering {era}..."),
            Self::Finalizing => f.write_str("Finalizing video..."),
        }
    }
}

/// Receiver of progress strings.
///
/// Errors abort the render as a pipeline failure.
pub trait ProgressSink {
    /// Deliver one status string.
    fn report(&mut self, message: &str) -> ReelResult<()>;
}

impl<F> ProgressSink for F
where
    F: FnMut(&str),
{
    fn report(&mut self, message: &str) -> ReelResult<()> {
        self(message);
        Ok(())
    }
}

/// Discards every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _message: &str) -> ReelResult<()> {
        Ok(())
    }
}

/// Forwards every message to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&mut self, message: &str) -> ReelResult<()> {
        tracing::info!("{message}");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/progress.rs"]
mod tests;
