/// Convenience result type used across timereel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy for montage rendering.
///
/// Every variant short-circuits the whole render; there is never a partial output.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// No usable images remained after filtering the input mapping.
    #[error("empty input: no era has a usable image")]
    EmptyInput,

    /// A source image reference could not be resolved to pixels.
    #[error("image decode error for {era}: {reason}")]
    ImageDecode {
        /// Era tag whose image failed.
        era: String,
        /// Human-readable cause.
        reason: String,
    },

    /// The drawing surface could not be created (environment problem, never retried).
    #[error("render context unavailable: {0}")]
    RenderContextUnavailable(String),

    /// The capture sink stopped without producing any output.
    #[error("recording produced no data")]
    EmptyRecording,

    /// Unexpected failure while drawing frames or driving the sink lifecycle.
    #[error("render pipeline error: {0:#}")]
    RenderPipeline(anyhow::Error),

    /// The caller aborted the render.
    #[error("render cancelled")]
    Cancelled,

    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::ImageDecode`] value.
    pub fn image_decode(era: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ImageDecode {
            era: era.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`ReelError::RenderContextUnavailable`] value.
    pub fn context_unavailable(msg: impl Into<String>) -> Self {
        Self::RenderContextUnavailable(msg.into())
    }

    /// Wrap any failure raised inside the frame loop or sink lifecycle.
    ///
    /// Already-wrapped pipeline errors and cancellations pass through unchanged.
    pub fn pipeline(err: ReelError) -> Self {
        match err {
            e @ (Self::RenderPipeline(_) | Self::Cancelled) => e,
            other => Self::RenderPipeline(anyhow::Error::new(other)),
        }
    }

    /// Build a [`ReelError::RenderPipeline`] value from a message.
    pub fn pipeline_msg(msg: impl Into<String>) -> Self {
        Self::RenderPipeline(anyhow::anyhow!(msg.into()))
    }

    /// Whether a caller retry can reasonably succeed.
    ///
    /// Decode failures may succeed after re-fetching the source; pipeline failures are often
    /// transient. Caller errors, environment failures and cancellations are not retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ImageDecode { .. } | Self::RenderPipeline(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
