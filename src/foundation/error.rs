/// Convenience result type used across shot-tracer.
pub type TracerResult<T> = Result<T, TracerError>;

/// Top-level error taxonomy used by tracer APIs.
///
/// Under-constrained capture and out-of-range render queries are not errors; they reduce to
/// "draw nothing".
#[derive(thiserror::Error, Debug)]
pub enum TracerError {
    /// Invalid user-provided data: frames, styles, job files, frame ordering.
    #[error("validation error: {0}")]
    Validation(String),

    /// Misuse of the capture state machine.
    #[error("capture error: {0}")]
    Capture(String),

    /// Failures while probing or decoding the input video.
    #[error("media error: {0}")]
    Media(String),

    /// Failures while encoding the output video.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TracerError {
    /// Build a [`TracerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TracerError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`TracerError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`TracerError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
