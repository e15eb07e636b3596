//! Output sinks.
//!
//! Sinks consume rendered frames in playback order and are driven by [`crate::trace_video`].

/// `ffmpeg`-based MP4 output via the system binary.
pub mod ffmpeg;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
