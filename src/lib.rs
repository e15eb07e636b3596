//! shot-tracer draws the path of a moving object onto a video.
//!
//! An operator clicks the object in a few frames. Those sparse samples are fitted with an
//! interpolating spline and resampled once per frame. The video is then re-encoded with the path
//! drawn up to the current frame and blended over the picture.
//!
//! # Pipeline overview
//!
//! 1. **Capture**: `ClickEvent` stream → [`CaptureSession`] → [`SampleSet`]
//! 2. **Interpolate**: [`SampleSet`] → [`Trajectory`] via [`build_trajectory`]
//! 3. **Render**: every frame of a [`FrameSource`] goes through [`render_frame`]
//! 4. **Encode**: frames go to a [`FrameSink`] (system `ffmpeg` for MP4 output)
//!
//! Fewer than two samples is not an error. It gives an empty trajectory, and the video passes
//! through with only the frame counter added.
#![forbid(unsafe_code)]

mod capture;
mod encode;
mod foundation;
mod job;
mod media;
mod overlay;
mod pipeline;
mod trajectory;

pub use capture::session::{CaptureSession, CaptureState, ClickEvent, SampleSet};
pub use encode::ffmpeg::{
    EncodeConfig, FfmpegEncoder, FfmpegSink, default_mp4_config, ensure_parent_dir,
    is_ffmpeg_on_path,
};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Fps, FrameIndex, FrameRgba, PixelPos, Point, Rgb8};
pub use foundation::error::{TracerError, TracerResult};
pub use job::TraceJob;
pub use media::source::{
    FfmpegFrameSource, FrameSource, MemoryFrameSource, VideoInfo, is_ffprobe_on_path, probe_video,
};
pub use overlay::label::{draw_label, frame_label, label_size};
pub use overlay::render_frame;
pub use overlay::style::{LabelStyle, TraceStyle};
pub use pipeline::{TraceStats, trace_single_frame, trace_video};
pub use trajectory::{InterpKind, Trajectory, build_trajectory};
