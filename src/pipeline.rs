use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::core::{FrameIndex, FrameRgba},
    foundation::error::{TracerError, TracerResult},
    media::source::FrameSource,
    overlay::{render_frame, style::TraceStyle},
    trajectory::Trajectory,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Frames pulled from the source and pushed to the sink.
    pub frames: u64,
    /// Frames on which at least one trajectory point was visible.
    pub frames_with_path: u64,
}

/// Second pass over the video: every source frame, in order, through the overlay into the sink.
///
/// The trajectory is read-only here; each frame depends only on its own pixels, its index and
/// the style. An empty trajectory gives a pass-through copy with the frame counter stamped.
#[tracing::instrument(skip_all, fields(path_frames = trajectory.len()))]
pub fn trace_video(
    source: &mut dyn FrameSource,
    sink: &mut dyn FrameSink,
    trajectory: &Trajectory,
    style: &TraceStyle,
) -> TracerResult<TraceStats> {
    style.validate()?;
    let info = source.info().clone();
    sink.begin(SinkConfig {
        width: info.width,
        height: info.height,
        fps: info.fps,
    })?;

    let mut stats = TraceStats::default();
    let mut last: Option<FrameIndex> = None;
    while let Some((idx, mut frame)) = source.next_frame()? {
        if let Some(prev) = last
            && idx <= prev
        {
            return Err(TracerError::validation(format!(
                "frame source went from index {prev} to {idx}; indices must strictly increase"
            )));
        }
        last = Some(idx);

        if !trajectory.visible(idx).is_empty() {
            stats.frames_with_path += 1;
        }
        render_frame(&mut frame, trajectory, idx, info.frame_count, style);
        sink.push_frame(idx, &frame)?;
        stats.frames += 1;

        if stats.frames.is_multiple_of(100) {
            tracing::debug!(frames = stats.frames, "trace progress");
        }
    }

    sink.end()?;
    tracing::info!(
        frames = stats.frames,
        frames_with_path = stats.frames_with_path,
        "trace complete"
    );
    Ok(stats)
}

/// Decode up to `target` and return that single frame with the overlay applied.
pub fn trace_single_frame(
    source: &mut dyn FrameSource,
    trajectory: &Trajectory,
    target: FrameIndex,
    style: &TraceStyle,
) -> TracerResult<FrameRgba> {
    style.validate()?;
    let total = source.info().frame_count;
    while let Some((idx, mut frame)) = source.next_frame()? {
        if idx == target {
            render_frame(&mut frame, trajectory, idx, total, style);
            return Ok(frame);
        }
        if idx > target {
            break;
        }
    }
    Err(TracerError::validation(format!(
        "frame {target} is past the end of the video"
    )))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
