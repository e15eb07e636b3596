use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    capture::session::{CaptureSession, ClickEvent, SampleSet},
    foundation::error::{TracerError, TracerResult},
    media::source::VideoInfo,
    overlay::style::TraceStyle,
    trajectory::{InterpKind, Trajectory, build_trajectory},
};

/// A recorded tracing job: the operator's click stream plus how to draw the result.
///
/// ```json
/// {
///   "interp": "quadratic",
///   "style": { "color": "#ffffff", "thickness": 15, "alpha": 0.6 },
///   "events": [
///     { "type": "click", "frame": 12, "x": 640, "y": 700 },
///     { "type": "click", "frame": 40, "x": 745, "y": 210 },
///     { "type": "done" }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TraceJob {
    #[serde(default)]
    pub interp: InterpKind,
    #[serde(default)]
    pub style: TraceStyle,
    pub events: Vec<ClickEvent>,
}

impl TraceJob {
    pub fn from_path(path: &Path) -> TracerResult<Self> {
        let f = File::open(path).with_context(|| format!("open job '{}'", path.display()))?;
        let job: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| TracerError::validation(format!("parse job '{}': {e}", path.display())))?;
        job.style.validate()?;
        Ok(job)
    }

    pub fn from_json_str(s: &str) -> TracerResult<Self> {
        let job: Self = serde_json::from_str(s)
            .map_err(|e| TracerError::validation(format!("parse job json: {e}")))?;
        job.style.validate()?;
        Ok(job)
    }

    /// Replay the click stream through a fresh capture session.
    pub fn capture(&self) -> TracerResult<SampleSet> {
        CaptureSession::new().drain(self.events.iter().copied())
    }

    pub fn trajectory(&self) -> TracerResult<Trajectory> {
        Ok(build_trajectory(&self.capture()?, self.interp))
    }

    /// Like [`TraceJob::trajectory`], but every click must land on a frame the video has.
    ///
    /// A `frame_count` of 0 means the container did not report one; nothing is checked then.
    pub fn trajectory_for(&self, video: &VideoInfo) -> TracerResult<Trajectory> {
        let samples = self.capture()?;
        if video.frame_count > 0
            && let Some(last) = samples.last_frame()
            && last.0 >= video.frame_count
        {
            return Err(TracerError::validation(format!(
                "click on frame {last} but the video has {} frames",
                video.frame_count
            )));
        }
        Ok(build_trajectory(&samples, self.interp))
    }
}

#[cfg(test)]
#[path = "../tests/unit/job.rs"]
mod tests;
