use std::collections::VecDeque;
use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::encode::ffmpeg::StderrDrain;
use crate::foundation::core::{FrameIndex, FrameRgba, Fps};
use crate::foundation::error::{TracerError, TracerResult};

/// Stream-level facts known before the first frame is decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
    /// Container-reported frame count; may be an estimate for streams without one.
    pub frame_count: u64,
}

/// Forward-only, finite sequence of decoded frames.
///
/// Indices start at 0 and grow by one per frame. A second pass means opening a new source.
pub trait FrameSource {
    fn info(&self) -> &VideoInfo;
    /// Next frame, or `None` once the stream is exhausted.
    fn next_frame(&mut self) -> TracerResult<Option<(FrameIndex, FrameRgba)>>;
}

/// Replays frames held in memory. Mostly useful for tests.
#[derive(Debug)]
pub struct MemoryFrameSource {
    info: VideoInfo,
    frames: VecDeque<(FrameIndex, FrameRgba)>,
}

impl MemoryFrameSource {
    /// Index the frames 0, 1, 2, ... in the given order.
    pub fn new(fps: Fps, frames: Vec<FrameRgba>) -> TracerResult<Self> {
        let indexed = frames
            .into_iter()
            .enumerate()
            .map(|(i, f)| (FrameIndex(i as u64), f))
            .collect();
        Self::with_indices(fps, indexed)
    }

    /// Frames with caller-chosen indices, replayed as given.
    pub fn with_indices(fps: Fps, frames: Vec<(FrameIndex, FrameRgba)>) -> TracerResult<Self> {
        let Some((_, first)) = frames.first() else {
            return Err(TracerError::validation("memory source needs at least one frame"));
        };
        let (width, height) = (first.width(), first.height());
        if frames
            .iter()
            .any(|(_, f)| f.width() != width || f.height() != height)
        {
            return Err(TracerError::validation(
                "memory source frames must share one size",
            ));
        }
        Ok(Self {
            info: VideoInfo {
                width,
                height,
                fps,
                frame_count: frames.len() as u64,
            },
            frames: frames.into(),
        })
    }
}

impl FrameSource for MemoryFrameSource {
    fn info(&self) -> &VideoInfo {
        &self.info
    }

    fn next_frame(&mut self) -> TracerResult<Option<(FrameIndex, FrameRgba)>> {
        Ok(self.frames.pop_front())
    }
}

pub fn is_ffprobe_on_path() -> bool {
    Command::new("ffprobe")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Read size, rate and frame count of the first video stream with `ffprobe`.
///
/// Width and height are the coded (unrotated) size, which is what [`FfmpegFrameSource`] decodes.
pub fn probe_video(source_path: &Path) -> TracerResult<VideoInfo> {
    let out = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| TracerError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(TracerError::media(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    parse_probe_json(&out.stdout)
}

#[derive(serde::Deserialize)]
struct ProbeSideData {
    rotation: Option<f64>,
}

#[derive(serde::Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    nb_frames: Option<String>,
    duration: Option<String>,
    #[serde(default)]
    tags: std::collections::HashMap<String, String>,
    #[serde(default)]
    side_data_list: Vec<ProbeSideData>,
}

impl ProbeStream {
    /// Display rotation in degrees, from the display matrix or the legacy `rotate` tag.
    fn rotation(&self) -> Option<i64> {
        self.side_data_list
            .iter()
            .find_map(|d| d.rotation)
            .or_else(|| self.tags.get("rotate").and_then(|r| r.trim().parse().ok()))
            .map(|deg| (deg.round() as i64).rem_euclid(360))
            .filter(|&deg| deg != 0)
    }
}

#[derive(serde::Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(serde::Deserialize)]
struct ProbeOut {
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

fn parse_probe_json(json: &[u8]) -> TracerResult<VideoInfo> {
    let parsed: ProbeOut = serde_json::from_slice(json)
        .map_err(|e| TracerError::media(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| TracerError::media("no video stream found"))?;
    let width = video_stream
        .width
        .ok_or_else(|| TracerError::media("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| TracerError::media("missing video height from ffprobe"))?;

    let (num, den) = parse_ff_ratio(video_stream.r_frame_rate.as_deref().unwrap_or("0/1"))
        .ok_or_else(|| TracerError::media("invalid video r_frame_rate"))?;
    let fps = Fps::new(num, den)
        .map_err(|_| TracerError::media(format!("unusable frame rate {num}/{den}")))?;

    let duration_sec = video_stream
        .duration
        .as_deref()
        .or_else(|| parsed.format.as_ref().and_then(|f| f.duration.as_deref()))
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);
    let frame_count = video_stream
        .nb_frames
        .as_deref()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|&n| n > 0)
        .unwrap_or_else(|| (duration_sec * fps.as_f64()).round().max(0.0) as u64);

    if let Some(rotation) = video_stream.rotation() {
        tracing::debug!(
            rotation,
            width,
            height,
            "stream carries a display rotation; frames are decoded unrotated"
        );
    }

    Ok(VideoInfo {
        width,
        height,
        fps,
        frame_count,
    })
}

/// `ffmpeg` invocation that writes the first video stream as raw RGBA to stdout.
///
/// Autorotation stays off so the decoded size matches the probed coded size.
fn decode_command(path: &Path) -> Command {
    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-v", "error", "-nostdin", "-noautorotate", "-i"])
        .arg(path)
        .args(["-map", "0:v:0", "-f", "rawvideo", "-pix_fmt", "rgba", "pipe:1"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

/// Streams raw RGBA frames out of a system `ffmpeg` child process.
pub struct FfmpegFrameSource {
    path: PathBuf,
    info: VideoInfo,
    child: Child,
    stdout: Option<ChildStdout>,
    stderr_drain: StderrDrain,
    frame_len: usize,
    next_index: u64,
}

impl FfmpegFrameSource {
    pub fn open(path: impl Into<PathBuf>) -> TracerResult<Self> {
        let path = path.into();
        let info = probe_video(&path)?;
        let frame_len = info.width as usize * info.height as usize * 4;
        if frame_len == 0 {
            return Err(TracerError::media(
                "video frame size is zero (invalid source dimensions)",
            ));
        }

        let mut child = decode_command(&path).spawn().map_err(|e| {
            TracerError::media(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| TracerError::media("failed to open ffmpeg stdout (unexpected)"))?;
        let stderr_drain = StderrDrain::spawn(&mut child)
            .map_err(|e| TracerError::media(format!("failed to open ffmpeg stderr: {e}")))?;

        tracing::debug!(
            path = %path.display(),
            width = info.width,
            height = info.height,
            frames = info.frame_count,
            "opened video source"
        );
        Ok(Self {
            path,
            info,
            child,
            stdout: Some(stdout),
            stderr_drain,
            frame_len,
            next_index: 0,
        })
    }

    fn finish(&mut self) -> TracerResult<()> {
        drop(self.stdout.take());
        let status = self
            .child
            .wait()
            .map_err(|e| TracerError::media(format!("failed to wait for ffmpeg: {e}")))?;
        let stderr = self
            .stderr_drain
            .join()
            .map_err(|e| TracerError::media(format!("ffmpeg stderr read failed: {e}")))?;
        if !status.success() {
            return Err(TracerError::media(format!(
                "ffmpeg decode of '{}' exited with status {status}: {}",
                self.path.display(),
                stderr.trim()
            )));
        }
        Ok(())
    }
}

impl FrameSource for FfmpegFrameSource {
    fn info(&self) -> &VideoInfo {
        &self.info
    }

    fn next_frame(&mut self) -> TracerResult<Option<(FrameIndex, FrameRgba)>> {
        let Some(stdout) = self.stdout.as_mut() else {
            return Ok(None);
        };

        let mut buf = vec![0u8; self.frame_len];
        let mut filled = 0;
        while filled < buf.len() {
            let n = stdout.read(&mut buf[filled..]).map_err(|e| {
                TracerError::media(format!("failed to read frame from ffmpeg: {e}"))
            })?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        if filled == 0 {
            self.finish()?;
            return Ok(None);
        }
        if filled < buf.len() {
            return Err(TracerError::media(format!(
                "truncated frame {} from '{}': got {filled} of {} bytes",
                self.next_index,
                self.path.display(),
                buf.len()
            )));
        }

        let idx = FrameIndex(self.next_index);
        self.next_index += 1;
        let frame = FrameRgba::new(self.info.width, self.info.height, buf)?;
        Ok(Some((idx, frame)))
    }
}

impl Drop for FfmpegFrameSource {
    fn drop(&mut self) {
        if self.stdout.take().is_some() {
            let _ = self.child.kill();
            let _ = self.child.wait();
            let _ = self.stderr_drain.join();
        }
    }
}

fn parse_ff_ratio(s: &str) -> Option<(u32, u32)> {
    let (a, b) = s.split_once('/')?;
    let num = a.trim().parse::<u32>().ok()?;
    let den = b.trim().parse::<u32>().ok()?;
    Some((num, den))
}

#[cfg(test)]
#[path = "../../tests/unit/media/source.rs"]
mod tests;
