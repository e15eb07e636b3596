use std::{
    io::Read as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
    thread::JoinHandle,
};

use crate::foundation::core::{FrameIndex, FrameRgba, Fps};
use crate::foundation::error::{TracerError, TracerResult};

use super::sink::{FrameSink, SinkConfig};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn validate(&self) -> TracerResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TracerError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(TracerError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // yuv420p needs even dimensions.
            return Err(TracerError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

pub fn default_mp4_config(
    out_path: impl Into<PathBuf>,
    width: u32,
    height: u32,
    fps: Fps,
) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps,
        out_path: out_path.into(),
        overwrite: true,
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> TracerResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Reads a child's stderr to the end on a background thread; the pipe never fills up while we
/// are blocked on the child's stdin or stdout.
pub(crate) struct StderrDrain {
    handle: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl StderrDrain {
    /// Take `child`'s piped stderr and start draining it.
    pub(crate) fn spawn(child: &mut Child) -> anyhow::Result<Self> {
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow::anyhow!("child stderr is not piped"))?;
        let handle = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });
        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Wait for the drain thread and return what the child wrote. Call after the child exited.
    pub(crate) fn join(&mut self) -> anyhow::Result<String> {
        let Some(handle) = self.handle.take() else {
            return Ok(String::new());
        };
        let bytes = handle
            .join()
            .map_err(|_| anyhow::anyhow!("stderr drain thread panicked"))??;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Pipes raw RGBA frames into a system `ffmpeg` producing H.264 MP4.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    stderr_drain: StderrDrain,
    frame_len: usize,
}

impl FfmpegEncoder {
    pub fn new(cfg: EncodeConfig) -> TracerResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(TracerError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(TracerError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if cfg.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &format!("{}/{}", cfg.fps.num, cfg.fps.den),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            TracerError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TracerError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let stderr_drain = StderrDrain::spawn(&mut child)
            .map_err(|e| TracerError::encode(format!("failed to open ffmpeg stderr: {e}")))?;

        Ok(Self {
            frame_len: cfg.width as usize * cfg.height as usize * 4,
            cfg,
            child,
            stdin: Some(stdin),
            stderr_drain,
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRgba) -> TracerResult<()> {
        if frame.width() != self.cfg.width || frame.height() != self.cfg.height {
            return Err(TracerError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                self.cfg.width,
                self.cfg.height
            )));
        }
        debug_assert_eq!(frame.data().len(), self.frame_len);

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(TracerError::encode("ffmpeg encoder is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(frame.data()).map_err(|e| {
            TracerError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;

        Ok(())
    }

    pub fn finish(mut self) -> TracerResult<()> {
        drop(self.stdin.take());

        let status = self.child.wait().map_err(|e| {
            TracerError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr = self
            .stderr_drain
            .join()
            .map_err(|e| TracerError::encode(format!("ffmpeg stderr read failed: {e}")))?;

        if !status.success() {
            return Err(TracerError::encode(format!(
                "ffmpeg exited with status {status}: {}",
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// [`FrameSink`] that starts an [`FfmpegEncoder`] on `begin` and finalizes it on `end`.
pub struct FfmpegSink {
    out_path: PathBuf,
    overwrite: bool,
    encoder: Option<FfmpegEncoder>,
}

impl FfmpegSink {
    pub fn new(out_path: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite,
            encoder: None,
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> TracerResult<()> {
        let mut enc = default_mp4_config(&self.out_path, cfg.width, cfg.height, cfg.fps);
        enc.overwrite = self.overwrite;
        self.encoder = Some(FfmpegEncoder::new(enc)?);
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameRgba) -> TracerResult<()> {
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(TracerError::encode("ffmpeg sink used before begin"));
        };
        encoder.encode_frame(frame)
    }

    fn end(&mut self) -> TracerResult<()> {
        let Some(encoder) = self.encoder.take() else {
            return Err(TracerError::encode("ffmpeg sink ended before begin"));
        };
        encoder.finish()?;
        tracing::info!(path = %self.out_path.display(), "encoded output video");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
