use std::collections::BTreeMap;

use crate::foundation::core::{FrameIndex, PixelPos};
use crate::foundation::error::{TracerError, TracerResult};

/// One operator event from the click stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClickEvent {
    /// The operator clicked at `(x, y)` while `frame` was displayed.
    Click {
        /// Frame shown when the click happened.
        frame: FrameIndex,
        /// Horizontal pixel coordinate.
        x: i32,
        /// Vertical pixel coordinate.
        y: i32,
    },
    /// Explicit end of capture.
    Done,
}

impl ClickEvent {
    /// Shorthand for a click event.
    pub fn click(frame: u64, x: i32, y: i32) -> Self {
        Self::Click {
            frame: FrameIndex(frame),
            x,
            y,
        }
    }
}

/// Sparse observations keyed by frame index, at most one per frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleSet {
    samples: BTreeMap<FrameIndex, PixelPos>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample. Returns the previous position when `frame` was already sampled.
    pub fn insert(&mut self, frame: FrameIndex, pos: PixelPos) -> Option<PixelPos> {
        self.samples.insert(frame, pos)
    }

    pub fn get(&self, frame: FrameIndex) -> Option<PixelPos> {
        self.samples.get(&frame).copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first_frame(&self) -> Option<FrameIndex> {
        self.samples.keys().next().copied()
    }

    pub fn last_frame(&self) -> Option<FrameIndex> {
        self.samples.keys().next_back().copied()
    }

    /// Samples in increasing frame order.
    pub fn iter(&self) -> impl Iterator<Item = (FrameIndex, PixelPos)> + '_ {
        self.samples.iter().map(|(f, p)| (*f, *p))
    }
}

impl FromIterator<(FrameIndex, PixelPos)> for SampleSet {
    fn from_iter<I: IntoIterator<Item = (FrameIndex, PixelPos)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (frame, pos) in iter {
            set.insert(frame, pos);
        }
        set
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Capturing,
    Closed,
}

/// Owns the [`SampleSet`] while the operator is clicking.
///
/// `Idle -> Capturing` on the first click, `Capturing -> Closed` on [`ClickEvent::Done`].
/// Once closed the samples are frozen and further clicks are rejected.
#[derive(Debug)]
pub struct CaptureSession {
    state: CaptureState,
    samples: SampleSet,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSession {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
            samples: SampleSet::new(),
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    pub fn handle(&mut self, event: ClickEvent) -> TracerResult<()> {
        match event {
            ClickEvent::Click { frame, x, y } => self.click(frame, PixelPos::new(x, y)),
            ClickEvent::Done => {
                self.state = CaptureState::Closed;
                Ok(())
            }
        }
    }

    pub fn click(&mut self, frame: FrameIndex, pos: PixelPos) -> TracerResult<()> {
        if self.state == CaptureState::Closed {
            return Err(TracerError::capture(format!(
                "click on frame {frame} after capture was closed"
            )));
        }
        if let Some(prev) = self.samples.insert(frame, pos) {
            tracing::debug!(%frame, ?prev, ?pos, "overwrote sample on already-clicked frame");
        } else {
            tracing::debug!(%frame, ?pos, "sample recorded");
        }
        self.state = CaptureState::Capturing;
        Ok(())
    }

    /// Close the session and hand out the frozen samples.
    pub fn close(self) -> SampleSet {
        self.samples
    }

    /// Consume events until `Done` or the end of the stream. A stream that ends without `Done`
    /// is treated as an aborted capture and closes with whatever was recorded.
    pub fn drain<I>(mut self, events: I) -> TracerResult<SampleSet>
    where
        I: IntoIterator<Item = ClickEvent>,
    {
        for event in events {
            self.handle(event)?;
            if self.state == CaptureState::Closed {
                break;
            }
        }
        if self.state != CaptureState::Closed {
            tracing::debug!(
                samples = self.samples.len(),
                "click stream ended without done; closing capture"
            );
        }
        Ok(self.close())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/session.rs"]
mod tests;
