//! Sparse samples to a dense, per-frame path.

pub(crate) mod spline;

use crate::capture::session::SampleSet;
use crate::foundation::core::{FrameIndex, PixelPos};

use spline::InterpSpline;

/// Curve family fitted through the samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpKind {
    /// Straight segments between samples.
    Linear,
    /// C1 piecewise quadratic.
    #[default]
    Quadratic,
    /// C2 piecewise cubic (not-a-knot).
    Cubic,
}

impl InterpKind {
    pub fn degree(self) -> usize {
        match self {
            Self::Linear => 1,
            Self::Quadratic => 2,
            Self::Cubic => 3,
        }
    }
}

/// Dense path: one position for every frame in `[first_frame, last_frame]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Trajectory {
    start: FrameIndex,
    points: Vec<PixelPos>,
}

impl Trajectory {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first_frame(&self) -> Option<FrameIndex> {
        (!self.is_empty()).then_some(self.start)
    }

    pub fn last_frame(&self) -> Option<FrameIndex> {
        (!self.is_empty()).then(|| FrameIndex(self.start.0 + self.points.len() as u64 - 1))
    }

    pub fn get(&self, frame: FrameIndex) -> Option<PixelPos> {
        let offset = frame.0.checked_sub(self.start.0)?;
        self.points.get(usize::try_from(offset).ok()?).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FrameIndex, PixelPos)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (FrameIndex(self.start.0 + i as u64), *p))
    }

    /// Points with `first_frame <= frame <= current`, in frame order.
    pub fn visible(&self, current: FrameIndex) -> &[PixelPos] {
        let Some(offset) = current.0.checked_sub(self.start.0) else {
            return &[];
        };
        let end = usize::try_from(offset)
            .map_or(self.points.len(), |o| o.saturating_add(1).min(self.points.len()));
        &self.points[..end]
    }
}

/// Fit the samples and resample the curve at every integer frame between the first and last
/// sample, rounding to whole pixels.
///
/// Fewer than two samples produce an empty trajectory: there is nothing to trace.
#[tracing::instrument(skip(samples), fields(samples = samples.len()))]
pub fn build_trajectory(samples: &SampleSet, kind: InterpKind) -> Trajectory {
    let (Some(first), Some(last)) = (samples.first_frame(), samples.last_frame()) else {
        tracing::warn!("no samples captured; nothing to trace");
        return Trajectory::empty();
    };
    if samples.len() < 2 {
        tracing::warn!(%first, "only one sample captured; nothing to trace");
        return Trajectory::empty();
    }

    let sites: Vec<f64> = samples.iter().map(|(f, _)| f.0 as f64).collect();
    let values: Vec<[f64; 2]> = samples
        .iter()
        .map(|(_, p)| [f64::from(p.x), f64::from(p.y)])
        .collect();

    let Some(spline) = InterpSpline::fit(&sites, &values, kind.degree()) else {
        tracing::warn!("spline collocation system is singular; nothing to trace");
        return Trajectory::empty();
    };

    let Some(len) = dense_len(first, last) else {
        tracing::warn!(%first, %last, "frame span too large to resample; nothing to trace");
        return Trajectory::empty();
    };
    let mut points: Vec<PixelPos> = Vec::new();
    if points.try_reserve_exact(len).is_err() {
        tracing::warn!(%first, %last, "cannot allocate {len} trajectory points; nothing to trace");
        return Trajectory::empty();
    }
    points.extend((first.0..=last.0).map(|f| {
        let [x, y] = spline.eval(f as f64);
        PixelPos::new(x.round() as i32, y.round() as i32)
    }));

    tracing::info!(
        %first,
        %last,
        frames = points.len(),
        degree = spline.degree(),
        "trajectory built"
    );
    Trajectory {
        start: first,
        points,
    }
}

/// Number of frames in `[first, last]`, if it fits in memory indexing.
fn dense_len(first: FrameIndex, last: FrameIndex) -> Option<usize> {
    let span = last.0.checked_sub(first.0)?.checked_add(1)?;
    usize::try_from(span).ok()
}

#[cfg(test)]
#[path = "../../tests/unit/trajectory/trajectory.rs"]
mod tests;
