use crate::foundation::core::Rgb8;
use crate::foundation::error::{TracerError, TracerResult};

/// Appearance of the traced path and the frame counter.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TraceStyle {
    /// Path and label color.
    pub color: Rgb8,
    /// Stroke width in pixels.
    pub thickness: f64,
    /// Weight of the drawn overlay against the original frame, clamped to `[0, 1]`.
    pub alpha: f32,
    /// Radius of the dot drawn at every visible point; independent of `thickness`.
    pub marker_radius: f64,
    /// Frame counter placement.
    pub label: LabelStyle,
}

impl Default for TraceStyle {
    fn default() -> Self {
        Self {
            color: Rgb8::WHITE,
            thickness: 5.0,
            alpha: 0.5,
            marker_radius: 3.0,
            label: LabelStyle::default(),
        }
    }
}

impl TraceStyle {
    pub fn validate(&self) -> TracerResult<()> {
        if !self.thickness.is_finite() || self.thickness <= 0.0 {
            return Err(TracerError::validation(format!(
                "line thickness must be > 0, got {}",
                self.thickness
            )));
        }
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(TracerError::validation(format!(
                "line alpha must be within [0, 1], got {}",
                self.alpha
            )));
        }
        if !self.marker_radius.is_finite() || self.marker_radius < 0.0 {
            return Err(TracerError::validation(format!(
                "marker radius must be >= 0, got {}",
                self.marker_radius
            )));
        }
        if self.label.scale == 0 {
            return Err(TracerError::validation("label scale must be >= 1"));
        }
        Ok(())
    }
}

/// Where the `Frame: i/N` counter goes. `(x, y)` is the top-left corner of the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub enabled: bool,
    pub x: i32,
    pub y: i32,
    /// Integer upscale of the 5x7 glyphs.
    pub scale: u32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            x: 10,
            y: 10,
            scale: 3,
        }
    }
}
