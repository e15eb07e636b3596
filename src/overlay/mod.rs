//! Per-frame compositing of the visible part of a [`Trajectory`].
//!
//! The path is rasterized with `vello_cpu` into a transparent layer the size of the frame. The
//! layer is composited over a copy of the frame and that overlay is then mixed back with the
//! original at the style's alpha. The frame counter goes on last, at full opacity.

pub mod label;
pub mod style;

use vello_cpu::kurbo::{BezPath, Cap, Circle, Join, Shape as _, Stroke};

use crate::foundation::core::{FrameIndex, FrameRgba, PixelPos, Rgb8};
use crate::foundation::math::{lerp_u8, mul_div255_u16, unit_to_u8_weight};
use crate::trajectory::Trajectory;

use style::TraceStyle;

/// Draw the path up to `current`, blend it into `canvas`, and stamp the frame counter.
///
/// Only trajectory points with `frame <= current` are drawn. Frames before the trajectory starts
/// and empty trajectories come out unchanged apart from the counter.
pub fn render_frame(
    canvas: &mut FrameRgba,
    trajectory: &Trajectory,
    current: FrameIndex,
    total_frames: u64,
    style: &TraceStyle,
) {
    let visible = trajectory.visible(current);
    if !visible.is_empty() {
        let layer = rasterize_path(canvas.size_u16(), visible, style);
        blend_layer_in_place(canvas.data_mut(), &layer, style.alpha);
    }

    if style.label.enabled {
        let text = label::frame_label(current, total_frames);
        label::draw_label(canvas, &text, &style.label, style.color);
    }
}

/// Premultiplied RGBA8 layer holding the polyline through `points` plus a marker per point.
fn rasterize_path(size: (u16, u16), points: &[PixelPos], style: &TraceStyle) -> Vec<u8> {
    let (width, height) = size;
    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_paint(paint_color(style.color));

    if points.len() > 1 {
        let mut line = BezPath::new();
        line.move_to(point_to_cpu(points[0]));
        for p in &points[1..] {
            line.line_to(point_to_cpu(*p));
        }
        ctx.set_stroke(
            Stroke::new(style.thickness)
                .with_caps(Cap::Round)
                .with_join(Join::Round),
        );
        ctx.stroke_path(&line);
    }

    if style.marker_radius > 0.0 {
        for p in points {
            let dot = Circle::new(point_to_cpu(*p), style.marker_radius).to_path(0.1);
            ctx.fill_path(&dot);
        }
    }

    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    pixmap.data_as_u8_slice().to_vec()
}

/// `dst = lerp(dst, layer over dst, alpha)` per channel. Pixels the layer leaves transparent
/// are not touched.
fn blend_layer_in_place(dst: &mut [u8], layer: &[u8], alpha: f32) {
    let t = unit_to_u8_weight(alpha);
    for (d, l) in dst.chunks_exact_mut(4).zip(layer.chunks_exact(4)) {
        let la = u16::from(l[3]);
        if la == 0 {
            continue;
        }
        let inv = 255 - la;
        for i in 0..4 {
            let over = (u16::from(l[i]) + mul_div255_u16(u16::from(d[i]), inv)).min(255) as u8;
            d[i] = lerp_u8(d[i], over, t);
        }
    }
}

fn paint_color(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn point_to_cpu(p: PixelPos) -> vello_cpu::kurbo::Point {
    let p = p.to_point();
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/render.rs"]
mod tests;
