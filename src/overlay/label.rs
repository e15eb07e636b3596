//! Frame counter text, drawn with a built-in 5x7 bitmap font so that no font files are needed.

use crate::foundation::core::{FrameIndex, FrameRgba, Rgb8};
use crate::overlay::style::LabelStyle;

const GLYPH_W: i64 = 5;
const GLYPH_H: i64 = 7;
const ADVANCE: i64 = GLYPH_W + 1;

pub fn frame_label(current: FrameIndex, total_frames: u64) -> String {
    format!("Frame: {current}/{total_frames}")
}

/// Stamp `text` at full opacity. Pixels outside the frame are dropped; characters without a
/// glyph leave a gap.
pub fn draw_label(frame: &mut FrameRgba, text: &str, label: &LabelStyle, color: Rgb8) {
    let scale = i64::from(label.scale.max(1));
    let rgba = [color.r, color.g, color.b, 255];
    let mut x = i64::from(label.x);
    let y = i64::from(label.y);
    for ch in text.chars() {
        if let Some(rows) = glyph5x7(ch) {
            draw_glyph(frame, x, y, &rows, scale, rgba);
        }
        x += ADVANCE * scale;
    }
}

/// Pixel extent of `text` at `scale`.
pub fn label_size(text: &str, scale: u32) -> (i64, i64) {
    let scale = i64::from(scale.max(1));
    let n = text.chars().count() as i64;
    let w = if n == 0 { 0 } else { (n * ADVANCE - 1) * scale };
    (w, GLYPH_H * scale)
}

fn draw_glyph(frame: &mut FrameRgba, x: i64, y: i64, rows: &[u8; 7], scale: i64, rgba: [u8; 4]) {
    for (ry, bits) in rows.iter().enumerate() {
        for rx in 0..GLYPH_W {
            if bits & (1 << (GLYPH_W - 1 - rx)) == 0 {
                continue;
            }
            let px = x + rx * scale;
            let py = y + ry as i64 * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    frame.put_pixel(px + dx, py + dy, rgba);
                }
            }
        }
    }
}

/// Each row keeps its pixels in the low 5 bits, bit 4 leftmost.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    let rows = match ch {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],

        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'r' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000],
        'a' => [0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111],
        'm' => [0b00000, 0b00000, 0b11010, 0b10101, 0b10101, 0b10001, 0b10001],
        'e' => [0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110],

        ' ' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],

        _ => return None,
    };
    Some(rows)
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/label.rs"]
mod tests;
