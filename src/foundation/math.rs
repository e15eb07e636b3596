pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// `a + (b - a) * t` on one 8-bit channel, `t` in `[0, 255]`. Equal inputs come back untouched.
pub(crate) fn lerp_u8(a: u8, b: u8, t: u16) -> u8 {
    if a == b {
        return a;
    }
    let t = t.min(255);
    (mul_div255_u16(u16::from(a), 255 - t) + mul_div255_u16(u16::from(b), t)).min(255) as u8
}

/// Map a unit float to the 8-bit weight used by [`lerp_u8`].
pub(crate) fn unit_to_u8_weight(t: f32) -> u16 {
    ((t.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16
}
