//! Ordered dithering ahead of RGB565 truncation.

use ember_twin_core::Rgba12;
use qfixed::{rgb565, unorm};

/// Recursive 16x16 ordered threshold matrix, tileable, thresholds
/// 0..=255. Built per pixel from the coordinate bits, LSBs most
/// significant, each level contributing the pair (x^y, y).
#[must_use]
pub const fn threshold16(x: u16, y: u16) -> u8 {
    let mut v = 0u16;
    let mut k = 0;
    while k < 4 {
        let xb = (x >> k) & 1;
        let yb = (y >> k) & 1;
        v = (v << 2) | ((xb ^ yb) << 1) | yb;
        k += 1;
    }
    v as u8
}

/// Per-channel quantization steps in the 12-bit domain: 5-bit channels
/// lose 7 bits, the 6-bit green loses 6.
const STEP_5: i32 = 1 << 7;
const STEP_6: i32 = 1 << 6;

fn dither_channel(value12: i16, threshold: u8, step: i32) -> u16 {
    let offset = (i32::from(threshold) * step) >> 8;
    unorm::clamp12(i32::from(value12) + offset)
}

/// Add the format-scaled threshold offset to each channel, saturating
/// in the 12-bit domain, and truncate to an RGB565 word.
#[must_use]
pub fn dither_to_rgb565(color: &Rgba12, x: u16, y: u16) -> u16 {
    let t = threshold16(x & 15, y & 15);
    rgb565::pack(
        unorm::narrow5(dither_channel(color.r.raw(), t, STEP_5)),
        unorm::narrow6(dither_channel(color.g.raw(), t, STEP_6)),
        unorm::narrow5(dither_channel(color.b.raw(), t, STEP_5)),
    )
}

/// Straight truncation when dithering is off.
#[must_use]
pub fn truncate_to_rgb565(color: &Rgba12) -> u16 {
    rgb565::pack(
        unorm::narrow5(unorm::clamp12(i32::from(color.r.raw()))),
        unorm::narrow6(unorm::clamp12(i32::from(color.g.raw()))),
        unorm::narrow5(unorm::clamp12(i32::from(color.b.raw()))),
    )
}
