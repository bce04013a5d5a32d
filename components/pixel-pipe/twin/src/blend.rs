//! Alpha blending against the destination RGB565 word.

use ember_registers::components::alpha_blend_e::AlphaBlendE;
use ember_twin_core::Rgba12;
use qfixed::{rgb565, unorm, Q4_12};

/// Whether a mode reads the destination first. Reserved encodings
/// behave as Disabled.
#[must_use]
pub fn needs_dst_read(mode: AlphaBlendE) -> bool {
    matches!(
        mode,
        AlphaBlendE::Add | AlphaBlendE::Subtract | AlphaBlendE::Blend
    )
}

/// Promote a framebuffer word into the blend domain by MSB replication.
#[must_use]
pub fn promote_dst(word: u16) -> Rgba12 {
    Rgba12::new(
        unorm::promote5(rgb565::r5(word)) as i16,
        unorm::promote6(rgb565::g6(word)) as i16,
        unorm::promote5(rgb565::b5(word)) as i16,
        0xFFF,
    )
}

fn per_rgb(src: &Rgba12, dst: &Rgba12, f: impl Fn(i32, i32) -> i32) -> Rgba12 {
    Rgba12 {
        r: Q4_12::from_raw(unorm::saturate(f(
            i32::from(src.r.raw()),
            i32::from(dst.r.raw()),
        ))),
        g: Q4_12::from_raw(unorm::saturate(f(
            i32::from(src.g.raw()),
            i32::from(dst.g.raw()),
        ))),
        b: Q4_12::from_raw(unorm::saturate(f(
            i32::from(src.b.raw()),
            i32::from(dst.b.raw()),
        ))),
        a: src.a,
    }
}

/// Blend the combined color against the destination word.
#[must_use]
pub fn blend(mode: AlphaBlendE, src: &Rgba12, dst_word: u16) -> Rgba12 {
    let dst = promote_dst(dst_word);
    match mode {
        AlphaBlendE::Add => per_rgb(src, &dst, |s, d| s + d),
        AlphaBlendE::Subtract => per_rgb(src, &dst, |s, d| s - d),
        AlphaBlendE::Blend => {
            // Porter-Duff source-over with the source alpha.
            let a = i32::from(src.a.raw().clamp(0, 0x1000));
            per_rgb(src, &dst, |s, d| (s * a + d * (0x1000 - a)) >> 12)
        }
        _ => *src,
    }
}
