//! Stateless texture block decoders.
//!
//! Each decoder maps one raw 4x4 block to 16 canonical 5-6-5-2 texels in
//! row-major order. The outputs feed combiner arithmetic unfiltered, so
//! every palette formula here is bit-exact: palette interpolation uses
//! rounded integer division, channel narrowing truncates.

use ember_registers::components::tex_format_e::TexFormatE;
use ember_twin_core::tiled::block_bytes;
use ember_twin_core::Texel;

/// Decode one block. `bytes` carries at least `block_bytes(format)`
/// bytes; missing bytes read as zero (the fetch FSM always supplies a
/// full block). Reserved formats decode to transparent black.
#[must_use]
pub fn decode_block(format: TexFormatE, bytes: &[u8]) -> [Texel; 16] {
    debug_assert!(bytes.len() >= block_bytes(format) as usize);
    match format {
        TexFormatE::Bc1 => decode_bc1(bytes),
        TexFormatE::Bc2 => decode_bc2(bytes),
        TexFormatE::Bc3 => decode_bc3(bytes),
        TexFormatE::Bc4 => decode_bc4(bytes),
        TexFormatE::Rgb565 => decode_rgb565(bytes),
        TexFormatE::Rgba8888 => decode_rgba8888(bytes),
        TexFormatE::R8 => decode_r8(bytes),
        TexFormatE::Rsvd7 => [Texel::TRANSPARENT_BLACK; 16],
    }
}

fn byte(bytes: &[u8], i: usize) -> u8 {
    bytes.get(i).copied().unwrap_or(0)
}

fn word_le(bytes: &[u8], i: usize) -> u16 {
    u16::from(byte(bytes, i)) | (u16::from(byte(bytes, i + 1)) << 8)
}

/// DXT-style 2/3-1/3 mix with rounded integer division.
fn mix_third(a: u8, b: u8) -> u8 {
    ((2 * u16::from(a) + u16::from(b) + 1) / 3) as u8
}

/// DXT-style 1/2-1/2 mix with rounded integer division.
fn mix_half(a: u8, b: u8) -> u8 {
    ((u16::from(a) + u16::from(b) + 1) / 2) as u8
}

/// The four-entry BC1 color palette for an endpoint pair.
///
/// `c0 > c1` (u16 word compare) selects the opaque 4-color mode;
/// otherwise entry 2 is the midpoint and entry 3 transparent black.
/// BC2/BC3 embed the same color block but always decode 4-color.
fn bc1_palette(c0: u16, c1: u16, force_four: bool) -> [Texel; 4] {
    let p0 = Texel::from_rgb565(c0);
    let p1 = Texel::from_rgb565(c1);
    if c0 > c1 || force_four {
        let p2 = Texel::new(
            mix_third(p0.r5(), p1.r5()),
            mix_third(p0.g6(), p1.g6()),
            mix_third(p0.b5(), p1.b5()),
            0x3,
        );
        let p3 = Texel::new(
            mix_third(p1.r5(), p0.r5()),
            mix_third(p1.g6(), p0.g6()),
            mix_third(p1.b5(), p0.b5()),
            0x3,
        );
        [p0, p1, p2, p3]
    } else {
        let p2 = Texel::new(
            mix_half(p0.r5(), p1.r5()),
            mix_half(p0.g6(), p1.g6()),
            mix_half(p0.b5(), p1.b5()),
            0x3,
        );
        [p0, p1, p2, Texel::TRANSPARENT_BLACK]
    }
}

/// Decode the BC1 color half shared by BC1/BC2/BC3: endpoints at
/// `offset`, 32-bit index word after them, 2 bits per texel.
fn bc1_color_texels(bytes: &[u8], offset: usize, force_four: bool) -> [Texel; 16] {
    let c0 = word_le(bytes, offset);
    let c1 = word_le(bytes, offset + 2);
    let palette = bc1_palette(c0, c1, force_four);
    let indices = u32::from(word_le(bytes, offset + 4))
        | (u32::from(word_le(bytes, offset + 6)) << 16);
    core::array::from_fn(|i| palette[((indices >> (2 * i)) & 0x3) as usize])
}

fn decode_bc1(bytes: &[u8]) -> [Texel; 16] {
    bc1_color_texels(bytes, 0, false)
}

fn decode_bc2(bytes: &[u8]) -> [Texel; 16] {
    let color = bc1_color_texels(bytes, 8, true);
    core::array::from_fn(|i| {
        // Explicit 4-bit alpha, truncated to 2 bits.
        let nibble = (byte(bytes, i / 2) >> ((i % 2) * 4)) & 0xF;
        Texel::new(color[i].r5(), color[i].g6(), color[i].b5(), nibble >> 2)
    })
}

/// The eight-entry BC3/BC4 alpha palette.
///
/// `a0 > a1` selects the 8-point ramp; otherwise a 6-point ramp with 0
/// and 255 pinned at the last two entries. Rounded integer division.
fn bc3_alpha_palette(a0: u8, a1: u8) -> [u8; 8] {
    let a0w = u16::from(a0);
    let a1w = u16::from(a1);
    if a0 > a1 {
        core::array::from_fn(|i| match i {
            0 => a0,
            1 => a1,
            i => (((8 - i as u16) * a0w + (i as u16 - 1) * a1w + 3) / 7) as u8,
        })
    } else {
        core::array::from_fn(|i| match i {
            0 => a0,
            1 => a1,
            2..=5 => (((6 - i as u16) * a0w + (i as u16 - 1) * a1w + 2) / 5) as u8,
            6 => 0,
            _ => 255,
        })
    }
}

/// Per-texel 8-bit alpha values of a BC3/BC4 alpha block at `offset`:
/// two endpoints then 48 bits of 3-bit indices.
fn bc3_alpha_texels(bytes: &[u8], offset: usize) -> [u8; 16] {
    let palette = bc3_alpha_palette(byte(bytes, offset), byte(bytes, offset + 1));
    let mut indices: u64 = 0;
    for i in 0..6 {
        indices |= u64::from(byte(bytes, offset + 2 + i)) << (8 * i);
    }
    core::array::from_fn(|i| palette[((indices >> (3 * i)) & 0x7) as usize])
}

fn decode_bc3(bytes: &[u8]) -> [Texel; 16] {
    let alpha = bc3_alpha_texels(bytes, 0);
    let color = bc1_color_texels(bytes, 8, true);
    core::array::from_fn(|i| {
        Texel::new(color[i].r5(), color[i].g6(), color[i].b5(), alpha[i] >> 6)
    })
}

fn decode_bc4(bytes: &[u8]) -> [Texel; 16] {
    let value = bc3_alpha_texels(bytes, 0);
    core::array::from_fn(|i| {
        // Single channel replicated to RGB by truncation, opaque alpha.
        let v = value[i];
        Texel::new(v >> 3, v >> 2, v >> 3, 0x3)
    })
}

fn decode_rgb565(bytes: &[u8]) -> [Texel; 16] {
    core::array::from_fn(|i| Texel::from_rgb565(word_le(bytes, 2 * i)))
}

fn decode_rgba8888(bytes: &[u8]) -> [Texel; 16] {
    core::array::from_fn(|i| {
        Texel::from_unorm8(
            byte(bytes, 4 * i),
            byte(bytes, 4 * i + 1),
            byte(bytes, 4 * i + 2),
            byte(bytes, 4 * i + 3),
        )
    })
}

fn decode_r8(bytes: &[u8]) -> [Texel; 16] {
    core::array::from_fn(|i| {
        let v = byte(bytes, i);
        Texel::new(v >> 3, v >> 2, v >> 3, 0x3)
    })
}
