//! Host-side helpers: the arithmetic the driver performs before
//! programming the core, plus texture upload in the block-tiled layout.

use ember_memory::Memory;
use ember_registers::regs::AreaSetupReg;
use ember_twin_core::Vertex;

/// Compute AREA_SETUP for a triangle the way the driver does: the
/// doubled signed area in pixel units, barrel-shifted until both it and
/// the worst-case interpolator numerator fit the hardware multiplier,
/// and its rounded UQ0.16 reciprocal.
///
/// A non-positive area yields INV_AREA = 0; the core treats that as a
/// degenerate triangle.
#[must_use]
pub fn area_setup(v: &[Vertex; 3]) -> AreaSetupReg {
    let (x0, y0) = (i64::from(v[0].x.pixel()), i64::from(v[0].y.pixel()));
    let (x1, y1) = (i64::from(v[1].x.pixel()), i64::from(v[1].y.pixel()));
    let (x2, y2) = (i64::from(v[2].x.pixel()), i64::from(v[2].y.pixel()));
    let double_area = (x1 - x0) * (y2 - y0) - (y1 - y0) * (x2 - x0);

    let mut reg = AreaSetupReg::default();
    if double_area <= 0 {
        return reg;
    }

    // Worst-case gradient numerator across the interpolated scalars:
    // two delta-times-extent terms per axis.
    let extent = (x1 - x0)
        .abs()
        .max((x2 - x0).abs())
        .max((y1 - y0).abs())
        .max((y2 - y0).abs());
    let max_delta = worst_attr_delta(v);
    let worst_numerator = 2 * max_delta * extent;

    let mut shift = 0u8;
    while shift < 15
        && ((double_area >> shift) > 0xFFFF || (worst_numerator >> shift) > 0x7FFF)
    {
        shift += 1;
    }
    let shifted = double_area >> shift;
    let inv_area = if shifted == 0 {
        0xFFFF
    } else {
        ((65536 + shifted / 2) / shifted).min(0xFFFF) as u16
    };
    reg.set_inv_area(inv_area);
    reg.set_area_shift(shift);
    reg
}

fn worst_attr_delta(v: &[Vertex; 3]) -> i64 {
    let mut worst: i64 = 0;
    for (a, b) in [(&v[0], &v[1]), (&v[0], &v[2])] {
        let deltas = [
            i64::from(a.color0.r()) - i64::from(b.color0.r()),
            i64::from(a.color0.g()) - i64::from(b.color0.g()),
            i64::from(a.color0.b()) - i64::from(b.color0.b()),
            i64::from(a.color0.a()) - i64::from(b.color0.a()),
            i64::from(a.color1.r()) - i64::from(b.color1.r()),
            i64::from(a.color1.g()) - i64::from(b.color1.g()),
            i64::from(a.color1.b()) - i64::from(b.color1.b()),
            i64::from(a.z) - i64::from(b.z),
            i64::from(a.uv0.0.raw()) - i64::from(b.uv0.0.raw()),
            i64::from(a.uv0.1.raw()) - i64::from(b.uv0.1.raw()),
            i64::from(a.uv1.0.raw()) - i64::from(b.uv1.0.raw()),
            i64::from(a.uv1.1.raw()) - i64::from(b.uv1.1.raw()),
            i64::from(a.q.raw()) - i64::from(b.q.raw()),
        ];
        for d in deltas {
            worst = worst.max(d.abs());
        }
    }
    // The 12.4 coordinate factor divides back out in setup.
    worst
}

/// Upload a linear row-major RGB565 image into the 4x4 block-tiled
/// texture layout at a 512-byte-aligned base.
pub fn upload_rgb565_texture(
    mem: &mut Memory,
    base_512: u16,
    width: usize,
    height: usize,
    pixels: &[u16],
) {
    debug_assert!(width % 4 == 0 && height % 4 == 0);
    debug_assert!(pixels.len() >= width * height);
    let base = u32::from(base_512) * 256;
    let blocks_per_row = width / 4;
    for (i, &pixel) in pixels.iter().take(width * height).enumerate() {
        let (x, y) = (i % width, i / width);
        let block_index = (y / 4) * blocks_per_row + x / 4;
        let local = (y % 4) * 4 + x % 4;
        mem.write(base + (block_index * 16 + local) as u32, pixel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_twin_core::color::Argb8;
    use qfixed::{Q12_4, Q3_12, Q4_12};

    fn vertex(x: i16, y: i16, z: u16) -> Vertex {
        Vertex {
            x: Q12_4::from_pixel(x),
            y: Q12_4::from_pixel(y),
            z,
            color0: Argb8::new(0xFF, 0xFF, 0xFF, 0xFF),
            color1: Argb8::default(),
            uv0: (Q4_12::ZERO, Q4_12::ZERO),
            uv1: (Q4_12::ZERO, Q4_12::ZERO),
            q: Q3_12::ZERO,
        }
    }

    #[test]
    fn small_triangle_needs_no_shift() {
        let reg = area_setup(&[vertex(0, 0, 0), vertex(16, 0, 0), vertex(0, 16, 0)]);
        assert_eq!(reg.area_shift(), 0);
        assert_eq!(reg.inv_area(), 256);
    }

    #[test]
    fn wrong_winding_is_degenerate() {
        let reg = area_setup(&[vertex(0, 0, 0), vertex(0, 16, 0), vertex(16, 0, 0)]);
        assert_eq!(reg.inv_area(), 0);
    }

    #[test]
    fn steep_attribute_forces_shift() {
        let reg = area_setup(&[
            vertex(0, 0, 0),
            vertex(16, 0, 0xFFFF),
            vertex(0, 16, 0),
        ]);
        // Z numerator 2*65535*16 needs the barrel shift even though the
        // area alone fits.
        assert!(reg.area_shift() > 0);
    }

    #[test]
    fn tiled_upload_places_first_block_contiguously() {
        let mut mem = Memory::with_words(4096);
        let pixels: Vec<u16> = (0..256).map(|i| i as u16).collect();
        upload_rgb565_texture(&mut mem, 0, 16, 16, &pixels);
        // Linear (1,0) is texel 1 of block 0.
        assert_eq!(mem.read(1), 1);
        // Linear (0,1) = pixel 16 is local (0,1) of block 0 = word 4.
        assert_eq!(mem.read(4), 16);
        // Linear (4,0) opens block 1 at word 16.
        assert_eq!(mem.read(16), 4);
    }
}
