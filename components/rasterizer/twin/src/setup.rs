//! Triangle setup: edge coefficients, bounding box, and the 13
//! attribute gradient pairs.
//!
//! All the multiplications of a triangle happen here; the walk itself
//! advances by addition only.

use ember_twin_core::{Triangle, Vertex};
use qfixed::saturate_i16;

/// Interpolated scalar count: COLOR0 RGBA, COLOR1 RGB (specular alpha
/// stays flat), depth, two UV pairs, divisor.
pub const ATTR_COUNT: usize = 13;

pub const ATTR_C0R: usize = 0;
pub const ATTR_C0G: usize = 1;
pub const ATTR_C0B: usize = 2;
pub const ATTR_C0A: usize = 3;
pub const ATTR_C1R: usize = 4;
pub const ATTR_C1G: usize = 5;
pub const ATTR_C1B: usize = 6;
pub const ATTR_Z: usize = 7;
pub const ATTR_U0: usize = 8;
pub const ATTR_V0: usize = 9;
pub const ATTR_U1: usize = 10;
pub const ATTR_V1: usize = 11;
pub const ATTR_Q: usize = 12;

/// Inclusive pixel-coordinate clip rectangle (scissor intersected with
/// the render target). Empty when `x1 < x0` or `y1 < y0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl ClipRect {
    pub const EMPTY: Self = Self {
        x0: 0,
        y0: 0,
        x1: -1,
        y1: -1,
    };

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }

    /// Intersection of two rectangles.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }
}

/// One edge function E(x,y) = A*x + B*y + C over S12.4 coordinates.
///
/// The constant comes from the endpoint cross-product, so E is zero on
/// the edge and positive on the interior side for the accepted winding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: i32,
    pub b: i32,
    pub c: i64,
}

impl Edge {
    /// The edge from `from` to `to`.
    #[must_use]
    pub fn between(from: &Vertex, to: &Vertex) -> Self {
        let (x0, y0) = (i64::from(from.x.raw()), i64::from(from.y.raw()));
        let (x1, y1) = (i64::from(to.x.raw()), i64::from(to.y.raw()));
        Self {
            a: (y0 - y1) as i32,
            b: (x1 - x0) as i32,
            c: x0 * y1 - x1 * y0,
        }
    }

    /// Direct evaluation at a pixel center (raw products are 24.8).
    #[must_use]
    pub fn eval(&self, px: i32, py: i32) -> i64 {
        i64::from(self.a) * i64::from(px << 4) + i64::from(self.b) * i64::from(py << 4) + self.c
    }
}

/// Per-triangle constants: edges, clamped bounding box, attribute start
/// values and gradients. Built once at accept time; immutable during
/// the walk.
#[derive(Debug, Clone, Copy)]
pub struct TriangleSetup {
    pub edges: [Edge; 3],
    /// Clamped bounding box; empty for fully clipped triangles.
    pub bbox: ClipRect,
    /// Accumulator start values at the bounding-box origin pixel, x.16.
    pub init: [i32; ATTR_COUNT],
    /// Per-pixel-right accumulator deltas, x.16.
    pub ddx: [i32; ATTR_COUNT],
    /// Per-row-down accumulator deltas, x.16.
    pub ddy: [i32; ATTR_COUNT],
    /// Flat specular alpha (UNORM8, from v0).
    pub c1_alpha: u8,
    /// A zero inverse area marks the triangle degenerate: it completes
    /// without producing fragments.
    pub degenerate: bool,
}

/// Raw per-vertex values of one interpolated scalar, in accumulator
/// units (colors UNORM8, depth u16, UV/Q fixed-point raw).
fn attr_values(v: &Vertex, index: usize) -> i32 {
    match index {
        ATTR_C0R => i32::from(v.color0.r()),
        ATTR_C0G => i32::from(v.color0.g()),
        ATTR_C0B => i32::from(v.color0.b()),
        ATTR_C0A => i32::from(v.color0.a()),
        ATTR_C1R => i32::from(v.color1.r()),
        ATTR_C1G => i32::from(v.color1.g()),
        ATTR_C1B => i32::from(v.color1.b()),
        ATTR_Z => i32::from(v.z),
        ATTR_U0 => i32::from(v.uv0.0.raw()),
        ATTR_V0 => i32::from(v.uv0.1.raw()),
        ATTR_U1 => i32::from(v.uv1.0.raw()),
        ATTR_V1 => i32::from(v.uv1.1.raw()),
        _ => i32::from(v.q.raw()),
    }
}

impl TriangleSetup {
    /// Run setup for a submitted triangle against a clip rectangle.
    /// `gouraud` off forces the color gradients to zero so every
    /// fragment carries v0's colors.
    #[must_use]
    pub fn new(tri: &Triangle, clip: &ClipRect, gouraud: bool) -> Self {
        let [v0, v1, v2] = &tri.v;
        let edges = [
            Edge::between(v0, v1),
            Edge::between(v1, v2),
            Edge::between(v2, v0),
        ];
        let bbox = vertex_bbox(&tri.v).intersect(clip);
        let degenerate = tri.inv_area.raw() == 0 || bbox.is_empty();

        let shift = u32::from(tri.area_shift);
        let inv_area = i64::from(tri.inv_area.raw());

        let mut init = [0i32; ATTR_COUNT];
        let mut ddx = [0i32; ATTR_COUNT];
        let mut ddy = [0i32; ATTR_COUNT];
        for i in 0..ATTR_COUNT {
            let a0 = attr_values(v0, i);
            let d1 = i64::from(attr_values(v1, i) - a0);
            let d2 = i64::from(attr_values(v2, i) - a0);
            if !gouraud && i <= ATTR_C1B {
                init[i] = a0 << 16;
                continue;
            }
            // Gradient numerators from vertex deltas and the opposing
            // edge coefficients (the >> 4 drops the 12.4 scaling of
            // A/B back to pixel units).
            let nx = d1 * i64::from(edges[2].a) + d2 * i64::from(edges[0].a);
            let ny = d2 * i64::from(edges[0].b) + d1 * i64::from(edges[2].b);
            let gx = gradient(nx, shift, inv_area);
            let gy = gradient(ny, shift, inv_area);
            ddx[i] = gx;
            ddy[i] = gy;
            // Start value: v0's attribute walked to the bounding-box
            // origin pixel center.
            let dx_raw = i64::from((bbox.x0 << 4) - i32::from(v0.x.raw()));
            let dy_raw = i64::from((bbox.y0 << 4) - i32::from(v0.y.raw()));
            let walked = (i64::from(a0) << 16)
                + ((i64::from(gx) * dx_raw) >> 4)
                + ((i64::from(gy) * dy_raw) >> 4);
            init[i] = walked as i32;
        }

        Self {
            edges,
            bbox,
            init,
            ddx,
            ddy,
            c1_alpha: v0.color1.a(),
            degenerate,
        }
    }

    /// Direct (non-incremental) accumulator evaluation at a pixel of
    /// the bounding box; the walk must match this bit-for-bit.
    #[must_use]
    pub fn attr_at(&self, index: usize, px: i32, py: i32) -> i32 {
        self.init[index]
            .wrapping_add(self.ddx[index].wrapping_mul(px - self.bbox.x0))
            .wrapping_add(self.ddy[index].wrapping_mul(py - self.bbox.y0))
    }

    /// Interior test: every edge non-negative (ties count as inside).
    #[must_use]
    pub fn interior(&self, px: i32, py: i32) -> bool {
        self.edges.iter().all(|e| e.eval(px, py) >= 0)
    }
}

/// One gradient: barrel-shifted numerator times the inverse area.
///
/// The numerator carries one 12.4 coordinate factor (>> 4), and the
/// host's AREA_SHIFT bounds the product term to the hardware's 16x16
/// multiply; the UQ0.16 inverse-area multiply then leaves an x.16
/// fixed-point per-pixel delta.
fn gradient(num: i64, area_shift: u32, inv_area: i64) -> i32 {
    let n = i64::from(saturate_i16(((num >> 4) >> area_shift) as i32));
    (n * inv_area) as i32
}

/// Vertex extent in pixel coordinates: centers from the first covered
/// center up to the last one.
fn vertex_bbox(v: &[Vertex; 3]) -> ClipRect {
    let xs = [v[0].x.raw(), v[1].x.raw(), v[2].x.raw()];
    let ys = [v[0].y.raw(), v[1].y.raw(), v[2].y.raw()];
    let min_x = *xs.iter().min().unwrap_or(&0);
    let max_x = *xs.iter().max().unwrap_or(&0);
    let min_y = *ys.iter().min().unwrap_or(&0);
    let max_y = *ys.iter().max().unwrap_or(&0);
    ClipRect {
        x0: (i32::from(min_x) + 15) >> 4,
        y0: (i32::from(min_y) + 15) >> 4,
        x1: i32::from(max_x) >> 4,
        y1: i32::from(max_y) >> 4,
    }
}
