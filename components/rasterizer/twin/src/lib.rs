//! Rasterizer: incremental edge walk and attribute interpolation.
//!
//! Accepts one triangle when idle, walks its clamped bounding box in
//! row-major order one pixel per tick, and offers a fragment for every
//! interior pixel over a valid/ready handshake. All multiplications
//! happen in setup; the walk advances edge values and the 13 attribute
//! accumulators by addition only.

pub mod setup;

use ember_twin_core::{Fragment, Rgba12, Triangle};
use qfixed::{saturate_i16, unorm, Q3_12, Q4_12};

pub use setup::{ClipRect, TriangleSetup};
use setup::{
    ATTR_C0A, ATTR_C0B, ATTR_C0G, ATTR_C0R, ATTR_C1B, ATTR_C1G, ATTR_C1R, ATTR_COUNT, ATTR_Q,
    ATTR_U0, ATTR_U1, ATTR_V0, ATTR_V1, ATTR_Z,
};

/// The in-flight walk state: current scan position plus the running
/// edge values and attribute accumulators for the pixel and for the
/// start of the current row.
#[derive(Debug, Clone, Copy)]
struct Walk {
    setup: TriangleSetup,
    x: i32,
    y: i32,
    /// Edge values at (x, y).
    edges: [i64; 3],
    /// Edge values at (bbox.x0, y); reloaded per row.
    row_edges: [i64; 3],
    attrs: [i32; ATTR_COUNT],
    row_attrs: [i32; ATTR_COUNT],
}

#[derive(Debug, Clone, Copy)]
enum State {
    Idle,
    Walking(Walk),
}

/// The rasterizer component. One triangle in flight at most; the
/// pending output fragment never changes until it is taken.
pub struct Rasterizer {
    state: State,
    out: Option<Fragment>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            out: None,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle) && self.out.is_none()
    }

    /// Offer a triangle. Returns false (and changes nothing) while a
    /// previous triangle is still in flight; the caller resubmits the
    /// identical triangle until accepted.
    pub fn submit(&mut self, tri: &Triangle, clip: &ClipRect, gouraud: bool) -> bool {
        if !self.is_idle() {
            return false;
        }
        let setup = TriangleSetup::new(tri, clip, gouraud);
        if setup.degenerate {
            // Zero-area or fully clipped: completes with no fragments.
            return true;
        }
        let edges = [
            setup.edges[0].eval(setup.bbox.x0, setup.bbox.y0),
            setup.edges[1].eval(setup.bbox.x0, setup.bbox.y0),
            setup.edges[2].eval(setup.bbox.x0, setup.bbox.y0),
        ];
        self.state = State::Walking(Walk {
            setup,
            x: setup.bbox.x0,
            y: setup.bbox.y0,
            edges,
            row_edges: edges,
            attrs: setup.init,
            row_attrs: setup.init,
        });
        true
    }

    /// The pending fragment, if any.
    #[must_use]
    pub fn output(&self) -> Option<&Fragment> {
        self.out.as_ref()
    }

    /// Accept the pending fragment (the consumer's ready side of the
    /// handshake).
    pub fn take_output(&mut self) -> Option<Fragment> {
        self.out.take()
    }

    /// Advance one clock. While a fragment is pending the scan holds;
    /// otherwise one bounding-box pixel is visited.
    pub fn tick(&mut self) {
        if self.out.is_some() {
            return;
        }
        let State::Walking(ref mut walk) = self.state else {
            return;
        };

        if walk.edges[0] >= 0 && walk.edges[1] >= 0 && walk.edges[2] >= 0 {
            self.out = Some(emit(walk));
        }

        // Advance row-major: +A per step right, row registers advance
        // by +B and reload at each new scan line.
        if walk.x < walk.setup.bbox.x1 {
            walk.x += 1;
            for (e, edge) in walk.edges.iter_mut().zip(&walk.setup.edges) {
                *e += i64::from(edge.a) << 4;
            }
            for (acc, d) in walk.attrs.iter_mut().zip(&walk.setup.ddx) {
                *acc = acc.wrapping_add(*d);
            }
        } else if walk.y < walk.setup.bbox.y1 {
            walk.x = walk.setup.bbox.x0;
            walk.y += 1;
            for (e, edge) in walk.row_edges.iter_mut().zip(&walk.setup.edges) {
                *e += i64::from(edge.b) << 4;
            }
            walk.edges = walk.row_edges;
            for (acc, d) in walk.row_attrs.iter_mut().zip(&walk.setup.ddy) {
                *acc = acc.wrapping_add(*d);
            }
            walk.attrs = walk.row_attrs;
        } else {
            self.state = State::Idle;
        }
    }

    /// Run the whole triangle with an always-ready consumer, collecting
    /// every fragment. Test/tool convenience; the pipeline uses
    /// `tick`/`take_output`.
    pub fn drain(&mut self) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        while !self.is_idle() {
            self.tick();
            if let Some(frag) = self.take_output() {
                fragments.push(frag);
            }
        }
        fragments
    }
}

/// Package the current accumulators as a fragment, promoting each
/// scalar to its external format: colors clamp to UNORM8 then promote
/// to Q4.12, depth clamps to u16, UV/Q saturate to their signed raw
/// range.
fn emit(walk: &Walk) -> Fragment {
    let color = |i: usize| {
        let v = (walk.attrs[i] >> 16).clamp(0, 0xFF) as u8;
        Q4_12::from_raw(unorm::promote8(v) as i16)
    };
    let signed = |i: usize| saturate_i16(walk.attrs[i] >> 16);
    Fragment {
        x: walk.x as u16,
        y: walk.y as u16,
        z: (walk.attrs[ATTR_Z] >> 16).clamp(0, 0xFFFF) as u16,
        color0: Rgba12 {
            r: color(ATTR_C0R),
            g: color(ATTR_C0G),
            b: color(ATTR_C0B),
            a: color(ATTR_C0A),
        },
        color1: Rgba12 {
            r: color(ATTR_C1R),
            g: color(ATTR_C1G),
            b: color(ATTR_C1B),
            a: Q4_12::from_raw(unorm::promote8(walk.setup.c1_alpha) as i16),
        },
        uv0: (
            Q4_12::from_raw(signed(ATTR_U0)),
            Q4_12::from_raw(signed(ATTR_V0)),
        ),
        uv1: (
            Q4_12::from_raw(signed(ATTR_U1)),
            Q4_12::from_raw(signed(ATTR_V1)),
        ),
        q: Q3_12::from_raw(signed(ATTR_Q)),
    }
}
