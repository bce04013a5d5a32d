//! Texture sampler front-end.
//!
//! Turns a fragment's Q4.12 UV pair and Q3.12 perspective divisor into
//! texel coordinates (perspective divide, size scaling, per-axis wrap),
//! then resolves the texel through the sampler's decoded-block cache.
//! A disabled sampler never touches the cache and reads as opaque
//! white, so a MODULATE combiner setup degenerates to pass-through.

use ember_registers::components::tex_format_e::TexFormatE;
use ember_registers::components::wrap_mode_e::WrapModeE;
use ember_registers::regs::TexCfgReg;
use ember_tex_cache::{BlockKey, TexCache};
use ember_twin_core::Texel;
use qfixed::{saturate_i16, Q3_12, Q4_12};

/// Decoded per-sampler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    pub enable: bool,
    pub format: TexFormatE,
    pub width_log2: u8,
    pub height_log2: u8,
    pub u_wrap: WrapModeE,
    pub v_wrap: WrapModeE,
    /// Base address in 512-byte units.
    pub base_512: u16,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::from_reg(TexCfgReg::default())
    }
}

impl SamplerConfig {
    #[must_use]
    pub fn from_reg(reg: TexCfgReg) -> Self {
        Self {
            enable: reg.enable(),
            format: reg.format(),
            width_log2: reg.width_log2(),
            height_log2: reg.height_log2(),
            u_wrap: reg.u_wrap(),
            v_wrap: reg.v_wrap(),
            base_512: reg.base_addr(),
        }
    }

    /// A reserved format code reads as a disabled sampler.
    #[must_use]
    pub fn active(&self) -> bool {
        self.enable && self.format != TexFormatE::Rsvd7
    }
}

/// Perspective-divide one Q4.12 coordinate by a Q3.12 divisor,
/// saturating to the representable range. A zero divisor means affine:
/// the coordinate passes through.
#[must_use]
pub fn perspective_divide(c: Q4_12, q: Q3_12) -> Q4_12 {
    if q.raw() == 0 {
        return c;
    }
    let wide = (i32::from(c.raw()) << 12) / i32::from(q.raw());
    Q4_12::from_raw(saturate_i16(wide))
}

/// Apply a wrap mode over a power-of-two axis.
#[must_use]
pub fn wrap_axis(coord: i32, size_log2: u8, mode: WrapModeE) -> u16 {
    let size = 1i32 << size_log2;
    let wrapped = match mode {
        WrapModeE::Repeat => coord & (size - 1),
        WrapModeE::ClampToEdge => coord.clamp(0, size - 1),
        // Octahedral decodes but behaves as mirror: single-level
        // sampling has no diagonal coupling.
        WrapModeE::Mirror | WrapModeE::Octahedral => {
            let m = coord.rem_euclid(2 * size);
            if m < size {
                m
            } else {
                2 * size - 1 - m
            }
        }
    };
    wrapped as u16
}

/// Resolve a UV pair to integer texel coordinates.
#[must_use]
pub fn texel_coords(cfg: &SamplerConfig, uv: (Q4_12, Q4_12), q: Q3_12) -> (u16, u16) {
    let u = perspective_divide(uv.0, q);
    let v = perspective_divide(uv.1, q);
    // Scale to texel space: drop the 12 fraction bits after the
    // power-of-two size shift.
    let tx = (i32::from(u.raw()) << cfg.width_log2) >> 12;
    let ty = (i32::from(v.raw()) << cfg.height_log2) >> 12;
    (
        wrap_axis(tx, cfg.width_log2, cfg.u_wrap),
        wrap_axis(ty, cfg.height_log2, cfg.v_wrap),
    )
}

/// Outcome of one sampler access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleResult {
    /// The texel is available this cycle.
    Texel(Texel),
    /// Cache miss; a fill is in flight. Retry after `fill_done`.
    Miss,
}

/// One texture unit: configuration plus its private L1 cache.
#[derive(Default)]
pub struct Sampler {
    pub cfg: SamplerConfig,
    pub cache: TexCache,
}

impl Sampler {
    /// Apply a TEX_CFG write. Invalidates the cache unconditionally.
    pub fn configure(&mut self, reg: TexCfgReg) {
        self.cfg = SamplerConfig::from_reg(reg);
        self.cache.invalidate();
    }

    /// Look up the texel for a fragment's UV/Q. On a miss the fill FSM
    /// is started (if idle) and the caller must retry the identical
    /// lookup once the fill completes.
    pub fn sample(&mut self, uv: (Q4_12, Q4_12), q: Q3_12) -> SampleResult {
        if !self.cfg.active() {
            return SampleResult::Texel(Texel::OPAQUE_WHITE);
        }
        let (tx, ty) = texel_coords(&self.cfg, uv, q);
        let key = BlockKey {
            base_512: self.cfg.base_512,
            block_x: tx >> 2,
            block_y: ty >> 2,
        };
        match self.cache.lookup(key, tx, ty) {
            Some(quad) => SampleResult::Texel(quad.select(tx, ty)),
            None => {
                if self.cache.is_idle() {
                    self.cache
                        .start_fill(key, self.cfg.format, self.cfg.width_log2);
                }
                SampleResult::Miss
            }
        }
    }
}
