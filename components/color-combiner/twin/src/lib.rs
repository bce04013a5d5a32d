//! Programmable color combiner.
//!
//! Two sequential cycles of the fixed equation (A - B) * C + D over
//! signed Q4.12 operands, evaluated independently for RGB and alpha and
//! saturated to the UNORM range [0, 0x1000]. Cycle 1 can read cycle 0's
//! saturated output through the COMBINED source; configured as
//! pass-through it leaves single-equation behavior.
//!
//! The two cycles are a chained 2-stage pipeline: a fragment advances
//! one stage per tick while the downstream consumer keeps draining;
//! when the output is not consumed every stage holds and nothing is
//! dropped.

use ember_registers::components::cc_rgb_c_source_e::CcRgbCSourceE;
use ember_registers::components::cc_source_e::CcSourceE;
use ember_registers::regs::CcModeReg;
use ember_twin_core::Rgba12;
use qfixed::{unorm, Q4_12};

/// Selector nibbles of one combiner cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleConfig {
    pub rgb_a: CcSourceE,
    pub rgb_b: CcSourceE,
    pub rgb_c: CcRgbCSourceE,
    pub rgb_d: CcSourceE,
    pub alpha_a: CcSourceE,
    pub alpha_b: CcSourceE,
    pub alpha_c: CcSourceE,
    pub alpha_d: CcSourceE,
}

/// Decoded CC_MODE register: one selector set per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinerConfig {
    pub cycle: [CycleConfig; 2],
}

impl Default for CombinerConfig {
    fn default() -> Self {
        Self::from_reg(CcModeReg::default())
    }
}

impl CombinerConfig {
    #[must_use]
    pub fn from_reg(reg: CcModeReg) -> Self {
        Self {
            cycle: [
                CycleConfig {
                    rgb_a: reg.c0_rgb_a(),
                    rgb_b: reg.c0_rgb_b(),
                    rgb_c: reg.c0_rgb_c(),
                    rgb_d: reg.c0_rgb_d(),
                    alpha_a: reg.c0_alpha_a(),
                    alpha_b: reg.c0_alpha_b(),
                    alpha_c: reg.c0_alpha_c(),
                    alpha_d: reg.c0_alpha_d(),
                },
                CycleConfig {
                    rgb_a: reg.c1_rgb_a(),
                    rgb_b: reg.c1_rgb_b(),
                    rgb_c: reg.c1_rgb_c(),
                    rgb_d: reg.c1_rgb_d(),
                    alpha_a: reg.c1_alpha_a(),
                    alpha_b: reg.c1_alpha_b(),
                    alpha_c: reg.c1_alpha_c(),
                    alpha_d: reg.c1_alpha_d(),
                },
            ],
        }
    }
}

/// Per-fragment operand bundle, everything already promoted to Q4.12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperandBundle {
    pub tex0: Rgba12,
    pub tex1: Rgba12,
    pub shade0: Rgba12,
    pub shade1: Rgba12,
    pub const0: Rgba12,
    pub const1: Rgba12,
}

/// One channel of (A - B) * C + D with Q4.12 fixed-point product
/// scaling and UNORM saturation. Intermediates are wide enough that
/// overflow saturates at the rails, never wraps.
#[must_use]
pub fn combine_channel(a: i16, b: i16, c: i16, d: i16) -> i16 {
    let diff = i32::from(a) - i32::from(b);
    let scaled = (diff * i32::from(c)) >> 12;
    unorm::saturate(scaled + i32::from(d))
}

fn select(src: CcSourceE, ops: &OperandBundle, combined: Rgba12) -> Rgba12 {
    match src {
        CcSourceE::Combined => combined,
        CcSourceE::Tex0 => ops.tex0,
        CcSourceE::Tex1 => ops.tex1,
        CcSourceE::Shade0 => ops.shade0,
        CcSourceE::Const0 => ops.const0,
        CcSourceE::Const1 => ops.const1,
        CcSourceE::One => Rgba12::ONE,
        CcSourceE::Shade1 => ops.shade1,
        // ZERO and every reserved encoding read as zero.
        _ => Rgba12::ZERO,
    }
}

fn select_rgb_c(src: CcRgbCSourceE, ops: &OperandBundle, combined: Rgba12) -> Rgba12 {
    match src {
        CcRgbCSourceE::Combined => combined,
        CcRgbCSourceE::Tex0 => ops.tex0,
        CcRgbCSourceE::Tex1 => ops.tex1,
        CcRgbCSourceE::Shade0 => ops.shade0,
        CcRgbCSourceE::Const0 => ops.const0,
        CcRgbCSourceE::Const1 => ops.const1,
        CcRgbCSourceE::One => Rgba12::ONE,
        CcRgbCSourceE::Tex0Alpha => ops.tex0.alpha_broadcast(),
        CcRgbCSourceE::Tex1Alpha => ops.tex1.alpha_broadcast(),
        CcRgbCSourceE::Shade0Alpha => ops.shade0.alpha_broadcast(),
        CcRgbCSourceE::Const0Alpha => ops.const0.alpha_broadcast(),
        CcRgbCSourceE::CombinedAlpha => combined.alpha_broadcast(),
        CcRgbCSourceE::Shade1 => ops.shade1,
        CcRgbCSourceE::Shade1Alpha => ops.shade1.alpha_broadcast(),
        CcRgbCSourceE::Zero | CcRgbCSourceE::Rsvd15 => Rgba12::ZERO,
    }
}

/// Evaluate one cycle for a bundle. `combined` is the previous cycle's
/// saturated result (zero in cycle 0).
#[must_use]
pub fn eval_cycle(cfg: &CycleConfig, ops: &OperandBundle, combined: Rgba12) -> Rgba12 {
    let a = select(cfg.rgb_a, ops, combined);
    let b = select(cfg.rgb_b, ops, combined);
    let c = select_rgb_c(cfg.rgb_c, ops, combined);
    let d = select(cfg.rgb_d, ops, combined);
    let aa = select(cfg.alpha_a, ops, combined).a;
    let ab = select(cfg.alpha_b, ops, combined).a;
    let ac = select(cfg.alpha_c, ops, combined).a;
    let ad = select(cfg.alpha_d, ops, combined).a;
    Rgba12 {
        r: Q4_12::from_raw(combine_channel(a.r.raw(), b.r.raw(), c.r.raw(), d.r.raw())),
        g: Q4_12::from_raw(combine_channel(a.g.raw(), b.g.raw(), c.g.raw(), d.g.raw())),
        b: Q4_12::from_raw(combine_channel(a.b.raw(), b.b.raw(), c.b.raw(), d.b.raw())),
        a: Q4_12::from_raw(combine_channel(aa.raw(), ab.raw(), ac.raw(), ad.raw())),
    }
}

/// Stage-1 register contents: the bundle plus cycle 0's saturated
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stage1 {
    ops: OperandBundle,
    combined0: Rgba12,
}

/// The two-stage combiner pipeline. Up to two fragments in flight, one
/// per cycle stage.
#[derive(Debug, Default)]
pub struct ColorCombiner {
    config: CombinerConfig,
    stage0: Option<OperandBundle>,
    stage1: Option<Stage1>,
}

impl ColorCombiner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a CC_MODE write.
    pub fn configure(&mut self, reg: CcModeReg) {
        self.config = CombinerConfig::from_reg(reg);
    }

    /// Cycle-0 stage free to accept a bundle this tick.
    #[must_use]
    pub fn input_ready(&self) -> bool {
        self.stage0.is_none()
    }

    /// Enter a fragment's operand bundle into cycle 0. Only legal when
    /// `input_ready`.
    pub fn push(&mut self, ops: OperandBundle) {
        debug_assert!(self.stage0.is_none());
        self.stage0 = Some(ops);
    }

    /// The cycle-1 result pending at the output, stable until taken.
    #[must_use]
    pub fn output(&self) -> Option<Rgba12> {
        self.stage1
            .as_ref()
            .map(|s| eval_cycle(&self.config.cycle[1], &s.ops, s.combined0))
    }

    /// Consume the pending result.
    pub fn take_output(&mut self) -> Option<Rgba12> {
        let result = self.output();
        if result.is_some() {
            self.stage1 = None;
        }
        result
    }

    /// Advance one clock. The cycle-0 stage moves into cycle 1 only
    /// when the downstream consumer has drained the previous result;
    /// otherwise every stage holds.
    pub fn tick(&mut self) {
        if self.stage1.is_none() {
            if let Some(ops) = self.stage0.take() {
                let combined0 = eval_cycle(&self.config.cycle[0], &ops, Rgba12::ZERO);
                self.stage1 = Some(Stage1 { ops, combined0 });
            }
        }
    }
}
