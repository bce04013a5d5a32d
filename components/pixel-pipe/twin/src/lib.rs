//! Per-fragment pixel pipeline orchestration.
//!
//! A state machine holding at most one fragment, sequencing: stipple
//! test, depth-range window, early depth test (with its Z-buffer read),
//! texture lookups (stalling across cache fills), the two-cycle color
//! combiner, alpha test, blending (with its framebuffer read), ordered
//! dithering, and the independently gated color/depth writebacks at the
//! fragment's tiled addresses. Discard at any step is a normal terminal
//! outcome; the machine simply returns to idle.

pub mod blend;
pub mod depth;
pub mod dither;
pub mod stipple;

use ember_color_combiner::{ColorCombiner, OperandBundle};
use ember_memory::Arbiter;
use ember_registers::regs::{
    ConstColorReg, FbConfigReg, RenderModeReg, StipplePatternReg, ZRangeReg,
};
use ember_texture::{SampleResult, Sampler};
use ember_twin_core::mem::{MemRequest, PortEvent, PortId};
use ember_twin_core::{tiled, Fragment, Rgba12};

/// The register state the pipeline consumes, snapshotted by the
/// integration layer. Read-only to the core.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipeConfig {
    pub render_mode: RenderModeReg,
    pub z_range: ZRangeReg,
    pub stipple: StipplePatternReg,
    pub fb: FbConfigReg,
    pub const_color: ConstColorReg,
}

impl PipeConfig {
    fn color_word_addr(&self, x: u16, y: u16) -> u32 {
        tiled::surface_word_addr(self.fb.color_base(), self.fb.width_log2(), x, y)
    }

    fn z_word_addr(&self, x: u16, y: u16) -> u32 {
        tiled::surface_word_addr(self.fb.z_base(), self.fb.width_log2(), x, y)
    }
}

/// Discard/write counters for frame statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipeStats {
    pub accepted: u64,
    pub stippled: u64,
    pub z_range_rejected: u64,
    pub z_failed: u64,
    pub alpha_failed: u64,
    pub written: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PipeState {
    Idle,
    /// Early depth test: waiting for the Z word.
    ZRead,
    /// Texture lookup on one unit, stalling across fills.
    Tex { unit: usize },
    /// Combiner occupancy for this fragment; `pushed` is the
    /// result-pending flag that keeps a result from being consumed
    /// twice (or a stale one from being consumed at all).
    Combine { pushed: bool },
    /// Blend destination read in flight.
    BlendRead,
    /// Writeback with per-surface completion tracking.
    Writeback { color_done: bool, z_done: bool },
}

/// The pipeline FSM. One fragment in flight at most.
pub struct PixelPipe {
    state: PipeState,
    frag: Fragment,
    tex: [Rgba12; 2],
    combined: Rgba12,
    dst_word: u16,
    pub stats: PipeStats,
}

impl Default for PixelPipe {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelPipe {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: PipeState::Idle,
            frag: Fragment::default(),
            tex: [Rgba12::ZERO; 2],
            combined: Rgba12::ZERO,
            dst_word: 0,
            stats: PipeStats::default(),
        }
    }

    /// Ready to accept the next fragment.
    #[must_use]
    pub fn ready(&self) -> bool {
        matches!(self.state, PipeState::Idle)
    }

    /// Accept a fragment and run the combinational front tests. A
    /// stipple or depth-range rejection discards immediately; NEVER
    /// depth compares discard without a memory read.
    pub fn accept(&mut self, frag: Fragment, cfg: &PipeConfig) {
        debug_assert!(self.ready());
        self.stats.accepted += 1;

        if cfg.render_mode.stipple_en()
            && !stipple::stipple_pass(cfg.stipple.pattern(), frag.x, frag.y)
        {
            self.stats.stippled += 1;
            return;
        }
        if !depth::z_range_pass(frag.z, cfg.z_range.z_min(), cfg.z_range.z_max()) {
            self.stats.z_range_rejected += 1;
            return;
        }

        let func = cfg.render_mode.z_compare();
        self.frag = frag;
        if depth::z_needs_read(cfg.render_mode.z_test_en(), func) {
            self.state = PipeState::ZRead;
        } else if cfg.render_mode.z_test_en() && !depth::z_compare(func, frag.z, 0) {
            // NEVER: no read, unconditional discard.
            self.stats.z_failed += 1;
        } else {
            self.state = PipeState::Tex { unit: 0 };
        }
    }

    /// Advance one clock. Drives the sampler fill ports, the combiner
    /// pipeline, and the memory ports this fragment owns.
    pub fn tick(
        &mut self,
        cfg: &PipeConfig,
        samplers: &mut [Sampler; 2],
        combiner: &mut ColorCombiner,
        arb: &mut Arbiter,
    ) {
        // Sampler cache fill plumbing runs every cycle regardless of
        // the fragment state.
        for (unit, sampler) in samplers.iter_mut().enumerate() {
            let port = if unit == 0 {
                PortId::Tex0Fill
            } else {
                PortId::Tex1Fill
            };
            if let Some(event) = arb.take_event(port) {
                sampler.cache.port_event(event);
            }
            sampler.cache.tick();
            if let Some(req) = sampler.cache.mem_request() {
                if !arb.pending(port) {
                    arb.request(port, req);
                }
            }
        }
        combiner.tick();

        match self.state {
            PipeState::Idle => {}
            PipeState::ZRead => self.tick_z_read(cfg, arb),
            PipeState::Tex { unit } => self.tick_tex(cfg, samplers, unit),
            PipeState::Combine { pushed } => self.tick_combine(cfg, combiner, pushed),
            PipeState::BlendRead => self.tick_blend_read(cfg, arb),
            PipeState::Writeback { color_done, z_done } => {
                self.tick_writeback(cfg, arb, color_done, z_done);
            }
        }
    }

    fn tick_z_read(&mut self, cfg: &PipeConfig, arb: &mut Arbiter) {
        match arb.take_event(PortId::ZRead) {
            Some(PortEvent::ReadData(stored)) => {
                let func = cfg.render_mode.z_compare();
                if depth::z_compare(func, self.frag.z, stored) {
                    self.state = PipeState::Tex { unit: 0 };
                } else {
                    self.stats.z_failed += 1;
                    self.state = PipeState::Idle;
                }
            }
            _ => {
                if !arb.pending(PortId::ZRead) {
                    arb.request(
                        PortId::ZRead,
                        MemRequest::ReadWord {
                            addr: cfg.z_word_addr(self.frag.x, self.frag.y),
                        },
                    );
                }
            }
        }
    }

    fn tick_tex(&mut self, _cfg: &PipeConfig, samplers: &mut [Sampler; 2], unit: usize) {
        let uv = if unit == 0 {
            self.frag.uv0
        } else {
            self.frag.uv1
        };
        match samplers[unit].sample(uv, self.frag.q) {
            SampleResult::Texel(texel) => {
                self.tex[unit] = texel.to_rgba12();
                self.state = if unit == 0 {
                    PipeState::Tex { unit: 1 }
                } else {
                    PipeState::Combine { pushed: false }
                };
            }
            // Fill in flight; retry the identical lookup next cycle.
            SampleResult::Miss => {}
        }
    }

    fn tick_combine(&mut self, cfg: &PipeConfig, combiner: &mut ColorCombiner, pushed: bool) {
        if !pushed {
            if combiner.input_ready() {
                combiner.push(OperandBundle {
                    tex0: self.tex[0],
                    tex1: self.tex[1],
                    shade0: self.frag.color0,
                    shade1: self.frag.color1,
                    const0: Rgba12::from_rgba_word(cfg.const_color.const0_rgba()),
                    const1: Rgba12::from_rgba_word(cfg.const_color.const1_rgba()),
                });
                self.state = PipeState::Combine { pushed: true };
            }
            return;
        }
        // Consume the result exactly once; `pushed` goes false with it,
        // so a later fragment can never see this value again.
        let Some(result) = combiner.take_output() else {
            return;
        };
        self.combined = result;

        if !alpha_test::alpha_test_pass(
            cfg.render_mode.alpha_test_func(),
            result.a.raw(),
            cfg.render_mode.alpha_ref(),
        ) {
            self.stats.alpha_failed += 1;
            self.state = PipeState::Idle;
            return;
        }

        if cfg.render_mode.color_write_en() && blend::needs_dst_read(cfg.render_mode.alpha_blend())
        {
            self.state = PipeState::BlendRead;
        } else {
            self.state = PipeState::Writeback {
                color_done: false,
                z_done: false,
            };
        }
    }

    fn tick_blend_read(&mut self, cfg: &PipeConfig, arb: &mut Arbiter) {
        match arb.take_event(PortId::ColorRead) {
            Some(PortEvent::ReadData(dst)) => {
                self.dst_word = dst;
                self.state = PipeState::Writeback {
                    color_done: false,
                    z_done: false,
                };
            }
            _ => {
                if !arb.pending(PortId::ColorRead) {
                    arb.request(
                        PortId::ColorRead,
                        MemRequest::ReadWord {
                            addr: cfg.color_word_addr(self.frag.x, self.frag.y),
                        },
                    );
                }
            }
        }
    }

    fn tick_writeback(
        &mut self,
        cfg: &PipeConfig,
        arb: &mut Arbiter,
        mut color_done: bool,
        mut z_done: bool,
    ) {
        if !color_done {
            if !cfg.render_mode.color_write_en() {
                color_done = true;
            } else if arb.take_event(PortId::ColorWrite) == Some(PortEvent::WriteDone) {
                color_done = true;
            } else if !arb.pending(PortId::ColorWrite) {
                arb.request(
                    PortId::ColorWrite,
                    MemRequest::WriteWord {
                        addr: cfg.color_word_addr(self.frag.x, self.frag.y),
                        data: self.final_color_word(cfg),
                    },
                );
            }
        }
        if !z_done {
            if !cfg.render_mode.z_write_en() {
                z_done = true;
            } else if arb.take_event(PortId::ZWrite) == Some(PortEvent::WriteDone) {
                z_done = true;
            } else if !arb.pending(PortId::ZWrite) {
                arb.request(
                    PortId::ZWrite,
                    MemRequest::WriteWord {
                        addr: cfg.z_word_addr(self.frag.x, self.frag.y),
                        data: self.frag.z,
                    },
                );
            }
        }
        if color_done && z_done {
            self.stats.written += 1;
            self.state = PipeState::Idle;
        } else {
            self.state = PipeState::Writeback { color_done, z_done };
        }
    }

    /// The blended, dithered, truncated framebuffer word.
    fn final_color_word(&self, cfg: &PipeConfig) -> u16 {
        let blended = blend::blend(
            cfg.render_mode.alpha_blend(),
            &self.combined,
            self.dst_word,
        );
        if cfg.render_mode.dither_en() {
            dither::dither_to_rgb565(&blended, self.frag.x, self.frag.y)
        } else {
            dither::truncate_to_rgb565(&blended)
        }
    }
}
