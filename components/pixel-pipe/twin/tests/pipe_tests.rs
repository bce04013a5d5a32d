//! Pixel pipeline integration: fragments driven through the real
//! arbiter, sampler caches, and combiner to memory writeback.

use ember_color_combiner::ColorCombiner;
use ember_memory::{Arbiter, Memory};
use ember_pixel_pipe::{PipeConfig, PixelPipe};
use ember_registers::components::alpha_blend_e::AlphaBlendE;
use ember_registers::components::tex_format_e::TexFormatE;
use ember_registers::components::z_compare_e::ZCompareE;
use ember_registers::regs::TexCfgReg;
use ember_texture::Sampler;
use ember_twin_core::{tiled, Fragment, Rgba12};
use qfixed::{Q3_12, Q4_12};

struct Bench {
    pipe: PixelPipe,
    samplers: [Sampler; 2],
    combiner: ColorCombiner,
    arb: Arbiter,
    cfg: PipeConfig,
}

impl Bench {
    fn new() -> Self {
        let mut cfg = PipeConfig::default();
        // A 512x512 surface with color at 0 and Z at 0x200*512 bytes.
        cfg.fb.set_width_log2(9);
        cfg.fb.set_height_log2(9);
        cfg.fb.set_z_base(0x0200);
        cfg.render_mode.set_color_write_en(true);
        cfg.render_mode.set_z_write_en(true);
        Self {
            pipe: PixelPipe::new(),
            samplers: [Sampler::default(), Sampler::default()],
            combiner: ColorCombiner::new(),
            arb: Arbiter::new(Memory::with_words(1 << 20)),
            cfg,
        }
    }

    /// Push one fragment through to a terminal outcome.
    fn run(&mut self, frag: Fragment) {
        assert!(self.pipe.ready());
        self.pipe.accept(frag, &self.cfg);
        let mut guard = 0;
        while !self.pipe.ready() {
            self.arb.tick();
            self.pipe
                .tick(&self.cfg, &mut self.samplers, &mut self.combiner, &mut self.arb);
            guard += 1;
            assert!(guard < 10_000, "pipeline deadlock");
        }
    }

    fn color_at(&self, x: u16, y: u16) -> u16 {
        self.arb.mem.read(tiled::surface_word_addr(0, 9, x, y))
    }

    fn z_at(&self, x: u16, y: u16) -> u16 {
        self.arb.mem.read(tiled::surface_word_addr(0x0200, 9, x, y))
    }
}

fn red_fragment(x: u16, y: u16, z: u16) -> Fragment {
    Fragment {
        x,
        y,
        z,
        color0: Rgba12::new(0xFFF, 0, 0, 0xFFF),
        color1: Rgba12::ZERO,
        uv0: (Q4_12::ZERO, Q4_12::ZERO),
        uv1: (Q4_12::ZERO, Q4_12::ZERO),
        q: Q3_12::ZERO,
    }
}

#[test]
fn untextured_fragment_writes_color_and_z() {
    let mut bench = Bench::new();
    bench.run(red_fragment(10, 10, 0x1234));
    // MODULATE against opaque white: full red survives truncation.
    assert_eq!(bench.color_at(10, 10), 0xF800);
    assert_eq!(bench.z_at(10, 10), 0x1234);
    assert_eq!(bench.pipe.stats.written, 1);
}

#[test]
fn color_write_gate_masks_color_only() {
    let mut bench = Bench::new();
    bench.cfg.render_mode.set_color_write_en(false);
    bench.run(red_fragment(4, 4, 77));
    assert_eq!(bench.color_at(4, 4), 0);
    assert_eq!(bench.z_at(4, 4), 77);
}

#[test]
fn z_write_gate_masks_z_only() {
    let mut bench = Bench::new();
    bench.cfg.render_mode.set_z_write_en(false);
    bench.run(red_fragment(4, 4, 77));
    assert_eq!(bench.color_at(4, 4), 0xF800);
    assert_eq!(bench.z_at(4, 4), 0);
}

#[test]
fn stipple_clear_bit_discards() {
    let mut bench = Bench::new();
    bench.cfg.render_mode.set_stipple_en(true);
    bench.cfg.stipple.set_pattern(!1); // bit (0,0) clear
    bench.run(red_fragment(8, 8, 0)); // (8&7, 8&7) = (0,0)
    assert_eq!(bench.color_at(8, 8), 0);
    assert_eq!(bench.pipe.stats.stippled, 1);
    // A covered pixel of the same pattern still lands.
    bench.run(red_fragment(9, 8, 0));
    assert_eq!(bench.color_at(9, 8), 0xF800);
}

#[test]
fn z_range_window_discards_outside() {
    let mut bench = Bench::new();
    bench.cfg.z_range.set_z_min(0x1000);
    bench.cfg.z_range.set_z_max(0x2000);
    bench.run(red_fragment(1, 1, 0x0FFF));
    assert_eq!(bench.pipe.stats.z_range_rejected, 1);
    assert_eq!(bench.color_at(1, 1), 0);
    bench.run(red_fragment(1, 1, 0x1000));
    assert_eq!(bench.color_at(1, 1), 0xF800);
}

mod early_z {
    use super::*;

    #[test]
    fn less_discards_when_not_closer() {
        let mut bench = Bench::new();
        bench.cfg.render_mode.set_z_test_en(true);
        bench.cfg.render_mode.set_z_compare(ZCompareE::Less);
        // Seed stored Z at the target pixel.
        let addr = tiled::surface_word_addr(0x0200, 9, 5, 5);
        bench.arb.mem.write(addr, 0x1000);
        bench.run(red_fragment(5, 5, 0x1000));
        assert_eq!(bench.pipe.stats.z_failed, 1);
        assert_eq!(bench.color_at(5, 5), 0);

        bench.run(red_fragment(5, 5, 0x0FFF));
        assert_eq!(bench.color_at(5, 5), 0xF800);
        assert_eq!(bench.z_at(5, 5), 0x0FFF);
    }

    #[test]
    fn always_skips_the_memory_read() {
        let mut bench = Bench::new();
        bench.cfg.render_mode.set_z_test_en(true);
        bench.cfg.render_mode.set_z_compare(ZCompareE::Always);
        bench.run(red_fragment(2, 2, 9));
        assert_eq!(bench.z_at(2, 2), 9);
    }

    #[test]
    fn never_discards_without_reading() {
        let mut bench = Bench::new();
        bench.cfg.render_mode.set_z_test_en(true);
        bench.cfg.render_mode.set_z_compare(ZCompareE::Never);
        assert!(bench.pipe.ready());
        bench.pipe.accept(red_fragment(2, 2, 9), &bench.cfg);
        // Terminal without a single pipeline cycle.
        assert!(bench.pipe.ready());
        assert_eq!(bench.pipe.stats.z_failed, 1);
    }
}

mod blending {
    use super::*;

    #[test]
    fn additive_saturates_against_destination() {
        let mut bench = Bench::new();
        bench.cfg.render_mode.set_alpha_blend(AlphaBlendE::Add);
        // Destination already holds full green.
        let addr = tiled::surface_word_addr(0, 9, 3, 3);
        bench.arb.mem.write(addr, 0x07E0);
        bench.run(red_fragment(3, 3, 0));
        // Red + green = yellow; both channels at their maxima.
        assert_eq!(bench.color_at(3, 3), 0xFFE0);
    }

    #[test]
    fn subtract_clamps_to_black() {
        let mut bench = Bench::new();
        bench
            .cfg
            .render_mode
            .set_alpha_blend(AlphaBlendE::Subtract);
        let addr = tiled::surface_word_addr(0, 9, 3, 3);
        bench.arb.mem.write(addr, 0xFFFF);
        bench.run(red_fragment(3, 3, 0));
        assert_eq!(bench.color_at(3, 3), 0x0000);
    }
}

mod textured {
    use super::*;

    /// A 16x16 RGB565 texture whose first block is solid green.
    fn seed_texture(bench: &mut Bench, base_512: u16) {
        let block_words = 16;
        let base = u32::from(base_512) * 256;
        for i in 0..block_words {
            bench.arb.mem.write(base + i, 0x07E0);
        }
    }

    #[test]
    fn cache_fill_stalls_then_modulates() {
        let mut bench = Bench::new();
        seed_texture(&mut bench, 0x400);
        let mut reg = TexCfgReg::default();
        reg.set_enable(true);
        reg.set_format(TexFormatE::Rgb565);
        reg.set_width_log2(4);
        reg.set_height_log2(4);
        reg.set_base_addr(0x400);
        bench.samplers[0].configure(reg);

        // White shade so MODULATE passes the texel through.
        let mut frag = red_fragment(0, 0, 0);
        frag.color0 = Rgba12::new(0xFFF, 0xFFF, 0xFFF, 0xFFF);
        bench.run(frag);
        // Green texel survives to the framebuffer (one LSB of rounding
        // loss in the 6-bit channel from the modulate product).
        let word = bench.color_at(0, 0);
        assert_eq!(word & 0xF81F, 0);
        assert!(qfixed::rgb565::g6(word) >= 0x3E);

        // Second fragment on the same block hits without a new fill.
        let mut frag = red_fragment(1, 0, 0);
        frag.color0 = Rgba12::new(0xFFF, 0xFFF, 0xFFF, 0xFFF);
        bench.run(frag);
        assert_eq!(bench.color_at(1, 0), word);
    }
}
