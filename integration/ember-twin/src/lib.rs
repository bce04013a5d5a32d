//! Transaction-level digital twin of the Ember-GS rendering core.
//!
//! Wires the component twins together behind the hardware's register
//! interface: 64-bit writes decode into configuration, vertex capture
//! and triangle kicks, and `tick` steps the whole synchronous pipeline
//! one clock, rasterizer through pixel pipeline through arbiter.

pub mod host;

use ember_color_combiner::ColorCombiner;
use ember_memory::{Arbiter, Memory};
use ember_pixel_pipe::{PipeConfig, PipeStats, PixelPipe};
use ember_rasterizer::{ClipRect, Rasterizer};
use ember_registers::addr;
use ember_registers::regs::{
    AreaSetupReg, CcModeReg, ColorReg, ConstColorReg, FbConfigReg, FbControlReg, RenderModeReg,
    StipplePatternReg, TexCfgReg, Uv0Uv1Reg, VertexReg, ZRangeReg,
};
use ember_texture::Sampler;
use ember_twin_core::color::Argb8;
use ember_twin_core::{tiled, Triangle, Vertex};
use image::RgbaImage;
use qfixed::{rgb565, Q12_4, Q3_12, Q4_12, UQ0_16};

/// The full rendering core plus its memory.
pub struct GpuTwin {
    arb: Arbiter,
    raster: Rasterizer,
    pipe: PixelPipe,
    samplers: [Sampler; 2],
    combiner: ColorCombiner,

    cfg: PipeConfig,
    fb_control: FbControlReg,
    area: AreaSetupReg,

    // Vertex capture state: pending colors/UVs plus the three-slot
    // vertex shift register.
    pending_color: ColorReg,
    pending_uv: Uv0Uv1Reg,
    verts: [Vertex; 3],
    vert_count: usize,

    cycles: u64,
    triangles: u64,
}

impl Default for GpuTwin {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuTwin {
    #[must_use]
    pub fn new() -> Self {
        Self::with_memory(Memory::default())
    }

    #[must_use]
    pub fn with_memory(mem: Memory) -> Self {
        Self {
            arb: Arbiter::new(mem),
            raster: Rasterizer::new(),
            pipe: PixelPipe::new(),
            samplers: [Sampler::default(), Sampler::default()],
            combiner: ColorCombiner::new(),
            cfg: PipeConfig::default(),
            fb_control: FbControlReg::default(),
            area: AreaSetupReg::default(),
            pending_color: ColorReg::default(),
            pending_uv: Uv0Uv1Reg::default(),
            verts: [Vertex::default(); 3],
            vert_count: 0,
            cycles: 0,
            triangles: 0,
        }
    }

    #[must_use]
    pub fn mem(&self) -> &Memory {
        &self.arb.mem
    }

    pub fn mem_mut(&mut self) -> &mut Memory {
        &mut self.arb.mem
    }

    #[must_use]
    pub fn stats(&self) -> PipeStats {
        self.pipe.stats
    }

    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Decode one register write, exactly as the hardware register file
    /// does. Configuration writes drain the in-flight triangle first;
    /// vertex capture streams freely.
    pub fn write_register(&mut self, index: u8, value: u64) {
        log::trace!("reg write {index:#04x} = {value:#018x}");
        match index {
            addr::COLOR => self.pending_color = ColorReg::from_raw(value),
            addr::UV0_UV1 => self.pending_uv = Uv0Uv1Reg::from_raw(value),
            addr::VERTEX_NOKICK => self.capture_vertex(value),
            addr::VERTEX_KICK_012 => {
                self.capture_vertex(value);
                self.kick(false);
            }
            addr::VERTEX_KICK_021 => {
                self.capture_vertex(value);
                self.kick(true);
            }
            // Rectangle kicks are outside the triangle core: the vertex
            // still captures, the kick is ignored.
            addr::VERTEX_KICK_RECT => self.capture_vertex(value),
            _ => self.write_config(index, value),
        }
    }

    fn write_config(&mut self, index: u8, value: u64) {
        // Configuration is read-only to the in-flight work: apply only
        // once the pipeline has drained.
        self.run_until_idle();
        match index {
            addr::AREA_SETUP => self.area = AreaSetupReg::from_raw(value),
            addr::TEX0_CFG => self.samplers[0].configure(TexCfgReg::from_raw(value)),
            addr::TEX1_CFG => self.samplers[1].configure(TexCfgReg::from_raw(value)),
            addr::CC_MODE => self.combiner.configure(CcModeReg::from_raw(value)),
            addr::CONST_COLOR => self.cfg.const_color = ConstColorReg::from_raw(value),
            addr::RENDER_MODE => self.cfg.render_mode = RenderModeReg::from_raw(value),
            addr::Z_RANGE => self.cfg.z_range = ZRangeReg::from_raw(value),
            addr::STIPPLE_PATTERN => self.cfg.stipple = StipplePatternReg::from_raw(value),
            addr::FB_CONFIG => self.cfg.fb = FbConfigReg::from_raw(value),
            addr::FB_CONTROL => self.fb_control = FbControlReg::from_raw(value),
            _ => log::debug!("write to unmapped register {index:#04x} ignored"),
        }
    }

    /// A VERTEX write captures the pending color/UV state with the
    /// position into the three-slot shift register.
    fn capture_vertex(&mut self, value: u64) {
        let reg = VertexReg::from_raw(value);
        let vertex = Vertex {
            x: Q12_4::from_raw(reg.x()),
            y: Q12_4::from_raw(reg.y()),
            z: reg.z(),
            color0: Argb8(self.pending_color.color0_argb()),
            color1: Argb8(self.pending_color.color1_argb()),
            uv0: (
                Q4_12::from_raw(self.pending_uv.uv0_u()),
                Q4_12::from_raw(self.pending_uv.uv0_v()),
            ),
            uv1: (
                Q4_12::from_raw(self.pending_uv.uv1_u()),
                Q4_12::from_raw(self.pending_uv.uv1_v()),
            ),
            q: Q3_12::from_raw(reg.q()),
        };
        if self.vert_count < 3 {
            self.verts[self.vert_count] = vertex;
            self.vert_count += 1;
        } else {
            self.verts[0] = self.verts[1];
            self.verts[1] = self.verts[2];
            self.verts[2] = vertex;
        }
    }

    /// Submit the captured triangle; `swap` renders (v0, v2, v1) for
    /// the flipped winding. Stalls (ticking) until the rasterizer
    /// accepts, like the blocked register write it models.
    fn kick(&mut self, swap: bool) {
        let v = if swap {
            [self.verts[0], self.verts[2], self.verts[1]]
        } else {
            [self.verts[0], self.verts[1], self.verts[2]]
        };
        let tri = Triangle {
            v,
            inv_area: UQ0_16::from_raw(self.area.inv_area()),
            area_shift: self.area.area_shift(),
        };
        let clip = self.clip_rect();
        let gouraud = self.cfg.render_mode.gouraud();
        while !self.raster.submit(&tri, &clip, gouraud) {
            self.tick();
        }
        self.triangles += 1;
        log::debug!(
            "triangle {} kicked (swap={swap}, clip={clip:?})",
            self.triangles
        );
    }

    /// Scissor rectangle intersected with the render target.
    fn clip_rect(&self) -> ClipRect {
        let scissor = ClipRect {
            x0: i32::from(self.fb_control.scissor_x()),
            y0: i32::from(self.fb_control.scissor_y()),
            x1: i32::from(self.fb_control.scissor_x())
                + i32::from(self.fb_control.scissor_width())
                - 1,
            y1: i32::from(self.fb_control.scissor_y())
                + i32::from(self.fb_control.scissor_height())
                - 1,
        };
        let surface = ClipRect {
            x0: 0,
            y0: 0,
            x1: (1i32 << self.cfg.fb.width_log2()) - 1,
            y1: (1i32 << self.cfg.fb.height_log2()) - 1,
        };
        scissor.intersect(&surface)
    }

    /// Advance the whole core one clock.
    pub fn tick(&mut self) {
        self.arb.tick();
        if self.pipe.ready() {
            if let Some(frag) = self.raster.take_output() {
                self.pipe.accept(frag, &self.cfg);
            }
        }
        self.pipe.tick(
            &self.cfg,
            &mut self.samplers,
            &mut self.combiner,
            &mut self.arb,
        );
        self.raster.tick();
        self.cycles += 1;
    }

    /// Tick until the rasterizer and pixel pipeline are both drained.
    pub fn run_until_idle(&mut self) {
        while !(self.raster.is_idle() && self.pipe.ready()) {
            self.tick();
        }
    }

    /// One framebuffer pixel (RGB565), through the tiled layout.
    #[must_use]
    pub fn color_pixel(&self, x: u16, y: u16) -> u16 {
        let addr = tiled::surface_word_addr(self.cfg.fb.color_base(), self.cfg.fb.width_log2(), x, y);
        self.arb.mem.read(addr)
    }

    /// One Z-buffer word, through the tiled layout.
    #[must_use]
    pub fn z_pixel(&self, x: u16, y: u16) -> u16 {
        let addr = tiled::surface_word_addr(self.cfg.fb.z_base(), self.cfg.fb.width_log2(), x, y);
        self.arb.mem.read(addr)
    }

    /// Read the whole color surface back as an RGBA image (MSB
    /// replication to 8-bit channels, opaque alpha).
    #[must_use]
    pub fn frame_image(&self) -> RgbaImage {
        let width = 1u32 << self.cfg.fb.width_log2();
        let height = 1u32 << self.cfg.fb.height_log2();
        let mut img = RgbaImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let (r, g, b) = rgb565::to_unorm8(self.color_pixel(x as u16, y as u16));
                img.put_pixel(x, y, image::Rgba([r, g, b, 0xFF]));
            }
        }
        img
    }

    /// Dump the color surface as a golden-frame PNG.
    pub fn save_frame_png(&self, path: &std::path::Path) -> image::ImageResult<()> {
        self.frame_image().save(path)
    }
}
