//! Built-in verification scenes, written as the register scripts the
//! host would issue.

use ember_registers::addr;
use ember_registers::components::tex_format_e::TexFormatE;
use ember_registers::components::z_compare_e::ZCompareE;
use ember_registers::regs::{
    ColorReg, FbConfigReg, FbControlReg, RenderModeReg, TexCfgReg, Uv0Uv1Reg, VertexReg,
};
use ember_twin::{host, GpuTwin};
use ember_twin_core::color::Argb8;
use ember_twin_core::Vertex;
use qfixed::{Q12_4, Q3_12, Q4_12};

const Z_BASE_512: u16 = 0x0800;
const TEX_BASE_512: u16 = 0x1000;

fn setup_target(gpu: &mut GpuTwin) {
    let mut fb = FbConfigReg::default();
    fb.set_color_base(0);
    fb.set_z_base(Z_BASE_512);
    fb.set_width_log2(9);
    fb.set_height_log2(9);
    gpu.write_register(addr::FB_CONFIG, fb.to_raw());

    let mut scissor = FbControlReg::default();
    scissor.set_scissor_width(512);
    scissor.set_scissor_height(512);
    gpu.write_register(addr::FB_CONTROL, scissor.to_raw());
}

fn vertex_word(x: i16, y: i16, z: u16, uv: Option<(f32, f32)>) -> (u64, Vertex) {
    let mut reg = VertexReg::default();
    reg.set_x(Q12_4::from_pixel(x).raw());
    reg.set_y(Q12_4::from_pixel(y).raw());
    reg.set_z(z);
    let (u, v) = uv.unwrap_or((0.0, 0.0));
    let vertex = Vertex {
        x: Q12_4::from_pixel(x),
        y: Q12_4::from_pixel(y),
        z,
        color0: Argb8::default(),
        color1: Argb8::default(),
        uv0: (Q4_12::from_f32(u), Q4_12::from_f32(v)),
        uv1: (Q4_12::ZERO, Q4_12::ZERO),
        q: Q3_12::ZERO,
    };
    (reg.to_raw(), vertex)
}

fn write_color(gpu: &mut GpuTwin, argb: u32) {
    let mut reg = ColorReg::default();
    reg.set_color0_argb(argb);
    reg.set_color1_argb(0xFF00_0000);
    gpu.write_register(addr::COLOR, reg.to_raw());
}

fn write_uv(gpu: &mut GpuTwin, u: f32, v: f32) {
    let mut reg = Uv0Uv1Reg::default();
    reg.set_uv0_u(Q4_12::from_f32(u).raw());
    reg.set_uv0_v(Q4_12::from_f32(v).raw());
    gpu.write_register(addr::UV0_UV1, reg.to_raw());
}

/// Submit one triangle: positions, colors, optional UVs, shared Z.
fn kick(gpu: &mut GpuTwin, corners: [(i16, i16, u16, u32, (f32, f32)); 3]) {
    let mut words = [0u64; 3];
    let mut verts = [Vertex::default(); 3];
    for (i, &(x, y, z, argb, uv)) in corners.iter().enumerate() {
        let (word, mut vertex) = vertex_word(x, y, z, Some(uv));
        vertex.color0 = Argb8(argb);
        words[i] = word;
        verts[i] = vertex;
    }
    gpu.write_register(addr::AREA_SETUP, host::area_setup(&verts).to_raw());
    for i in 0..3 {
        write_color(gpu, corners[i].3);
        write_uv(gpu, corners[i].4 .0, corners[i].4 .1);
        let index = if i == 2 {
            addr::VERTEX_KICK_012
        } else {
            addr::VERTEX_NOKICK
        };
        gpu.write_register(index, words[i]);
    }
}

fn render_mode(f: impl FnOnce(&mut RenderModeReg)) -> u64 {
    let mut reg = RenderModeReg::default();
    f(&mut reg);
    reg.to_raw()
}

/// The classic Gouraud triangle: red, green and blue corners.
pub fn gouraud(gpu: &mut GpuTwin) {
    setup_target(gpu);
    gpu.write_register(
        addr::RENDER_MODE,
        render_mode(|m| {
            m.set_gouraud(true);
            m.set_color_write_en(true);
        }),
    );
    kick(
        gpu,
        [
            (320, 60, 0, 0xFF_FF0000, (0.0, 0.0)),
            (511, 380, 0, 0xFF_0000FF, (0.0, 0.0)),
            (100, 380, 0, 0xFF_00FF00, (0.0, 0.0)),
        ],
    );
}

/// Two overlapping triangles with LEQUAL depth testing after a Z-clear
/// pass.
pub fn depth_test(gpu: &mut GpuTwin) {
    setup_target(gpu);

    // Clear Z to the far plane with two screen triangles.
    gpu.write_register(
        addr::RENDER_MODE,
        render_mode(|m| {
            m.set_z_test_en(true);
            m.set_z_compare(ZCompareE::Always);
            m.set_z_write_en(true);
        }),
    );
    kick(
        gpu,
        [
            (0, 0, 0xFFFF, 0, (0.0, 0.0)),
            (511, 0, 0xFFFF, 0, (0.0, 0.0)),
            (0, 511, 0xFFFF, 0, (0.0, 0.0)),
        ],
    );
    kick(
        gpu,
        [
            (511, 0, 0xFFFF, 0, (0.0, 0.0)),
            (511, 511, 0xFFFF, 0, (0.0, 0.0)),
            (0, 511, 0xFFFF, 0, (0.0, 0.0)),
        ],
    );

    gpu.write_register(
        addr::RENDER_MODE,
        render_mode(|m| {
            m.set_gouraud(true);
            m.set_z_test_en(true);
            m.set_z_compare(ZCompareE::Lequal);
            m.set_z_write_en(true);
            m.set_color_write_en(true);
        }),
    );
    // Far orange triangle, then a near cyan one cutting across it.
    kick(
        gpu,
        [
            (80, 100, 0x8000, 0xFF_FF8000, (0.0, 0.0)),
            (320, 100, 0x8000, 0xFF_FF8000, (0.0, 0.0)),
            (200, 380, 0x8000, 0xFF_FF8000, (0.0, 0.0)),
        ],
    );
    kick(
        gpu,
        [
            (160, 80, 0x4000, 0xFF_00FFFF, (0.0, 0.0)),
            (400, 80, 0x4000, 0xFF_00FFFF, (0.0, 0.0)),
            (280, 360, 0x4000, 0xFF_00FFFF, (0.0, 0.0)),
        ],
    );
}

/// Checker-textured triangle through the reset MODULATE combiner.
pub fn textured(gpu: &mut GpuTwin) {
    // 16x16 checker: white and black 4x4 blocks.
    let pixels: Vec<u16> = (0..256)
        .map(|i| {
            let (x, y) = (i % 16, i / 16);
            if (x / 4 + y / 4) % 2 == 0 {
                0xFFFF
            } else {
                0x0000
            }
        })
        .collect();
    host::upload_rgb565_texture(gpu.mem_mut(), TEX_BASE_512, 16, 16, &pixels);

    setup_target(gpu);
    let mut tex = TexCfgReg::default();
    tex.set_enable(true);
    tex.set_format(TexFormatE::Rgb565);
    tex.set_width_log2(4);
    tex.set_height_log2(4);
    tex.set_base_addr(TEX_BASE_512);
    gpu.write_register(addr::TEX0_CFG, tex.to_raw());

    gpu.write_register(addr::RENDER_MODE, render_mode(|m| m.set_color_write_en(true)));
    kick(
        gpu,
        [
            (320, 60, 0, 0xFF_FFFFFF, (0.5, 0.0)),
            (511, 380, 0, 0xFF_FFFFFF, (1.0, 1.0)),
            (100, 380, 0, 0xFF_FFFFFF, (0.0, 1.0)),
        ],
    );
}

/// Stippled, dithered vertical color ramp.
pub fn stipple(gpu: &mut GpuTwin) {
    setup_target(gpu);
    gpu.write_register(addr::STIPPLE_PATTERN, 0xAA55_AA55_AA55_AA55);
    gpu.write_register(
        addr::RENDER_MODE,
        render_mode(|m| {
            m.set_gouraud(true);
            m.set_color_write_en(true);
            m.set_stipple_en(true);
            m.set_dither_en(true);
        }),
    );
    kick(
        gpu,
        [
            (0, 0, 0, 0xFF_FFFFFF, (0.0, 0.0)),
            (511, 0, 0, 0xFF_404040, (0.0, 0.0)),
            (0, 511, 0, 0xFF_000000, (0.0, 0.0)),
        ],
    );
}
