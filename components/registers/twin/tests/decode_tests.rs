//! Register wrapper decode tests: field placement, reset values, and
//! reserved-encoding behavior against the documented bit layout.

use ember_registers::components::cc_source_e::CcSourceE;
use ember_registers::components::tex_format_e::TexFormatE;
use ember_registers::components::z_compare_e::ZCompareE;
use ember_registers::regs::{
    AreaSetupReg, CcModeReg, ColorReg, FbConfigReg, FbControlReg, RenderModeReg,
    StipplePatternReg, TexCfgReg, Uv0Uv1Reg, VertexReg, ZRangeReg,
};

mod vertex {
    use super::*;

    #[test]
    fn field_placement() {
        // X=320px, Y=40px in S12.4, Z=0x1234, Q=0.5 in Q3.12.
        let raw = (0x0800u64 << 48) | (0x1234u64 << 32) | ((40 * 16) as u64) << 16 | (320 * 16) as u64;
        let reg = VertexReg::from_raw(raw);
        assert_eq!(reg.x(), 320 * 16);
        assert_eq!(reg.y(), 40 * 16);
        assert_eq!(reg.z(), 0x1234);
        assert_eq!(reg.q(), 0x0800);
    }

    #[test]
    fn negative_x_sign_extends() {
        let mut reg = VertexReg::default();
        reg.set_x(-16);
        assert_eq!(reg.x(), -16);
        assert_eq!(reg.to_raw() & 0xFFFF, 0xFFF0);
    }

    #[test]
    fn setter_getter_round_trip() {
        let mut reg = VertexReg::default();
        reg.set_x(511 * 16);
        reg.set_y(380 * 16);
        reg.set_z(0xFFFF);
        reg.set_q(-1);
        assert_eq!(reg.x(), 511 * 16);
        assert_eq!(reg.y(), 380 * 16);
        assert_eq!(reg.z(), 0xFFFF);
        assert_eq!(reg.q(), -1);
    }
}

mod color {
    use super::*;

    #[test]
    fn diffuse_in_high_dword() {
        // Red diffuse, opaque; black specular.
        let mut reg = ColorReg::default();
        reg.set_color0_argb(0xFF_FF0000);
        assert_eq!(reg.to_raw() >> 32, 0xFF_FF0000);
        assert_eq!(reg.color0_argb(), 0xFF_FF0000);
        assert_eq!(reg.color1_argb(), 0);
    }
}

mod uv {
    use super::*;

    #[test]
    fn four_q4_12_fields_low_to_high() {
        let mut reg = Uv0Uv1Reg::default();
        reg.set_uv0_u(0x1000);
        reg.set_uv0_v(-0x1000);
        reg.set_uv1_u(0x0800);
        reg.set_uv1_v(0x0001);
        assert_eq!(reg.to_raw() & 0xFFFF, 0x1000);
        assert_eq!((reg.to_raw() >> 16) & 0xFFFF, 0xF000);
        assert_eq!((reg.to_raw() >> 32) & 0xFFFF, 0x0800);
        assert_eq!((reg.to_raw() >> 48) & 0xFFFF, 0x0001);
        assert_eq!(reg.uv0_v(), -0x1000);
    }
}

mod area_setup {
    use super::*;

    #[test]
    fn inv_area_and_shift() {
        let reg = AreaSetupReg::from_raw(0x0003_8000);
        assert_eq!(reg.inv_area(), 0x8000);
        assert_eq!(reg.area_shift(), 3);
    }
}

mod tex_cfg {
    use super::*;

    #[test]
    fn textured_checker_configuration() {
        // ENABLE=1, FORMAT=RGB565, 16x16, repeat wrap, base 0x40.
        let mut reg = TexCfgReg::default();
        reg.set_enable(true);
        reg.set_format(TexFormatE::Rgb565);
        reg.set_width_log2(4);
        reg.set_height_log2(4);
        reg.set_base_addr(0x40);
        assert_eq!(reg.to_raw(), (0x40u64 << 32) | (4 << 12) | (4 << 8) | (4 << 4) | 1);
        assert!(reg.enable());
        assert_eq!(reg.format(), TexFormatE::Rgb565);
    }

    #[test]
    fn reserved_format_decodes() {
        let mut reg = TexCfgReg::default();
        reg.set_format(TexFormatE::Rsvd7);
        assert_eq!(reg.format(), TexFormatE::Rsvd7);
    }
}

mod cc_mode {
    use super::*;

    #[test]
    fn cycle0_nibbles_low_to_high() {
        // RGB: (TEX0 - ZERO) * SHADE0 + ZERO, alpha pass-through SHADE0.
        let mut reg = CcModeReg::default();
        reg.set_c0_rgb_a(CcSourceE::Tex0);
        reg.set_c0_rgb_b(CcSourceE::Zero);
        reg.set_c0_rgb_c(ember_registers::regs::cc_mode_reg::CcRgbCSourceE::Shade0);
        reg.set_c0_rgb_d(CcSourceE::Zero);
        reg.set_c0_alpha_a(CcSourceE::Shade0);
        reg.set_c0_alpha_b(CcSourceE::Zero);
        reg.set_c0_alpha_c(CcSourceE::One);
        reg.set_c0_alpha_d(CcSourceE::Zero);
        assert_eq!(reg.to_raw() & 0xFFFF_FFFF, 0x7673_7371);
    }

    #[test]
    fn cycle1_occupies_high_dword() {
        let mut reg = CcModeReg::from_raw(0);
        reg.set_c1_alpha_d(CcSourceE::Shade1);
        assert_eq!(reg.to_raw(), 0x8000_0000_0000_0000);
        assert_eq!(reg.c1_alpha_d(), CcSourceE::Shade1);
    }

    #[test]
    fn reset_is_modulate_with_passthrough_cycle1() {
        assert_eq!(CcModeReg::default().to_raw(), 0x7670_7670_7371_7371);
    }

    #[test]
    fn reserved_selector_decodes() {
        let reg = CcModeReg::from_raw(0x9);
        assert_eq!(reg.c0_rgb_a(), CcSourceE::Rsvd9);
    }
}

mod render_mode {
    use super::*;

    #[test]
    fn reset_is_all_clear() {
        let reg = RenderModeReg::default();
        assert!(!reg.gouraud());
        assert!(!reg.z_test_en());
        assert!(!reg.z_write_en());
        assert!(!reg.color_write_en());
        assert!(!reg.stipple_en());
        assert!(!reg.dither_en());
        assert_eq!(reg.z_compare(), ZCompareE::Less);
    }

    #[test]
    fn z_compare_field() {
        let mut reg = RenderModeReg::default();
        reg.set_z_compare(ZCompareE::Gequal);
        assert_eq!(reg.to_raw(), 3 << 13);
        assert_eq!(reg.z_compare(), ZCompareE::Gequal);
    }

    #[test]
    fn alpha_ref_field() {
        let mut reg = RenderModeReg::default();
        reg.set_alpha_ref(0x80);
        assert_eq!(reg.to_raw(), 0x80u64 << 19);
        assert_eq!(reg.alpha_ref(), 0x80);
    }
}

mod z_range {
    use super::*;

    #[test]
    fn reset_window_fully_open() {
        let reg = ZRangeReg::default();
        assert_eq!(reg.z_min(), 0x0000);
        assert_eq!(reg.z_max(), 0xFFFF);
    }
}

mod stipple {
    use super::*;

    #[test]
    fn reset_full_coverage() {
        assert_eq!(StipplePatternReg::default().pattern(), u64::MAX);
    }
}

mod fb {
    use super::*;

    #[test]
    fn config_fields() {
        let mut reg = FbConfigReg::default();
        reg.set_color_base(0x0000);
        reg.set_z_base(0x0200);
        reg.set_width_log2(9);
        reg.set_height_log2(9);
        assert_eq!(reg.to_raw(), (9u64 << 36) | (9u64 << 32) | (0x0200u64 << 16));
    }

    #[test]
    fn control_reset_clips_everything() {
        let reg = FbControlReg::default();
        assert_eq!(reg.scissor_width(), 0);
        assert_eq!(reg.scissor_height(), 0);
    }

    #[test]
    fn control_fields() {
        let mut reg = FbControlReg::default();
        reg.set_scissor_x(0);
        reg.set_scissor_y(0);
        reg.set_scissor_width(512);
        reg.set_scissor_height(512);
        assert_eq!(reg.to_raw(), (512u64 << 30) | (512u64 << 20));
    }
}
