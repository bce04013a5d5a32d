//! Field enum definitions for the register map.

pub mod alpha_blend_e;
pub mod alpha_test_e;
pub mod cc_rgb_c_source_e;
pub mod cc_source_e;
pub mod cull_mode_e;
pub mod dither_pattern_e;
pub mod tex_filter_e;
pub mod tex_format_e;
pub mod wrap_mode_e;
pub mod z_compare_e;
