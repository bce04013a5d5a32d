//! Register wrapper definitions.

pub mod area_setup_reg;
pub mod cc_mode_reg;
pub mod color_reg;
pub mod const_color_reg;
pub mod fb_config_reg;
pub mod fb_control_reg;
pub mod render_mode_reg;
pub mod stipple_pattern_reg;
pub mod tex_cfg_reg;
pub mod uv0_uv1_reg;
pub mod vertex_reg;
pub mod z_range_reg;

pub use area_setup_reg::AreaSetupReg;
pub use cc_mode_reg::CcModeReg;
pub use color_reg::ColorReg;
pub use const_color_reg::ConstColorReg;
pub use fb_config_reg::FbConfigReg;
pub use fb_control_reg::FbControlReg;
pub use render_mode_reg::RenderModeReg;
pub use stipple_pattern_reg::StipplePatternReg;
pub use tex_cfg_reg::TexCfgReg;
pub use uv0_uv1_reg::Uv0Uv1Reg;
pub use vertex_reg::VertexReg;
pub use z_range_reg::ZRangeReg;
