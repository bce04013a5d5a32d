//! Register index constants (7-bit write-decode addresses).

pub const COLOR: u8 = 0x00;
pub const UV0_UV1: u8 = 0x01;
pub const AREA_SETUP: u8 = 0x05;
pub const VERTEX_NOKICK: u8 = 0x06;
pub const VERTEX_KICK_012: u8 = 0x07;
pub const VERTEX_KICK_021: u8 = 0x08;
pub const VERTEX_KICK_RECT: u8 = 0x09;
pub const TEX0_CFG: u8 = 0x10;
pub const TEX1_CFG: u8 = 0x11;
pub const CC_MODE: u8 = 0x18;
pub const CONST_COLOR: u8 = 0x19;
pub const RENDER_MODE: u8 = 0x30;
pub const Z_RANGE: u8 = 0x31;
pub const STIPPLE_PATTERN: u8 = 0x32;
pub const FB_CONFIG: u8 = 0x40;
pub const FB_CONTROL: u8 = 0x43;
