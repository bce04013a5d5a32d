//! Register: CC_MODE

pub use crate::components::cc_rgb_c_source_e::CcRgbCSourceE;
pub use crate::components::cc_source_e::CcSourceE;

/// CC_MODE
///
/// Color combiner mode: equation (A-B)*C+D, independent RGB and alpha.
/// The hardware always pipelines two combiner cycles at one pixel per
/// clock; cycle 0 output feeds cycle 1 via the COMBINED source. For
/// single-equation behavior, configure cycle 1 as a pass-through:
/// A=COMBINED, B=ZERO, C=ONE, D=ZERO.
///
/// Sixteen 4-bit selector nibbles: cycle 0 in [31:0], cycle 1 in
/// [63:32], each cycle {RGB A,B,C,D then ALPHA A,B,C,D} low to high.
/// The RGB C slot uses the extended source set (`CcRgbCSourceE`) with
/// alpha-to-RGB broadcast sources for blend factors; all other slots
/// use `CcSourceE`.
///
/// Reset is MODULATE: cycle 0 (TEX0 - ZERO) * SHADE0 + ZERO, cycle 1
/// pass-through.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CcModeReg(u64);

impl core::default::Default for CcModeReg {
    fn default() -> Self {
        Self(0x7670_7670_7371_7371)
    }
}

macro_rules! cc_source_field {
    ($get:ident, $set:ident, $const:ident, $off:expr) => {
        pub const $const: usize = $off;

        #[inline(always)]
        #[allow(clippy::missing_panics_doc)]
        #[must_use]
        pub fn $get(&self) -> CcSourceE {
            let val = (self.0 >> $off) & 0xF;
            CcSourceE::from_bits(val as u8).expect("All possible field values represented by enum")
        }

        #[inline(always)]
        pub fn $set(&mut self, val: CcSourceE) {
            self.0 = (self.0 & !(0xF << $off)) | (((val.bits() as u64) & 0xF) << $off);
        }
    };
}

macro_rules! cc_rgb_c_field {
    ($get:ident, $set:ident, $const:ident, $off:expr) => {
        pub const $const: usize = $off;

        #[inline(always)]
        #[allow(clippy::missing_panics_doc)]
        #[must_use]
        pub fn $get(&self) -> CcRgbCSourceE {
            let val = (self.0 >> $off) & 0xF;
            CcRgbCSourceE::from_bits(val as u8)
                .expect("All possible field values represented by enum")
        }

        #[inline(always)]
        pub fn $set(&mut self, val: CcRgbCSourceE) {
            self.0 = (self.0 & !(0xF << $off)) | (((val.bits() as u64) & 0xF) << $off);
        }
    };
}

impl CcModeReg {
    #[must_use]
    pub const fn from_raw(val: u64) -> Self {
        Self(val)
    }

    #[must_use]
    pub const fn to_raw(self) -> u64 {
        self.0
    }

    cc_source_field!(c0_rgb_a, set_c0_rgb_a, C0_RGB_A_OFFSET, 0);
    cc_source_field!(c0_rgb_b, set_c0_rgb_b, C0_RGB_B_OFFSET, 4);
    cc_rgb_c_field!(c0_rgb_c, set_c0_rgb_c, C0_RGB_C_OFFSET, 8);
    cc_source_field!(c0_rgb_d, set_c0_rgb_d, C0_RGB_D_OFFSET, 12);
    cc_source_field!(c0_alpha_a, set_c0_alpha_a, C0_ALPHA_A_OFFSET, 16);
    cc_source_field!(c0_alpha_b, set_c0_alpha_b, C0_ALPHA_B_OFFSET, 20);
    cc_source_field!(c0_alpha_c, set_c0_alpha_c, C0_ALPHA_C_OFFSET, 24);
    cc_source_field!(c0_alpha_d, set_c0_alpha_d, C0_ALPHA_D_OFFSET, 28);
    cc_source_field!(c1_rgb_a, set_c1_rgb_a, C1_RGB_A_OFFSET, 32);
    cc_source_field!(c1_rgb_b, set_c1_rgb_b, C1_RGB_B_OFFSET, 36);
    cc_rgb_c_field!(c1_rgb_c, set_c1_rgb_c, C1_RGB_C_OFFSET, 40);
    cc_source_field!(c1_rgb_d, set_c1_rgb_d, C1_RGB_D_OFFSET, 44);
    cc_source_field!(c1_alpha_a, set_c1_alpha_a, C1_ALPHA_A_OFFSET, 48);
    cc_source_field!(c1_alpha_b, set_c1_alpha_b, C1_ALPHA_B_OFFSET, 52);
    cc_source_field!(c1_alpha_c, set_c1_alpha_c, C1_ALPHA_C_OFFSET, 56);
    cc_source_field!(c1_alpha_d, set_c1_alpha_d, C1_ALPHA_D_OFFSET, 60);
}
