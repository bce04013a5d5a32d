//! Field Enum: combiner operand source (A/B/D slots and all alpha slots)

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CcSourceE {
    /// Previous combiner stage output
    Combined = 0,
    /// Texture unit 0 color/alpha
    Tex0 = 1,
    /// Texture unit 1 color/alpha
    Tex1 = 2,
    /// Interpolated vertex color 0 (COLOR0, typically diffuse)
    Shade0 = 3,
    /// Constant color 0 (per-draw-call)
    Const0 = 4,
    /// Constant color 1 (per-draw-call, also used for fog)
    Const1 = 5,
    /// Constant 1.0 (0x1000)
    One = 6,
    /// Constant 0.0
    Zero = 7,
    /// Interpolated vertex color 1 (COLOR1, typically specular)
    Shade1 = 8,
    /// Reserved (reads as 0)
    Rsvd9 = 9,
    /// Reserved (reads as 0)
    Rsvd10 = 10,
    /// Reserved (reads as 0)
    Rsvd11 = 11,
    /// Reserved (reads as 0)
    Rsvd12 = 12,
    /// Reserved (reads as 0)
    Rsvd13 = 13,
    /// Reserved (reads as 0)
    Rsvd14 = 14,
    /// Reserved (reads as 0)
    Rsvd15 = 15,
}

impl CcSourceE {
    /// Decode a bit pattern into an encoded enum variant.
    ///
    /// # Errors
    /// Returns an error if the bit pattern does not match any encoded variants.
    pub const fn from_bits(bits: u8) -> Result<Self, crate::encode::UnknownVariant<u8>> {
        match bits {
            0 => Ok(Self::Combined),
            1 => Ok(Self::Tex0),
            2 => Ok(Self::Tex1),
            3 => Ok(Self::Shade0),
            4 => Ok(Self::Const0),
            5 => Ok(Self::Const1),
            6 => Ok(Self::One),
            7 => Ok(Self::Zero),
            8 => Ok(Self::Shade1),
            9 => Ok(Self::Rsvd9),
            10 => Ok(Self::Rsvd10),
            11 => Ok(Self::Rsvd11),
            12 => Ok(Self::Rsvd12),
            13 => Ok(Self::Rsvd13),
            14 => Ok(Self::Rsvd14),
            15 => Ok(Self::Rsvd15),
            bits => Err(crate::encode::UnknownVariant::new(bits)),
        }
    }

    /// The bit pattern of the variant
    #[must_use]
    pub const fn bits(&self) -> u8 {
        *self as u8
    }
}
