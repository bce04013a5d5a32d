//! Field Enum: combiner RGB C-slot source (extended set with alpha broadcast)

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CcRgbCSourceE {
    /// Previous combiner stage RGB output
    Combined = 0,
    /// Texture 0 RGB
    Tex0 = 1,
    /// Texture 1 RGB
    Tex1 = 2,
    /// Shade 0 RGB (COLOR0, typically diffuse)
    Shade0 = 3,
    /// Constant color 0 RGB
    Const0 = 4,
    /// Constant color 1 RGB
    Const1 = 5,
    /// Constant 1.0
    One = 6,
    /// Constant 0.0
    Zero = 7,
    /// Texture 0 alpha broadcast to RGB
    Tex0Alpha = 8,
    /// Texture 1 alpha broadcast to RGB
    Tex1Alpha = 9,
    /// Shade 0 alpha broadcast to RGB (COLOR0 alpha)
    Shade0Alpha = 10,
    /// Constant color 0 alpha broadcast to RGB
    Const0Alpha = 11,
    /// Previous stage alpha broadcast to RGB
    CombinedAlpha = 12,
    /// Shade 1 RGB (COLOR1, typically specular)
    Shade1 = 13,
    /// Shade 1 alpha broadcast to RGB (COLOR1 alpha)
    Shade1Alpha = 14,
    /// Reserved (reads as 0)
    Rsvd15 = 15,
}

impl CcRgbCSourceE {
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
            8 => Ok(Self::Tex0Alpha),
            9 => Ok(Self::Tex1Alpha),
            10 => Ok(Self::Shade0Alpha),
            11 => Ok(Self::Const0Alpha),
            12 => Ok(Self::CombinedAlpha),
            13 => Ok(Self::Shade1),
            14 => Ok(Self::Shade1Alpha),
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
