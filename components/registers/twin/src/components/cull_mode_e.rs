//! Field Enum: CULL_MODE

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullModeE {
    /// No culling
    None = 0,
    /// Cull back-facing triangles
    Back = 1,
    /// Cull front-facing triangles
    Front = 2,
    /// Reserved (behaves as None)
    Rsvd3 = 3,
}

impl CullModeE {
    /// Decode a bit pattern into an encoded enum variant.
    ///
    /// # Errors
    /// Returns an error if the bit pattern does not match any encoded variants.
    pub const fn from_bits(bits: u8) -> Result<Self, crate::encode::UnknownVariant<u8>> {
        match bits {
            0 => Ok(Self::None),
            1 => Ok(Self::Back),
            2 => Ok(Self::Front),
            3 => Ok(Self::Rsvd3),
            bits => Err(crate::encode::UnknownVariant::new(bits)),
        }
    }

    /// The bit pattern of the variant
    #[must_use]
    pub const fn bits(&self) -> u8 {
        *self as u8
    }
}
