//! Field Enum: DITHER_PATTERN

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitherPatternE {
    /// Ordered 16x16 threshold matrix (default)
    Ordered16x16 = 0,
    /// Reserved (behaves as Ordered16x16)
    Rsvd1 = 1,
    /// Reserved (behaves as Ordered16x16)
    Rsvd2 = 2,
    /// Reserved (behaves as Ordered16x16)
    Rsvd3 = 3,
}

impl DitherPatternE {
    /// Decode a bit pattern into an encoded enum variant.
    ///
    /// # Errors
    /// Returns an error if the bit pattern does not match any encoded variants.
    pub const fn from_bits(bits: u8) -> Result<Self, crate::encode::UnknownVariant<u8>> {
        match bits {
            0 => Ok(Self::Ordered16x16),
            1 => Ok(Self::Rsvd1),
            2 => Ok(Self::Rsvd2),
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
