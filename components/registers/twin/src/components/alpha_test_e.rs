//! Field Enum: ALPHA_TEST_FUNC

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaTestE {
    /// Always pass (alpha test disabled)
    Always = 0,
    /// Pass if fragment alpha < ALPHA_REF
    Less = 1,
    /// Pass if fragment alpha >= ALPHA_REF (cutout transparency)
    Gequal = 2,
    /// Pass if fragment alpha != ALPHA_REF
    Notequal = 3,
}

impl AlphaTestE {
    /// Decode a bit pattern into an encoded enum variant.
    ///
    /// # Errors
    /// Returns an error if the bit pattern does not match any encoded variants.
    pub const fn from_bits(bits: u8) -> Result<Self, crate::encode::UnknownVariant<u8>> {
        match bits {
            0 => Ok(Self::Always),
            1 => Ok(Self::Less),
            2 => Ok(Self::Gequal),
            3 => Ok(Self::Notequal),
            bits => Err(crate::encode::UnknownVariant::new(bits)),
        }
    }

    /// The bit pattern of the variant
    #[must_use]
    pub const fn bits(&self) -> u8 {
        *self as u8
    }
}
