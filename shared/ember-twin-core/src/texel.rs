//! The canonical decompressed texel.

use qfixed::{rgb565, unorm};

use crate::color::Rgba12;

/// One decompressed texel: RGBA 5-6-5-2, 18 bits.
///
/// Every decoder narrows to this format so cache lines and combiner
/// operands are format-independent. Channels are stored pre-masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Texel {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Texel {
    pub const TRANSPARENT_BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// The substitute for a disabled sampler: MODULATE against it is a
    /// pass-through.
    pub const OPAQUE_WHITE: Self = Self {
        r: 0x1F,
        g: 0x3F,
        b: 0x1F,
        a: 0x3,
    };

    #[must_use]
    pub const fn new(r5: u8, g6: u8, b5: u8, a2: u8) -> Self {
        Self {
            r: r5 & 0x1F,
            g: g6 & 0x3F,
            b: b5 & 0x1F,
            a: a2 & 0x3,
        }
    }

    #[must_use]
    pub const fn r5(self) -> u8 {
        self.r
    }

    #[must_use]
    pub const fn g6(self) -> u8 {
        self.g
    }

    #[must_use]
    pub const fn b5(self) -> u8 {
        self.b
    }

    #[must_use]
    pub const fn a2(self) -> u8 {
        self.a
    }

    /// An RGB565 word with opaque alpha.
    #[must_use]
    pub const fn from_rgb565(word: u16) -> Self {
        Self::new(rgb565::r5(word), rgb565::g6(word), rgb565::b5(word), 0x3)
    }

    /// Truncate UNORM8 channels (8 to 5/6/5/2).
    #[must_use]
    pub const fn from_unorm8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(r >> 3, g >> 2, b >> 3, a >> 6)
    }

    #[must_use]
    pub const fn to_rgb565(self) -> u16 {
        rgb565::pack(self.r, self.g, self.b)
    }

    /// Promote to the combiner's Q4.12 domain by MSB replication.
    #[must_use]
    pub const fn to_rgba12(self) -> Rgba12 {
        Rgba12::new(
            unorm::promote5(self.r) as i16,
            unorm::promote6(self.g) as i16,
            unorm::promote5(self.b) as i16,
            unorm::promote2(self.a) as i16,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_masks_channels() {
        let t = Texel::new(0xFF, 0xFF, 0xFF, 0xFF);
        assert_eq!(t, Texel::OPAQUE_WHITE);
    }

    #[test]
    fn rgb565_round_trip() {
        let t = Texel::from_rgb565(0xF81F);
        assert_eq!((t.r5(), t.g6(), t.b5(), t.a2()), (0x1F, 0x00, 0x1F, 0x3));
        assert_eq!(t.to_rgb565(), 0xF81F);
    }

    #[test]
    fn unorm8_truncates() {
        let t = Texel::from_unorm8(0x07, 0x03, 0x07, 0x3F);
        assert_eq!(t, Texel::TRANSPARENT_BLACK);
    }

    #[test]
    fn opaque_white_promotes_to_0xfff() {
        let c = Texel::OPAQUE_WHITE.to_rgba12();
        assert_eq!(c.r.raw(), 0xFFF);
        assert_eq!(c.g.raw(), 0xFFF);
        assert_eq!(c.b.raw(), 0xFFF);
        assert_eq!(c.a.raw(), 0xFFF);
    }
}
