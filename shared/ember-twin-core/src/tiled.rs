//! Tiled surface address math.
//!
//! Color, Z and texture surfaces all use 4x4 blocks in row-major block
//! order with row-major texels inside a block. Memory is addressed in
//! 16-bit words; base addresses count 512-byte units.

use ember_registers::components::tex_format_e::TexFormatE;

/// Bytes per 4x4 block for each texture format; also the burst size of
/// a cache fill. Reserved formats are never fetched.
#[must_use]
pub const fn block_bytes(format: TexFormatE) -> u32 {
    match format {
        TexFormatE::Bc1 | TexFormatE::Bc4 => 8,
        TexFormatE::Bc2 | TexFormatE::Bc3 | TexFormatE::R8 => 16,
        TexFormatE::Rgb565 => 32,
        TexFormatE::Rgba8888 => 64,
        TexFormatE::Rsvd7 => 0,
    }
}

/// Burst length of a cache fill in 16-bit words.
#[must_use]
pub const fn burst_words(format: TexFormatE) -> u16 {
    (block_bytes(format) / 2) as u16
}

/// Word address of one pixel in a 16-bit-per-pixel tiled surface
/// (color RGB565 or Z16).
///
/// `block_index = (block_y << (width_log2 - 2)) | block_x`;
/// `byte_offset = base*512 + block_index*32 + (local_y*4 + local_x)*2`.
#[must_use]
pub const fn surface_word_addr(base_512: u16, width_log2: u8, x: u16, y: u16) -> u32 {
    let block_x = (x >> 2) as u32;
    let block_y = (y >> 2) as u32;
    let local = ((y & 3) * 4 + (x & 3)) as u32;
    let shift = if width_log2 >= 2 { width_log2 - 2 } else { 0 };
    let block_index = (block_y << shift) | block_x;
    (base_512 as u32) * 256 + block_index * 16 + local
}

/// Word address of the first word of a texture block.
///
/// Texture blocks are row-major, `width/4` blocks per row, scaled by
/// the format's block size.
#[must_use]
pub const fn texture_block_word_addr(
    base_512: u16,
    format: TexFormatE,
    width_log2: u8,
    block_x: u16,
    block_y: u16,
) -> u32 {
    let shift = if width_log2 >= 2 { width_log2 - 2 } else { 0 };
    let block_index = ((block_y as u32) << shift) | block_x as u32;
    (base_512 as u32) * 256 + block_index * (block_bytes(format) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_bytes_per_format() {
        assert_eq!(block_bytes(TexFormatE::Bc1), 8);
        assert_eq!(block_bytes(TexFormatE::Bc2), 16);
        assert_eq!(block_bytes(TexFormatE::Bc3), 16);
        assert_eq!(block_bytes(TexFormatE::Bc4), 8);
        assert_eq!(block_bytes(TexFormatE::Rgb565), 32);
        assert_eq!(block_bytes(TexFormatE::Rgba8888), 64);
        assert_eq!(block_bytes(TexFormatE::R8), 16);
    }

    #[test]
    fn surface_origin_is_base() {
        assert_eq!(surface_word_addr(0, 9, 0, 0), 0);
        assert_eq!(surface_word_addr(2, 9, 0, 0), 512);
    }

    #[test]
    fn surface_walks_block_locals_first() {
        // Pixels of the first block occupy the first 16 words.
        assert_eq!(surface_word_addr(0, 9, 1, 0), 1);
        assert_eq!(surface_word_addr(0, 9, 0, 1), 4);
        assert_eq!(surface_word_addr(0, 9, 3, 3), 15);
        // Next block to the right starts at word 16.
        assert_eq!(surface_word_addr(0, 9, 4, 0), 16);
    }

    #[test]
    fn surface_block_row_stride() {
        // 512-wide surface: 128 blocks per row, 16 words per block.
        assert_eq!(surface_word_addr(0, 9, 0, 4), 128 * 16);
    }

    #[test]
    fn texture_blocks_scale_by_format() {
        // 16-wide RGB565 texture: 4 blocks per row, 16 words per block.
        assert_eq!(
            texture_block_word_addr(0, TexFormatE::Rgb565, 4, 1, 0),
            16
        );
        assert_eq!(
            texture_block_word_addr(0, TexFormatE::Rgb565, 4, 0, 1),
            64
        );
        // BC1 blocks are 4 words.
        assert_eq!(texture_block_word_addr(0, TexFormatE::Bc1, 4, 1, 0), 4);
    }
}
