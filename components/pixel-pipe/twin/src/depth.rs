//! Depth-range window and early depth compare.

use ember_registers::components::z_compare_e::ZCompareE;

/// Inclusive Z-range (scissor) window test.
#[must_use]
pub const fn z_range_pass(z: u16, z_min: u16, z_max: u16) -> bool {
    z >= z_min && z <= z_max
}

/// Whether the early depth test needs a Z-buffer read. Disabled tests
/// and ALWAYS skip the read entirely; NEVER discards without reading.
#[must_use]
pub fn z_needs_read(z_test_en: bool, func: ZCompareE) -> bool {
    z_test_en && !matches!(func, ZCompareE::Always | ZCompareE::Never)
}

/// The depth compare: fragment depth against the stored Z word.
#[must_use]
pub fn z_compare(func: ZCompareE, frag_z: u16, stored_z: u16) -> bool {
    match func {
        ZCompareE::Less => frag_z < stored_z,
        ZCompareE::Lequal => frag_z <= stored_z,
        ZCompareE::Equal => frag_z == stored_z,
        ZCompareE::Gequal => frag_z >= stored_z,
        ZCompareE::Greater => frag_z > stored_z,
        ZCompareE::Notequal => frag_z != stored_z,
        ZCompareE::Always => true,
        ZCompareE::Never => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_inclusive() {
        assert!(z_range_pass(10, 10, 20));
        assert!(z_range_pass(20, 10, 20));
        assert!(!z_range_pass(9, 10, 20));
        assert!(!z_range_pass(21, 10, 20));
    }

    #[test]
    fn always_and_never_skip_the_read() {
        assert!(!z_needs_read(true, ZCompareE::Always));
        assert!(!z_needs_read(true, ZCompareE::Never));
        assert!(z_needs_read(true, ZCompareE::Less));
        assert!(!z_needs_read(false, ZCompareE::Less));
    }

    #[test]
    fn compare_functions() {
        assert!(z_compare(ZCompareE::Less, 1, 2));
        assert!(!z_compare(ZCompareE::Less, 2, 2));
        assert!(z_compare(ZCompareE::Lequal, 2, 2));
        assert!(z_compare(ZCompareE::Equal, 5, 5));
        assert!(z_compare(ZCompareE::Gequal, 5, 5));
        assert!(z_compare(ZCompareE::Greater, 6, 5));
        assert!(z_compare(ZCompareE::Notequal, 6, 5));
        assert!(z_compare(ZCompareE::Always, 9, 0));
        assert!(!z_compare(ZCompareE::Never, 0, 9));
    }
}
