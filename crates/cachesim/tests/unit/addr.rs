//! # Address Decoding Tests

use cachesim::{AddressLayout, CacheConfig, DecodedAddress};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn layout(sets: u32, ways: u32, line: u32) -> AddressLayout {
    AddressLayout::new(&CacheConfig::new(sets, ways, line).unwrap()).unwrap()
}

#[test]
fn test_field_widths_sum_to_address_width() {
    let l = layout(16, 4, 32);
    assert_eq!(l.offset_bits, 5);
    assert_eq!(l.index_bits, 4);
    assert_eq!(l.tag_bits, 23);
}

#[test]
fn test_single_set_has_no_index_bits() {
    let l = layout(1, 1, 4);
    assert_eq!(l.index_bits, 0);
    assert_eq!(l.decode(0xFFFF_FFFF).index, 0);
    assert_eq!(l.decode(0xFFFF_FFFF).tag, 0x3FFF_FFFF);
}

#[rstest]
#[case(0x0000_0000, 0x0, 0, 0)]
#[case(0x0000_0007, 0x0, 0, 7)]
#[case(0x0000_0008, 0x0, 1, 0)]
#[case(0x0000_0038, 0x0, 7, 0)]
#[case(0x0000_0040, 0x1, 0, 0)]
#[case(0xFFFF_FFFF, 0x03FF_FFFF, 7, 7)]
#[case(0x1234_5678, 0x0048_D159, 7, 0)]
fn test_decode_fields(#[case] addr: u32, #[case] tag: u32, #[case] index: u32, #[case] offset: u32) {
    // 8 sets, 8-byte lines: 3 offset bits, 3 index bits, 26 tag bits.
    let l = layout(8, 2, 8);
    assert_eq!(l.decode(addr), DecodedAddress { tag, index, offset });
}

#[test]
fn test_compose_inverts_decode() {
    let l = layout(64, 8, 16);
    for addr in [0u32, 1, 0x10, 0x3FF, 0xDEAD_BEEF, u32::MAX] {
        assert_eq!(l.compose(l.decode(addr)), addr);
    }
}

#[test]
fn test_layout_rejects_invalid_config() {
    let config = CacheConfig {
        num_sets: 3,
        associativity: 1,
        line_size: 4,
    };
    assert!(AddressLayout::new(&config).is_err());
}
