//! # Cache Access Tests
//!
//! Hit/miss classification, set routing and FIFO replacement.

use cachesim::cache::set::{CacheSet, Fill};
use cachesim::{AccessResult, Cache, CacheConfig, Operation, Outcome};
use pretty_assertions::assert_eq;

use Outcome::{Hit, Miss};

fn cache(sets: u32, ways: u32, line: u32) -> Cache {
    Cache::new(CacheConfig::new(sets, ways, line).unwrap()).unwrap()
}

fn outcomes(cache: &mut Cache, addrs: &[u32]) -> Vec<Outcome> {
    addrs
        .iter()
        .map(|&a| cache.access(a, Operation::Read).outcome)
        .collect()
}

#[test]
fn test_new_cache_is_empty() {
    let c = cache(4, 2, 16);
    for i in 0..4 {
        let set = c.set(i).unwrap();
        assert_eq!(set.ways(), 2);
        assert_eq!(set.occupied(), 0);
        assert_eq!(set.oldest(), 0);
    }
    assert!(c.set(4).is_none());
    assert_eq!(c.touched_sets().count(), 0);
    assert_eq!(c.stats().total(), 0);
}

#[test]
fn test_rejects_invalid_config() {
    let config = CacheConfig {
        num_sets: 4,
        associativity: 16,
        line_size: 16,
    };
    assert!(Cache::new(config).is_err());
}

#[test]
fn test_single_line_cache_thrashes() {
    let mut c = cache(1, 1, 4);
    assert_eq!(outcomes(&mut c, &[0x0, 0x10, 0x0]), vec![Miss, Miss, Miss]);
}

#[test]
fn test_fifo_evicts_first_tag_of_full_set() {
    // 2 sets, 4-byte lines: bit 2 selects the set, tag starts at bit 3.
    let mut c = cache(2, 2, 4);
    assert_eq!(
        outcomes(&mut c, &[0x00, 0x08, 0x10, 0x18, 0x00]),
        vec![Miss, Miss, Miss, Miss, Miss]
    );
    assert_eq!(c.set(0).unwrap().tags(), vec![3, 0]);
    assert_eq!(c.set(1).unwrap().occupied(), 0);
}

#[test]
fn test_hit_does_not_refresh_fifo_order() {
    let (a, b, cc) = (0x000, 0x100, 0x200);
    let mut c = cache(1, 2, 16);
    assert_eq!(
        outcomes(&mut c, &[a, b, a, cc, b, a, b]),
        vec![Miss, Miss, Hit, Miss, Hit, Miss, Miss]
    );
}

#[test]
fn test_routes_by_decoded_index() {
    let mut c = cache(4, 1, 4);
    let addrs = [0x0, 0x4, 0x8, 0xC];
    assert_eq!(outcomes(&mut c, &addrs), vec![Miss; 4]);
    assert_eq!(outcomes(&mut c, &addrs), vec![Hit; 4]);
    for i in 0..4 {
        assert_eq!(c.set(i).unwrap().occupied(), 1, "set {}", i);
    }
}

#[test]
fn test_same_line_different_offset_hits() {
    let mut c = cache(8, 2, 32);
    assert_eq!(c.access(0x1000, Operation::Read).outcome, Miss);
    assert_eq!(c.access(0x101F, Operation::Write).outcome, Hit);
    assert_eq!(c.access(0x1020, Operation::Read).outcome, Miss);
}

#[test]
fn test_reads_and_writes_classify_alike() {
    let mut c = cache(2, 2, 8);
    assert_eq!(c.access(0x40, Operation::Write).outcome, Miss);
    assert_eq!(c.access(0x40, Operation::Read).outcome, Hit);
    assert_eq!(c.access(0x40, Operation::Write).outcome, Hit);
}

#[test]
fn test_access_result_fields() {
    // 4 sets, 16-byte lines: 4 offset bits, 2 index bits.
    let mut c = cache(4, 2, 16);
    assert_eq!(
        c.access(0xABCD_1234, Operation::Read),
        AccessResult {
            tag: 0xABCD_1234 >> 6,
            index: 3,
            offset: 4,
            outcome: Miss,
            memory_references: 1,
        }
    );
    let again = c.access(0xABCD_1234, Operation::Read);
    assert_eq!(again.outcome, Hit);
    assert_eq!(again.memory_references, 0);
}

#[test]
fn test_statistics_follow_accesses() {
    let mut c = cache(1, 2, 4);
    outcomes(&mut c, &[0x0, 0x0, 0x10, 0x0, 0x20]);
    assert_eq!(c.stats().hits, 2);
    assert_eq!(c.stats().misses, 3);
}

#[test]
fn test_reset_clears_lines_cursors_and_counters() {
    let mut c = cache(2, 2, 4);
    outcomes(&mut c, &[0x00, 0x08, 0x10, 0x04]);
    assert_eq!(c.set(0).unwrap().oldest(), 1);

    c.reset();

    assert_eq!(c.stats().total(), 0);
    assert_eq!(c.touched_sets().count(), 0);
    for i in 0..2 {
        assert_eq!(c.set(i).unwrap().occupied(), 0);
        assert_eq!(c.set(i).unwrap().oldest(), 0);
    }
    assert!(!c.contains(0x10));
    assert_eq!(c.access(0x10, Operation::Read).outcome, Miss);
}

#[test]
fn test_contains_has_no_side_effects() {
    let mut c = cache(1, 1, 4);
    assert!(!c.contains(0x8));
    assert_eq!(c.stats().total(), 0);
    c.access(0x8, Operation::Read);
    assert!(c.contains(0x8));
    assert!(c.contains(0xB));
    assert_eq!(c.stats().total(), 1);
}

#[test]
fn test_set_fills_lowest_way_first() {
    let mut set = CacheSet::new(4);
    assert_eq!(set.victim(), 0);
    set.fill(7);
    set.fill(9);
    assert_eq!(set.victim(), 2);
    assert_eq!(set.lookup(9), Some(1));
    assert_eq!(set.lookup(8), None);
}

#[test]
fn test_set_evicts_in_insertion_order() {
    let mut set = CacheSet::new(2);
    set.fill(1);
    set.fill(2);
    assert!(set.is_full());
    assert_eq!(set.victim(), 0);
    assert_eq!(
        set.fill(3),
        Fill {
            way: 0,
            evicted: Some(1)
        }
    );
    assert_eq!(
        set.fill(4),
        Fill {
            way: 1,
            evicted: Some(2)
        }
    );
    assert_eq!(
        set.fill(5),
        Fill {
            way: 0,
            evicted: Some(3)
        }
    );
    assert_eq!(set.tags(), vec![4, 5]);
}

#[test]
fn test_three_way_set_wraps_cursor() {
    // 1 set, 16-byte lines: tags are addr >> 4.
    let mut c = cache(1, 3, 16);
    assert_eq!(
        outcomes(&mut c, &[0x00, 0x10, 0x20]),
        vec![Miss, Miss, Miss]
    );
    assert!(c.set(0).unwrap().is_full());
    assert_eq!(c.set(0).unwrap().oldest(), 0);

    // Fourth distinct tag evicts the first, cursor moves to way 1.
    assert_eq!(c.access(0x30, Operation::Read).outcome, Miss);
    assert!(!c.contains(0x00));
    assert_eq!(c.set(0).unwrap().oldest(), 1);

    assert_eq!(outcomes(&mut c, &[0x40, 0x50]), vec![Miss, Miss]);
    assert_eq!(c.set(0).unwrap().oldest(), 0);
    assert_eq!(c.set(0).unwrap().tags(), vec![3, 4, 5]);
    assert_eq!(c.access(0x30, Operation::Write).outcome, Hit);
}

#[test]
fn test_large_geometry_allocates_sets_on_demand() {
    // 29 index bits, 2 offset bits, 1 tag bit.
    let mut c = cache(1 << 29, 8, 4);
    assert_eq!(c.layout().tag_bits, 1);
    assert_eq!(c.touched_sets().count(), 0);

    let far = 0x7FFF_FFFC;
    assert_eq!(c.access(0x0, Operation::Read).outcome, Miss);
    assert_eq!(c.access(far, Operation::Read).outcome, Miss);
    assert_eq!(c.access(far, Operation::Read).outcome, Hit);

    let touched: Vec<u32> = c.touched_sets().map(|(index, _)| index).collect();
    assert_eq!(touched, vec![0, (1 << 29) - 1]);
    assert_eq!(c.set(12345).unwrap().occupied(), 0);
}
