pub mod set;

use std::collections::BTreeMap;

use serde::Serialize;

pub use self::set::{CacheLine, CacheSet, Fill};
use crate::addr::{AddressLayout, DecodedAddress};
use crate::config::CacheConfig;
use crate::error::ConfigError;
use crate::stats::{Outcome, Statistics};
use crate::trace::Operation;

/// Classification of one access, with the decoded address fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AccessResult {
    pub tag: u32,
    pub index: u32,
    pub offset: u32,
    pub outcome: Outcome,
    pub memory_references: u32,
}

/// Set-associative cache with per-set FIFO replacement.
///
/// Owns its sets and the hit/miss counters for the current run. Reads and
/// writes are classified the same way; there is no dirty state.
///
/// A set is allocated the first time an access maps to it. Untouched sets
/// read as empty, so memory follows the trace rather than the geometry.
pub struct Cache {
    config: CacheConfig,
    layout: AddressLayout,
    sets: BTreeMap<u32, CacheSet>,
    empty: CacheSet,
    stats: Statistics,
}

impl Cache {
    /// Validates `config` and starts with every set empty.
    pub fn new(config: CacheConfig) -> Result<Self, ConfigError> {
        let layout = AddressLayout::new(&config)?;
        let ways = config.associativity as usize;

        log::info!(
            "cache: {} sets x {} ways x {} bytes ({} tag / {} index / {} offset bits)",
            config.num_sets,
            config.associativity,
            config.line_size,
            layout.tag_bits,
            layout.index_bits,
            layout.offset_bits
        );

        Ok(Self {
            config,
            layout,
            sets: BTreeMap::new(),
            empty: CacheSet::new(ways),
            stats: Statistics::default(),
        })
    }

    /// Empties every set, rewinds every FIFO cursor and zeroes the counters.
    pub fn reset(&mut self) {
        self.sets.clear();
        self.stats.reset();
        log::info!("cache: reset");
    }

    /// Looks up `addr`, installing it on a miss, and records the outcome.
    pub fn access(&mut self, addr: u32, op: Operation) -> AccessResult {
        let DecodedAddress { tag, index, offset } = self.layout.decode(addr);
        log::trace!(
            "{} {:#010x}: tag={:#x} index={} offset={}",
            op,
            addr,
            tag,
            index,
            offset
        );

        let ways = self.empty.ways();
        let set = self
            .sets
            .entry(index)
            .or_insert_with(|| CacheSet::new(ways));
        let outcome = match set.lookup(tag) {
            Some(way) => {
                log::debug!("hit  set {} way {} tag {:#x}", index, way, tag);
                Outcome::Hit
            }
            None => {
                let Fill { way, evicted } = set.fill(tag);
                match evicted {
                    Some(old) => log::debug!(
                        "miss set {} way {} tag {:#x} (evicted {:#x})",
                        index,
                        way,
                        tag,
                        old
                    ),
                    None => log::debug!("miss set {} way {} tag {:#x}", index, way, tag),
                }
                Outcome::Miss
            }
        };

        self.stats.record(outcome);

        AccessResult {
            tag,
            index,
            offset,
            outcome,
            memory_references: outcome.memory_references(),
        }
    }

    /// Returns true if `addr` is resident, without touching any state.
    pub fn contains(&self, addr: u32) -> bool {
        let fields = self.layout.decode(addr);
        self.sets
            .get(&fields.index)
            .is_some_and(|set| set.lookup(fields.tag).is_some())
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn layout(&self) -> &AddressLayout {
        &self.layout
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// The set at `index`, or `None` past the last set. Sets never accessed
    /// are returned empty.
    pub fn set(&self, index: u32) -> Option<&CacheSet> {
        if index >= self.config.num_sets {
            return None;
        }
        Some(self.sets.get(&index).unwrap_or(&self.empty))
    }

    /// Sets that have been accessed since creation or the last reset, by index.
    pub fn touched_sets(&self) -> impl Iterator<Item = (u32, &CacheSet)> {
        self.sets.iter().map(|(&index, set)| (index, set))
    }
}
