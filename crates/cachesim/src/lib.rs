//! Set-associative cache simulator.
//!
//! Replays a trace of memory accesses against a cache of fixed geometry
//! (sets, ways, line size) with per-set FIFO replacement, classifying each
//! access as a hit or miss and accumulating hit/miss statistics.
//!
//! ```
//! use cachesim::{Cache, CacheConfig, Operation, Outcome};
//!
//! let mut cache = Cache::new(CacheConfig::new(2, 2, 4).unwrap()).unwrap();
//! assert_eq!(cache.access(0x40, Operation::Read).outcome, Outcome::Miss);
//! assert_eq!(cache.access(0x40, Operation::Write).outcome, Outcome::Hit);
//! ```

/// Address decoding into tag, index and offset.
pub mod addr;
/// Cache sets, lines and the access operation.
pub mod cache;
/// Cache geometry and its validation.
pub mod config;
/// Error types.
pub mod error;
/// Report rendering.
pub mod report;
/// Trace replay.
pub mod sim;
/// Hit/miss counters.
pub mod stats;
/// Trace record parsing.
pub mod trace;

pub use addr::{AddressLayout, DecodedAddress};
pub use cache::{AccessResult, Cache, CacheSet};
pub use config::CacheConfig;
pub use error::{ConfigError, Error, Result, TraceError};
pub use report::{Report, TraceEntry};
pub use sim::Simulation;
pub use stats::{Outcome, Statistics, Summary};
pub use trace::{AccessRecord, Operation, TraceReader};
