//! Trace replay.
//!
//! Records are processed strictly in order, each one to completion, against
//! a single [`Cache`]. The first malformed record aborts the run.

use std::io::BufRead;

use crate::cache::{AccessResult, Cache};
use crate::config::CacheConfig;
use crate::error::{ConfigError, Result, TraceError};
use crate::report::{Report, TraceEntry};
use crate::stats::Statistics;
use crate::trace::{AccessRecord, TraceReader};

pub struct Simulation {
    cache: Cache,
    entries: Vec<TraceEntry>,
    keep_entries: bool,
}

impl Simulation {
    pub fn new(config: CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            cache: Cache::new(config)?,
            entries: Vec::new(),
            keep_entries: true,
        })
    }

    /// Whether per-record rows are kept for the report. Counters are kept
    /// either way.
    pub fn with_entries(mut self, keep: bool) -> Self {
        self.keep_entries = keep;
        self
    }

    /// Replays one record.
    pub fn step(&mut self, record: AccessRecord) -> AccessResult {
        let result = self.cache.access(record.address, record.operation);
        if self.keep_entries {
            self.entries.push(TraceEntry {
                operation: record.operation,
                address: record.label,
                result,
            });
        }
        result
    }

    /// Clears the cache, counters and recorded rows for a new trace.
    pub fn reset(&mut self) {
        self.cache.reset();
        self.entries.clear();
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn stats(&self) -> &Statistics {
        self.cache.stats()
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn finish(self) -> Report {
        Report {
            config: *self.cache.config(),
            summary: self.cache.stats().summary(),
            entries: self.entries,
        }
    }

    /// Builds a cache for `config` and replays `records` through it,
    /// keeping a row per record.
    pub fn run<I>(config: CacheConfig, records: I) -> Result<Report>
    where
        I: IntoIterator<Item = Result<AccessRecord, TraceError>>,
    {
        Self::run_with(config, records, true)
    }

    fn run_with<I>(config: CacheConfig, records: I, keep_entries: bool) -> Result<Report>
    where
        I: IntoIterator<Item = Result<AccessRecord, TraceError>>,
    {
        let mut sim = Self::new(config)?.with_entries(keep_entries);
        for record in records {
            sim.step(record?);
        }
        log::info!(
            "replayed {} records: {} hits, {} misses",
            sim.stats().total(),
            sim.stats().hits,
            sim.stats().misses
        );
        Ok(sim.finish())
    }

    /// Replays a trace read from `reader`.
    ///
    /// With `config` absent the geometry is taken from the trace header.
    /// The geometry is validated before any record is parsed. When
    /// `keep_entries` is false the report carries only the summary.
    pub fn run_reader<R: BufRead>(
        reader: R,
        config: Option<CacheConfig>,
        keep_entries: bool,
    ) -> Result<Report> {
        match config {
            Some(config) => Self::run_with(config, TraceReader::new(reader), keep_entries),
            None => {
                let (config, records) = TraceReader::with_header(reader)?;
                Self::run_with(config, records, keep_entries)
            }
        }
    }
}
