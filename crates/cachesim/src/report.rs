//! Human-readable and JSON rendering of a finished run.

use std::io::{self, Write};

use serde::Serialize;

use crate::cache::AccessResult;
use crate::config::CacheConfig;
use crate::stats::Summary;
use crate::trace::Operation;

/// One row of the per-reference table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    pub operation: Operation,
    pub address: String,
    #[serde(flatten)]
    pub result: AccessResult,
}

/// Everything a run produces.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub config: CacheConfig,
    pub entries: Vec<TraceEntry>,
    pub summary: Summary,
}

impl Report {
    /// Writes the configuration banner, the per-reference table (unless
    /// `with_entries` is false) and the summary statistics.
    pub fn write_text<W: Write>(&self, out: &mut W, with_entries: bool) -> io::Result<()> {
        writeln!(out, "Cache Configuration")?;
        writeln!(out)?;
        writeln!(
            out,
            "\t{} {}-way set associative entries",
            self.config.num_sets, self.config.associativity
        )?;
        writeln!(out, "\tof line size {} bytes", self.config.line_size)?;
        writeln!(out)?;
        writeln!(out)?;

        if with_entries {
            writeln!(out, "Results for Each Reference")?;
            writeln!(out)?;
            writeln!(
                out,
                "{:<6} {:>8} {:>8} {:>5} {:>6} {:<6} {:>7}",
                "Access", "Address", "Tag", "Index", "Offset", "Result", "Memrefs"
            )?;
            writeln!(out, "------ -------- -------- ----- ------ ------ -------")?;
            for entry in &self.entries {
                writeln!(
                    out,
                    "{:<6} {:>8} {:>8x} {:>5} {:>6} {:<6} {:>7}",
                    entry.operation.as_str(),
                    entry.address,
                    entry.result.tag,
                    entry.result.index,
                    entry.result.offset,
                    entry.result.outcome.as_str(),
                    entry.result.memory_references
                )?;
            }
            writeln!(out)?;
            writeln!(out)?;
        }

        let s = &self.summary;
        writeln!(out, "Simulation Summary Statistics")?;
        writeln!(out, "-----------------------------")?;
        writeln!(out, "Total hits       : {}", s.hits)?;
        writeln!(out, "Total misses     : {}", s.misses)?;
        writeln!(out, "Total accesses   : {}", s.accesses)?;
        writeln!(out, "Hit ratio        : {:.6}", s.hit_ratio)?;
        writeln!(out, "Miss ratio       : {:.6}", s.miss_ratio)?;
        Ok(())
    }

    pub fn to_text(&self, with_entries: bool) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write_text(&mut buf, with_entries)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
