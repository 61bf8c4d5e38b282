//! Trace input.
//!
//! A trace is a configuration header of [`HEADER_LINES`] lines followed by
//! one record per line in the form `address:op:bytes`, for example
//! `1a2b3c4d:R:4`. The address is hexadecimal, the operation is `R` or `W`,
//! and the byte count is decimal. Blank lines are ignored.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use serde::Serialize;

use crate::config::{CacheConfig, HEADER_LINES};
use crate::error::TraceError;

/// Kind of memory access. Both kinds are classified identically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Read,
    Write,
}

impl Operation {
    /// Single-letter trace code.
    pub fn code(self) -> char {
        match self {
            Operation::Read => 'R',
            Operation::Write => 'W',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Write => "write",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operation code was neither `R` nor `W`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" => Ok(Operation::Read),
            "W" => Ok(Operation::Write),
            other => Err(UnknownOperation(other.to_string())),
        }
    }
}

/// One parsed trace line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccessRecord {
    /// Address text as it appeared in the trace, used when reporting.
    pub label: String,
    pub address: u32,
    pub operation: Operation,
    /// Width of the access. Does not affect classification.
    pub byte_count: u32,
}

impl AccessRecord {
    pub fn new(address: u32, operation: Operation, byte_count: u32) -> Self {
        Self {
            label: format!("{:08x}", address),
            address,
            operation,
            byte_count,
        }
    }

    /// Parses an `address:op:bytes` line. Errors report line 0; readers
    /// rewrite it to the real line number.
    pub fn parse(text: &str) -> Result<Self, TraceError> {
        let malformed = || TraceError::MalformedRecord {
            line: 0,
            text: text.to_string(),
        };

        let mut fields = text.trim().splitn(3, ':').map(str::trim);
        let (Some(addr), Some(op), Some(bytes)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed());
        };

        let digits = addr
            .strip_prefix("0x")
            .or_else(|| addr.strip_prefix("0X"))
            .unwrap_or(addr);
        let address = u32::from_str_radix(digits, 16)
            .ok()
            .filter(|_| !digits.starts_with('+'))
            .ok_or_else(|| TraceError::BadAddress {
                line: 0,
                text: addr.to_string(),
            })?;

        let operation = op
            .parse::<Operation>()
            .map_err(|UnknownOperation(text)| TraceError::UnknownOperation { line: 0, text })?;

        let byte_count = bytes
            .parse::<u32>()
            .ok()
            .filter(|&n| n > 0 && !bytes.starts_with('+'))
            .ok_or_else(|| TraceError::BadByteCount {
                line: 0,
                text: bytes.to_string(),
            })?;

        Ok(Self {
            label: addr.to_string(),
            address,
            operation,
            byte_count,
        })
    }
}

/// Streams a header and records out of any buffered reader.
pub struct TraceReader<R> {
    lines: std::io::Lines<R>,
    line: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a reader whose first line is a trace record.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// Reads the configuration header, leaving the reader at the first record.
    ///
    /// The returned configuration has not been validated.
    pub fn with_header(reader: R) -> Result<(CacheConfig, Self), TraceError> {
        let mut trace = Self::new(reader);
        let mut header = Vec::with_capacity(HEADER_LINES);
        while header.len() < HEADER_LINES {
            match trace.next_line()? {
                Some(text) => header.push(text),
                None => break,
            }
        }
        let config = CacheConfig::from_header_lines(&header, 1)?;
        log::debug!("read configuration header: {:?}", config);
        Ok((config, trace))
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    fn next_line(&mut self) -> Result<Option<String>, TraceError> {
        match self.lines.next() {
            None => Ok(None),
            Some(Err(source)) => Err(TraceError::Io {
                line: self.line + 1,
                source,
            }),
            Some(Ok(text)) => {
                self.line += 1;
                Ok(Some(text))
            }
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<AccessRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.next_line() {
                Ok(Some(text)) => text,
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            };
            if text.trim().is_empty() {
                continue;
            }
            let line = self.line;
            return Some(AccessRecord::parse(&text).map_err(|e| e.at_line(line)));
        }
    }
}
