//! Cache geometry.
//!
//! A [`CacheConfig`] is fixed for the lifetime of a run. It is validated once,
//! before any cache state is allocated, and is then treated as immutable.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, TraceError};

/// Width of a physical address in bits.
pub const ADDRESS_BITS: u32 = 32;

/// Largest supported number of lines per set.
pub const MAX_ASSOCIATIVITY: u32 = 8;

/// Smallest supported line size in bytes.
pub const MIN_LINE_SIZE: u32 = 4;

/// Number of header lines that precede the trace records.
pub const HEADER_LINES: usize = 3;

/// Geometry of a set-associative cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Number of sets. Power of two.
    pub num_sets: u32,
    /// Lines per set. At most [`MAX_ASSOCIATIVITY`]; any count is allowed.
    pub associativity: u32,
    /// Bytes per line. Power of two, at least [`MIN_LINE_SIZE`].
    pub line_size: u32,
}

impl CacheConfig {
    /// Builds and validates a configuration.
    pub fn new(num_sets: u32, associativity: u32, line_size: u32) -> Result<Self, ConfigError> {
        let config = Self {
            num_sets,
            associativity,
            line_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every geometry constraint, reporting the first violation.
    ///
    /// Zero dimensions are checked first, then the associativity bound, the
    /// line size bound, power-of-two sets and line size, and finally the
    /// address width.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("num_sets", self.num_sets),
            ("associativity", self.associativity),
            ("line_size", self.line_size),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDimension { field });
            }
        }

        if self.associativity > MAX_ASSOCIATIVITY {
            return Err(ConfigError::AssociativityTooLarge {
                got: self.associativity,
                max: MAX_ASSOCIATIVITY,
            });
        }

        if self.line_size < MIN_LINE_SIZE {
            return Err(ConfigError::LineSizeTooSmall {
                got: self.line_size,
                min: MIN_LINE_SIZE,
            });
        }

        for (field, value) in [("num_sets", self.num_sets), ("line_size", self.line_size)] {
            if !value.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo { field, got: value });
            }
        }

        let index_bits = self.num_sets.trailing_zeros();
        let offset_bits = self.line_size.trailing_zeros();
        if index_bits + offset_bits >= ADDRESS_BITS {
            return Err(ConfigError::GeometryOverflow {
                index_bits,
                offset_bits,
                address_bits: ADDRESS_BITS,
            });
        }

        Ok(())
    }

    /// Parses the three header lines (sets, set size, line size).
    ///
    /// Every non-digit character is discarded, so `Number of sets: 8` reads
    /// as 8. `first_line` is the line number of the first header line and is
    /// only used for error reporting. Only the header syntax is checked here;
    /// call [`CacheConfig::validate`] for the geometry rules.
    pub fn from_header_lines<S: AsRef<str>>(
        lines: &[S],
        first_line: usize,
    ) -> Result<Self, TraceError> {
        const FIELDS: [&str; HEADER_LINES] = ["number of sets", "set size", "line size"];

        let mut values = [0u32; HEADER_LINES];
        for (i, field) in FIELDS.into_iter().enumerate() {
            let line = first_line + i;
            let text: &str = lines
                .get(i)
                .map(|s| s.as_ref())
                .ok_or(TraceError::MissingHeader { line, field })?;
            let digits = header_digits(text);
            if digits.is_empty() {
                return Err(TraceError::BadHeader {
                    line,
                    text: text.to_string(),
                });
            }
            values[i] = digits.parse().map_err(|_| TraceError::HeaderOutOfRange {
                line,
                text: text.to_string(),
            })?;
        }

        Ok(Self {
            num_sets: values[0],
            associativity: values[1],
            line_size: values[2],
        })
    }

    /// Total number of lines in the cache.
    pub fn total_lines(&self) -> usize {
        self.num_sets as usize * self.associativity as usize
    }

    /// Capacity in bytes.
    pub fn capacity_bytes(&self) -> u64 {
        self.total_lines() as u64 * u64::from(self.line_size)
    }
}

fn header_digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}
