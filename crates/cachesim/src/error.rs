//! Error types for configuration, trace parsing and whole-run failures.
//!
//! Configuration errors are fatal and raised before any access is simulated.
//! Trace errors carry the 1-based line number of the offending input line.
//! Every error is propagated to the caller; none are retried.

use std::io;

/// Rejected cache geometry.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Cache dimensions must be positive ({field} = 0)")]
    ZeroDimension { field: &'static str },

    #[error("Associativity must be at most {max} (got {got})")]
    AssociativityTooLarge { got: u32, max: u32 },

    #[error("Line size must be at least {min} (got {got})")]
    LineSizeTooSmall { got: u32, min: u32 },

    #[error("Cache dimensions must be powers of 2 ({field} = {got})")]
    NotPowerOfTwo { field: &'static str, got: u32 },

    #[error(
        "index ({index_bits} bits) and offset ({offset_bits} bits) leave no tag bits in a {address_bits}-bit address"
    )]
    GeometryOverflow {
        index_bits: u32,
        offset_bits: u32,
        address_bits: u32,
    },
}

/// Malformed configuration header or trace record.
#[derive(thiserror::Error, Debug)]
pub enum TraceError {
    #[error("missing configuration header line {line} ({field})")]
    MissingHeader { line: usize, field: &'static str },

    #[error("line {line}: no numeric value in header line {text:?}")]
    BadHeader { line: usize, text: String },

    #[error("line {line}: header value in {text:?} does not fit in 32 bits")]
    HeaderOutOfRange { line: usize, text: String },

    #[error("line {line}: expected `address:op:bytes`, got {text:?}")]
    MalformedRecord { line: usize, text: String },

    #[error("line {line}: invalid hexadecimal address {text:?}")]
    BadAddress { line: usize, text: String },

    #[error("line {line}: unknown operation code {text:?} (expected R or W)")]
    UnknownOperation { line: usize, text: String },

    #[error("line {line}: invalid byte count {text:?}")]
    BadByteCount { line: usize, text: String },

    #[error("line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
}

impl TraceError {
    /// Line number the error was reported at.
    pub fn line(&self) -> usize {
        match self {
            TraceError::MissingHeader { line, .. }
            | TraceError::BadHeader { line, .. }
            | TraceError::HeaderOutOfRange { line, .. }
            | TraceError::MalformedRecord { line, .. }
            | TraceError::BadAddress { line, .. }
            | TraceError::UnknownOperation { line, .. }
            | TraceError::BadByteCount { line, .. }
            | TraceError::Io { line, .. } => *line,
        }
    }

    /// Rewrites the line number, used when a record is parsed outside a reader.
    pub(crate) fn at_line(mut self, at: usize) -> Self {
        match &mut self {
            TraceError::MissingHeader { line, .. }
            | TraceError::BadHeader { line, .. }
            | TraceError::HeaderOutOfRange { line, .. }
            | TraceError::MalformedRecord { line, .. }
            | TraceError::BadAddress { line, .. }
            | TraceError::UnknownOperation { line, .. }
            | TraceError::BadByteCount { line, .. }
            | TraceError::Io { line, .. } => *line = at,
        }
        self
    }
}

/// Any failure that aborts a simulation run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid input: {0}")]
    Trace(#[from] TraceError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
