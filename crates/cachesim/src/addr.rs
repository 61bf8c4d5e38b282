//! Address decoding.
//!
//! A 32-bit address splits, most significant bit first, into a tag, a set
//! index and a byte offset within the line:
//!
//! ```text
//!  31                                   0
//! +----------------+---------+----------+
//! |      tag       |  index  |  offset  |
//! +----------------+---------+----------+
//!   tag_bits         index_bits offset_bits
//! ```

use serde::Serialize;

use crate::config::{ADDRESS_BITS, CacheConfig};
use crate::error::ConfigError;

/// Field widths derived from a cache geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AddressLayout {
    pub tag_bits: u32,
    pub index_bits: u32,
    pub offset_bits: u32,
}

/// An address split into its cache fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DecodedAddress {
    pub tag: u32,
    pub index: u32,
    pub offset: u32,
}

impl AddressLayout {
    /// Derives the layout for `config`, validating it first.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let offset_bits = config.line_size.trailing_zeros();
        let index_bits = config.num_sets.trailing_zeros();

        Ok(Self {
            tag_bits: ADDRESS_BITS - index_bits - offset_bits,
            index_bits,
            offset_bits,
        })
    }

    #[inline(always)]
    pub fn decode(&self, addr: u32) -> DecodedAddress {
        DecodedAddress {
            tag: addr >> (self.index_bits + self.offset_bits),
            index: (addr >> self.offset_bits) & mask(self.index_bits),
            offset: addr & mask(self.offset_bits),
        }
    }

    /// Reassembles an address from its fields. Inverse of [`AddressLayout::decode`].
    pub fn compose(&self, fields: DecodedAddress) -> u32 {
        (fields.tag << (self.index_bits + self.offset_bits))
            | ((fields.index & mask(self.index_bits)) << self.offset_bits)
            | (fields.offset & mask(self.offset_bits))
    }
}

#[inline(always)]
fn mask(bits: u32) -> u32 {
    if bits >= u32::BITS {
        u32::MAX
    } else {
        (1 << bits) - 1
    }
}
