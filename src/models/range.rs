//! Inclusive IPv4 address range.

use super::{Address, Network};
use crate::error::{CalcError, Result};
use serde::Serialize;
use std::fmt;

/// Inclusive range `start..=end` with `start <= end`.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash, Serialize)]
pub struct AddressRange {
    start: Address,
    end: Address,
}

impl AddressRange {
    pub fn new(start: Address, end: Address) -> Result<AddressRange> {
        if start > end {
            return Err(CalcError::range(
                format!("{start}-{end}"),
                "range start is after range end",
            ));
        }
        Ok(AddressRange { start, end })
    }

    /// Smallest range enclosing every given network.
    ///
    /// Addresses between disjoint networks are part of the result; this is
    /// the enclosing span, not the union.
    pub fn from_networks(nets: &[Network]) -> Result<AddressRange> {
        let start = nets.iter().map(Network::base).min();
        let end = nets.iter().map(Network::broadcast).max();
        match (start, end) {
            (Some(start), Some(end)) => AddressRange::new(start, end),
            _ => Err(CalcError::range("", "no networks given")),
        }
    }

    pub fn start(&self) -> Address {
        self.start
    }

    pub fn end(&self) -> Address {
        self.end
    }

    /// Number of addresses in the range, up to 2^32.
    pub fn size(&self) -> u64 {
        self.end.to_bits() as u64 - self.start.to_bits() as u64 + 1
    }

    pub fn contains(&self, addr: Address) -> bool {
        addr >= self.start && addr <= self.end
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
