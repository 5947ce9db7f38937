//! Canonical IPv4 network (address + prefix length).

use super::ipv4::{get_cidr_mask, prefix_from_mask, Address, MAX_LENGTH};
use crate::error::{CalcError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Clear the host bits of `address` for the given prefix.
///
/// User input names a network by any address inside it, so construction
/// normalises instead of rejecting `192.168.1.10/24`.
pub fn canonicalize(address: Address, prefix: u8) -> Result<Address> {
    let mask = get_cidr_mask(prefix)?;
    Ok(Address::from_bits(address.to_bits() & mask))
}

/// Parse a prefix given as decimal `0..=32`, a dotted netmask or a dotted wildcard.
///
/// Dotted text is tried as a netmask first, so `0.0.0.0` is `/0` and
/// `255.255.255.255` is `/32`.
pub fn parse_prefix_or_mask(text: &str) -> Result<u8> {
    if text.contains('.') {
        let bits = Address::parse(text)
            .map_err(|e| CalcError::prefix(text, format!("mask is not an address: {e}")))?
            .to_bits();
        return prefix_from_mask(bits)
            .or_else(|| prefix_from_mask(!bits))
            .ok_or_else(|| CalcError::prefix(text, "not a contiguous netmask or wildcard"));
    }

    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalcError::prefix(text, "prefix length is not a decimal number"));
    }
    match text.parse::<u32>() {
        Ok(len) if len <= MAX_LENGTH as u32 => Ok(len as u8),
        _ => Err(CalcError::prefix(text, "prefix length must be between 0 and 32")),
    }
}

/// Build a canonical network from user text.
///
/// `address_text` may carry its own `/prefix` (or `/mask`) when
/// `prefix_or_mask_text` is `None`. With neither, the legacy class default
/// of the address is used.
pub fn make_network(address_text: &str, prefix_or_mask_text: Option<&str>) -> Result<Network> {
    let prefix_or_mask_text = prefix_or_mask_text.filter(|s| !s.is_empty());
    let (addr_part, prefix_part) = match address_text.split_once('/') {
        Some((addr, prefix)) => {
            if prefix_or_mask_text.is_some() {
                return Err(CalcError::address(
                    address_text,
                    "prefix given both inline and separately",
                ));
            }
            (addr, Some(prefix))
        }
        None => (address_text, prefix_or_mask_text),
    };

    let address = Address::parse(addr_part)?;
    let prefix = match prefix_part {
        Some(text) => parse_prefix_or_mask(text)?,
        None => address.default_prefix_for_legacy_class(),
    };
    let network = Network::new(address, prefix)?;
    if network.base() != address {
        log::debug!("Normalised {address}/{prefix} to {network}");
    }
    Ok(network)
}

/// IPv4 network in canonical form: all host bits of `base` are zero.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Network {
    base: Address,
    prefix: u8,
}

impl Network {
    /// Create a network from any address inside it.
    pub fn new(address: Address, prefix: u8) -> Result<Network> {
        let base = canonicalize(address, prefix)?;
        Ok(Network { base, prefix })
    }

    /// Network from a base already aligned to a valid `prefix`.
    pub(crate) fn from_aligned(base: Address, prefix: u8) -> Network {
        debug_assert!(prefix <= MAX_LENGTH);
        debug_assert_eq!(canonicalize(base, prefix).ok(), Some(base));
        Network { base, prefix }
    }

    /// Network address (lowest address in the block).
    pub fn base(&self) -> Address {
        self.base
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn netmask(&self) -> Address {
        Address::from_bits(self.mask_bits())
    }

    /// Inverse of the netmask, e.g. `0.0.0.255` for a /24.
    pub fn wildcard(&self) -> Address {
        Address::from_bits(!self.mask_bits())
    }

    /// Highest address in the block.
    pub fn broadcast(&self) -> Address {
        Address::from_bits(self.base.to_bits() | !self.mask_bits())
    }

    pub fn host_bits(&self) -> u8 {
        MAX_LENGTH - self.prefix
    }

    pub fn total_addresses(&self) -> u64 {
        1u64 << self.host_bits()
    }

    /// Addresses minus network and broadcast; 0 for /31 and /32.
    pub fn usable_hosts(&self) -> u64 {
        let total = self.total_addresses();
        if total > 2 {
            total - 2
        } else {
            0
        }
    }

    /// First usable host, `None` when the block has no usable hosts.
    pub fn first_host(&self) -> Option<Address> {
        (self.usable_hosts() > 0).then(|| Address::from_bits(self.base.to_bits() + 1))
    }

    /// Last usable host, `None` when the block has no usable hosts.
    pub fn last_host(&self) -> Option<Address> {
        (self.usable_hosts() > 0).then(|| Address::from_bits(self.broadcast().to_bits() - 1))
    }

    pub fn contains(&self, addr: Address) -> bool {
        addr >= self.base && addr <= self.broadcast()
    }

    /// Enclosing network with the shorter `new_prefix`.
    pub fn supernet(&self, new_prefix: u8) -> Result<Network> {
        if new_prefix > self.prefix {
            return Err(CalcError::prefix(
                new_prefix,
                format!("supernet prefix must not be longer than /{}", self.prefix),
            ));
        }
        Network::new(self.base, new_prefix)
    }

    fn mask_bits(&self) -> u32 {
        // prefix is validated on construction
        match self.prefix {
            0 => 0,
            p => u32::MAX << (MAX_LENGTH - p),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix)
    }
}

impl FromStr for Network {
    type Err = CalcError;

    /// Parse `a.b.c.d/p` (or `/mask`); a bare address is a /32.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((addr, prefix)) => {
                Network::new(Address::parse(addr)?, parse_prefix_or_mask(prefix)?)
            }
            None => Network::new(Address::parse(s)?, MAX_LENGTH),
        }
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
