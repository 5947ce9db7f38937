//! Subnetting: splitting a network into equal child networks.

use crate::error::{CalcError, Result};
use crate::models::{Address, Network, MAX_LENGTH};
use serde::Serialize;

/// Number of bits needed to represent `n` (0 for 0).
fn bit_length(n: u64) -> u8 {
    (u64::BITS - n.leading_zeros()) as u8
}

fn check_parent_prefix(parent_prefix: u8) -> Result<()> {
    if parent_prefix > MAX_LENGTH {
        return Err(CalcError::prefix(parent_prefix, "prefix length must be between 0 and 32"));
    }
    Ok(())
}

/// Smallest prefix whose subnets hold `required_hosts` usable hosts.
///
/// Host bits are `ceil(log2(required_hosts + 2))`, computed as the bit
/// length of `required_hosts + 1`. Fails when the answer is shorter than
/// `parent_prefix`, i.e. the parent is too small to subdivide.
pub fn min_prefix_for_hosts(parent_prefix: u8, required_hosts: u64) -> Result<u8> {
    check_parent_prefix(parent_prefix)?;
    if required_hosts == 0 {
        return Err(CalcError::requirement(
            required_hosts,
            "required hosts must be greater than 0",
        ));
    }
    let host_bits = bit_length(required_hosts.saturating_add(1));
    if host_bits > MAX_LENGTH {
        return Err(CalcError::requirement(
            required_hosts,
            "more hosts than an IPv4 network can hold",
        ));
    }
    let new_prefix = MAX_LENGTH - host_bits;
    if new_prefix < parent_prefix {
        return Err(CalcError::requirement(
            required_hosts,
            format!("needs a /{new_prefix} which does not fit inside a /{parent_prefix}"),
        ));
    }
    log::debug!("{required_hosts} hosts need {host_bits} host bits: /{new_prefix}");
    Ok(new_prefix)
}

/// Smallest prefix splitting a `/parent_prefix` into at least `required_subnets`.
///
/// Borrowed bits are `ceil(log2(required_subnets))`; one subnet borrows no
/// bits and returns the parent prefix unchanged.
pub fn min_prefix_for_subnet_count(parent_prefix: u8, required_subnets: u64) -> Result<u8> {
    check_parent_prefix(parent_prefix)?;
    if required_subnets == 0 {
        return Err(CalcError::requirement(
            required_subnets,
            "required subnets must be greater than 0",
        ));
    }
    let bits_needed = bit_length(required_subnets - 1);
    let new_prefix = parent_prefix as u32 + bits_needed as u32;
    if new_prefix > MAX_LENGTH as u32 {
        return Err(CalcError::requirement(
            required_subnets,
            format!(
                "needs {bits_needed} more bits but a /{parent_prefix} only has {} host bits",
                MAX_LENGTH - parent_prefix
            ),
        ));
    }
    log::debug!("{required_subnets} subnets borrow {bits_needed} bits: /{new_prefix}");
    Ok(new_prefix as u8)
}

/// Split `net` into all child networks of length `new_prefix`.
///
/// The returned iterator is lazy, so a /0 split into /32s costs nothing
/// until consumed.
pub fn subnets_by_prefix(net: Network, new_prefix: u8) -> Result<Subnets> {
    if new_prefix < net.prefix() || new_prefix > MAX_LENGTH {
        return Err(CalcError::prefix(
            new_prefix,
            format!("subnet prefix must be between /{} and /32", net.prefix()),
        ));
    }
    let subnets = Subnets {
        parent_base: net.base().to_bits() as u64,
        new_prefix,
        next: 0,
        total: 1u64 << (new_prefix - net.prefix()),
    };
    log::debug!("Split {net} into {} x /{new_prefix}", subnets.total);
    Ok(subnets)
}

/// Child networks of a partition in increasing address order.
#[derive(Debug, Clone)]
pub struct Subnets {
    parent_base: u64,
    new_prefix: u8,
    next: u64,
    total: u64,
}

impl Subnets {
    /// Number of subnets in the whole partition, consumed or not.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn new_prefix(&self) -> u8 {
        self.new_prefix
    }
}

impl Iterator for Subnets {
    type Item = Network;

    fn next(&mut self) -> Option<Network> {
        if self.next >= self.total {
            return None;
        }
        let step = 1u64 << (MAX_LENGTH - self.new_prefix);
        let base = self.parent_base + self.next * step;
        self.next += 1;
        Some(Network::from_aligned(Address::from_bits(base as u32), self.new_prefix))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.total - self.next) {
            Ok(left) => (left, Some(left)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Partition result with a materialised prefix of the subnet list.
///
/// `total` always counts the whole partition; `subnets` may be cut short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetSet {
    pub new_prefix: u8,
    pub total: u64,
    pub subnets: Vec<Network>,
}

impl SubnetSet {
    /// Collect at most `limit` subnets from `subnets`.
    pub fn collect(subnets: Subnets, limit: usize) -> SubnetSet {
        let new_prefix = subnets.new_prefix();
        let total = subnets.total();
        let subnets: Vec<Network> = subnets.take(limit).collect();
        if (subnets.len() as u64) < total {
            log::warn!(
                "Listing {} of {total} /{new_prefix} subnets",
                subnets.len()
            );
        }
        SubnetSet {
            new_prefix,
            total,
            subnets,
        }
    }

    pub fn truncated(&self) -> bool {
        (self.subnets.len() as u64) < self.total
    }
}
