//! Supernetting: covering an address range with the fewest CIDR blocks.

use crate::error::Result;
use crate::models::{lo_mask, Address, AddressRange, Network, MAX_LENGTH};

/// Minimal ordered list of networks covering exactly `range`.
///
/// From the current start address, take the biggest block that is both
/// aligned on that address and does not run past the range end, then
/// continue after its broadcast address.
pub fn summarize(range: AddressRange) -> Result<Vec<Network>> {
    let end = range.end().to_bits() as u64;
    let mut start = range.start().to_bits() as u64;
    let mut networks = Vec::new();

    while start <= end {
        let addr = Address::from_bits(start as u32);
        let aligned_bits = MAX_LENGTH - lo_mask(addr);
        let remaining = end - start + 1;
        let fits_bits = (u64::BITS - 1 - remaining.leading_zeros()) as u8;
        let host_bits = aligned_bits.min(fits_bits);

        let network = Network::new(addr, MAX_LENGTH - host_bits)?;
        log::trace!(
            "at {addr}: aligned /{}, fits /{} -> {network}",
            MAX_LENGTH - aligned_bits,
            MAX_LENGTH - fits_bits
        );
        networks.push(network);
        start += 1u64 << host_bits;
    }

    log::debug!("Summarised {range} into {} network(s)", networks.len());
    Ok(networks)
}

/// Summarise the range enclosing all `nets`, gaps between them included.
pub fn summarize_networks(nets: &[Network]) -> Result<Vec<Network>> {
    summarize(AddressRange::from_networks(nets)?)
}
