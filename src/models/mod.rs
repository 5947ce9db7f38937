//! Value types for IPv4 addressing.
//!
//! - [`Address`] - 32-bit address with dotted-quad text form
//! - [`Network`] - canonical address/prefix pair
//! - [`AddressRange`] - inclusive address range

mod ipv4;
mod network;
mod range;

// Re-export public types
pub use ipv4::{get_cidr_mask, lo_mask, mask, prefix_from_mask, Address, MAX_LENGTH};
pub use network::{canonicalize, make_network, parse_prefix_or_mask, Network};
pub use range::AddressRange;
