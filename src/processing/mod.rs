//! Address arithmetic over networks and ranges.
//!
//! - [`partition`] - Subnetting by prefix, host count or subnet count
//! - [`summarize`] - Supernetting a range into minimal CIDR blocks

mod partition;
mod summarize;

// Re-export public functions
pub use partition::{
    min_prefix_for_hosts, min_prefix_for_subnet_count, subnets_by_prefix, SubnetSet, Subnets,
};
pub use summarize::{summarize, summarize_networks};
