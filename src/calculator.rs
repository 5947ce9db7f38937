//! Calculator entry points.
//!
//! Each operation takes plain text/number inputs, runs the engine and
//! returns a serialisable result. Errors are single [`CalcError`] values;
//! nothing partial is returned.

use crate::config::{Config, DEFAULT_MAX_LISTED};
use crate::error::{CalcError, Result};
use crate::models::{make_network, Address, AddressRange, Network};
use crate::processing::{
    min_prefix_for_hosts, min_prefix_for_subnet_count, subnets_by_prefix, summarize, SubnetSet,
};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Separator for supernet input lists: commas and/or whitespace.
static LIST_SEPARATOR: OnceLock<Regex> = OnceLock::new();

fn get_list_separator() -> &'static Regex {
    LIST_SEPARATOR.get_or_init(|| Regex::new(r"[,\s]+").expect("Invalid Regex"))
}

/// Echo of the caller's address/mask text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInput {
    pub address: String,
    pub mask: Option<String>,
}

/// Subnets produced by borrowing a few bits, shown alongside a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnettingExample {
    pub new_prefix: u8,
    pub subnet_count: u64,
    pub first: Network,
    pub second: Network,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkResult {
    pub input: NetworkInput,
    pub network: Network,
    /// Entered address as dot-separated 8-bit groups.
    pub address_binary: String,
    pub mask_binary: String,
    pub netmask: Address,
    pub wildcard: Address,
    pub network_bits: u8,
    pub host_bits: u8,
    pub network_address: Address,
    pub broadcast_address: Address,
    pub first_host: Option<Address>,
    pub last_host: Option<Address>,
    pub total_addresses: u64,
    pub usable_hosts: u64,
    pub subnetting_examples: Vec<SubnettingExample>,
    /// Network one bit shorter, only for prefixes longer than /8.
    pub supernet: Option<Network>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubnetMode {
    Hosts,
    Count,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetResult {
    pub network: NetworkResult,
    pub mode: SubnetMode,
    pub requested: u64,
    /// Host bits per subnet in hosts mode, borrowed bits in count mode.
    pub required_bits: u8,
    pub new_prefix: u8,
    pub hosts_per_subnet: u64,
    pub total_subnets: u64,
    pub subnets: Vec<Network>,
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupernetResult {
    pub input: Vec<String>,
    pub range: AddressRange,
    pub networks: Vec<Network>,
}

/// Stateless calculator; the only setting is how many subnets to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calculator {
    max_listed: usize,
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator::new(DEFAULT_MAX_LISTED)
    }
}

impl Calculator {
    pub fn new(max_listed: usize) -> Self {
        Calculator { max_listed }
    }

    pub fn from_config(config: &Config) -> Self {
        Calculator::new(config.max_listed)
    }

    pub fn max_listed(&self) -> usize {
        self.max_listed
    }

    /// Describe the network named by `address_text` and `mask_text`.
    pub fn compute_network(
        &self,
        address_text: &str,
        mask_text: Option<&str>,
    ) -> Result<NetworkResult> {
        log::info!("#Start compute_network({address_text}, {mask_text:?})");
        let network = make_network(address_text, mask_text)?;
        let entered = address_text
            .split_once('/')
            .map_or(address_text, |(addr, _)| addr);
        let entered = Address::parse(entered)?;

        let mut subnetting_examples = Vec::new();
        for extra_bits in 1..=3u8 {
            let new_prefix = network.prefix() + extra_bits;
            if new_prefix >= 32 {
                break;
            }
            let mut subnets = subnets_by_prefix(network, new_prefix)?;
            let subnet_count = subnets.total();
            if let (Some(first), Some(second)) = (subnets.next(), subnets.next()) {
                subnetting_examples.push(SubnettingExample {
                    new_prefix,
                    subnet_count,
                    first,
                    second,
                });
            }
        }

        let supernet = if network.prefix() > 8 {
            Some(network.supernet(network.prefix() - 1)?)
        } else {
            None
        };

        Ok(NetworkResult {
            input: NetworkInput {
                address: address_text.to_string(),
                mask: mask_text.map(str::to_string),
            },
            network,
            address_binary: entered.to_binary(),
            mask_binary: network.netmask().to_binary(),
            netmask: network.netmask(),
            wildcard: network.wildcard(),
            network_bits: network.prefix(),
            host_bits: network.host_bits(),
            network_address: network.base(),
            broadcast_address: network.broadcast(),
            first_host: network.first_host(),
            last_host: network.last_host(),
            total_addresses: network.total_addresses(),
            usable_hosts: network.usable_hosts(),
            subnetting_examples,
            supernet,
        })
    }

    /// Split the network into the smallest subnets holding `required_hosts` each.
    pub fn compute_subnets_by_hosts(
        &self,
        address_text: &str,
        mask_text: Option<&str>,
        required_hosts: i64,
    ) -> Result<SubnetResult> {
        let requested = positive_requirement(required_hosts, "hosts")?;
        let network = self.compute_network(address_text, mask_text)?;
        let new_prefix = min_prefix_for_hosts(network.network.prefix(), requested)?;
        self.partition(network, SubnetMode::Hosts, requested, new_prefix)
    }

    /// Split the network into at least `required_subnets` equal subnets.
    pub fn compute_subnets_by_count(
        &self,
        address_text: &str,
        mask_text: Option<&str>,
        required_subnets: i64,
    ) -> Result<SubnetResult> {
        let requested = positive_requirement(required_subnets, "subnets")?;
        let network = self.compute_network(address_text, mask_text)?;
        let new_prefix = min_prefix_for_subnet_count(network.network.prefix(), requested)?;
        self.partition(network, SubnetMode::Count, requested, new_prefix)
    }

    /// Minimal CIDR blocks covering the given inputs.
    ///
    /// Each entry may hold several CIDRs separated by commas or spaces.
    /// Exactly two plain addresses are read as a `start end` range;
    /// anything else is a set of networks whose enclosing range is
    /// summarised.
    pub fn compute_supernet<S: AsRef<str>>(&self, network_texts: &[S]) -> Result<SupernetResult> {
        let input: Vec<String> = network_texts
            .iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        log::info!("#Start compute_supernet({input:?})");

        let items: Vec<&str> = input
            .iter()
            .flat_map(|s| get_list_separator().split(s))
            .filter(|s| !s.is_empty())
            .collect();

        let range = match items.as_slice() {
            [] => return Err(CalcError::range(input.join(","), "no networks given")),
            [start, end] if !start.contains('/') && !end.contains('/') => {
                AddressRange::new(Address::parse(start)?, Address::parse(end)?)?
            }
            _ => {
                let nets = items
                    .iter()
                    .map(|s| s.parse::<Network>())
                    .collect::<Result<Vec<Network>>>()?;
                AddressRange::from_networks(&nets)?
            }
        };

        let networks = summarize(range)?;
        Ok(SupernetResult {
            input,
            range,
            networks,
        })
    }

    fn partition(
        &self,
        network: NetworkResult,
        mode: SubnetMode,
        requested: u64,
        new_prefix: u8,
    ) -> Result<SubnetResult> {
        let parent = network.network;
        let set = SubnetSet::collect(subnets_by_prefix(parent, new_prefix)?, self.max_listed);
        let required_bits = match mode {
            SubnetMode::Hosts => 32 - new_prefix,
            SubnetMode::Count => new_prefix - parent.prefix(),
        };
        let hosts_per_subnet = Network::new(parent.base(), new_prefix)?.usable_hosts();

        Ok(SubnetResult {
            network,
            mode,
            requested,
            required_bits,
            new_prefix,
            hosts_per_subnet,
            total_subnets: set.total,
            truncated: set.truncated(),
            subnets: set.subnets,
        })
    }
}

fn positive_requirement(value: i64, what: &str) -> Result<u64> {
    u64::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| {
            CalcError::requirement(value, format!("required {what} must be greater than 0"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_network_report() {
        let result = Calculator::default()
            .compute_network("192.168.1.10", Some("24"))
            .unwrap();
        assert_eq!(result.network.to_string(), "192.168.1.0/24");
        assert_eq!(result.address_binary, "11000000.10101000.00000001.00001010");
        assert_eq!(result.mask_binary, "11111111.11111111.11111111.00000000");
        assert_eq!(result.network_bits, 24);
        assert_eq!(result.host_bits, 8);
        assert_eq!(result.network_address.to_string(), "192.168.1.0");
        assert_eq!(result.broadcast_address.to_string(), "192.168.1.255");
        assert_eq!(result.usable_hosts, 254);
        assert_eq!(result.wildcard.to_string(), "0.0.0.255");
        assert_eq!(result.first_host.unwrap().to_string(), "192.168.1.1");
        assert_eq!(result.last_host.unwrap().to_string(), "192.168.1.254");
        assert_eq!(result.supernet.unwrap().to_string(), "192.168.0.0/23");
        assert_eq!(result.input.address, "192.168.1.10");
        assert_eq!(result.input.mask.as_deref(), Some("24"));
    }

    #[test]
    fn test_subnetting_examples() {
        let result = Calculator::default()
            .compute_network("10.0.0.0", Some("24"))
            .unwrap();
        let examples: Vec<(u8, u64, String, String)> = result
            .subnetting_examples
            .iter()
            .map(|e| (e.new_prefix, e.subnet_count, e.first.to_string(), e.second.to_string()))
            .collect();
        assert_eq!(
            examples,
            vec![
                (25, 2, "10.0.0.0/25".to_string(), "10.0.0.128/25".to_string()),
                (26, 4, "10.0.0.0/26".to_string(), "10.0.0.64/26".to_string()),
                (27, 8, "10.0.0.0/27".to_string(), "10.0.0.32/27".to_string()),
            ]
        );

        let result = Calculator::default()
            .compute_network("10.0.0.0", Some("30"))
            .unwrap();
        assert_eq!(result.subnetting_examples.len(), 1);
        assert_eq!(result.subnetting_examples[0].new_prefix, 31);
    }

    #[test]
    fn test_no_supernet_for_short_prefix() {
        let result = Calculator::default().compute_network("10.1.2.3", None).unwrap();
        assert_eq!(result.network.to_string(), "10.0.0.0/8");
        assert_eq!(result.supernet, None);
    }

    #[test]
    fn test_compute_network_error_has_no_partial_result() {
        let err = Calculator::default()
            .compute_network("192.168.1.300", Some("24"))
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidAddress { .. }));
        assert!(err.to_string().contains("192.168.1.300"));
    }

    #[test]
    fn test_subnets_by_hosts() {
        let result = Calculator::default()
            .compute_subnets_by_hosts("192.168.0.0", Some("24"), 60)
            .unwrap();
        assert_eq!(result.mode, SubnetMode::Hosts);
        assert_eq!(result.required_bits, 6);
        assert_eq!(result.new_prefix, 26);
        assert_eq!(result.hosts_per_subnet, 62);
        assert_eq!(result.total_subnets, 4);
        assert_eq!(result.subnets.len(), 4);
        assert!(!result.truncated);
    }

    #[test]
    fn test_subnets_by_hosts_rejects_bad_requirements() {
        let calc = Calculator::default();
        for hosts in [0, -5] {
            assert!(matches!(
                calc.compute_subnets_by_hosts("192.168.0.0", Some("24"), hosts),
                Err(CalcError::InvalidRequirement { .. })
            ));
        }
        assert!(matches!(
            calc.compute_subnets_by_hosts("192.168.0.0", Some("24"), 500),
            Err(CalcError::InvalidRequirement { .. })
        ));
    }

    #[test]
    fn test_subnets_by_count() {
        let result = Calculator::default()
            .compute_subnets_by_count("192.168.0.0", Some("24"), 5)
            .unwrap();
        assert_eq!(result.mode, SubnetMode::Count);
        assert_eq!(result.required_bits, 3);
        assert_eq!(result.new_prefix, 27);
        assert_eq!(result.total_subnets, 8);
        assert_eq!(result.hosts_per_subnet, 30);
        assert_eq!(result.subnets[7].to_string(), "192.168.0.224/27");
    }

    #[test]
    fn test_subnet_listing_is_capped() {
        let result = Calculator::new(10)
            .compute_subnets_by_count("10.0.0.0/8", None, 65536)
            .unwrap();
        assert_eq!(result.new_prefix, 24);
        assert_eq!(result.total_subnets, 65536);
        assert_eq!(result.subnets.len(), 10);
        assert!(result.truncated);
    }

    #[test]
    fn test_supernet_from_cidr_list() {
        let result = Calculator::default()
            .compute_supernet(&["10.0.0.0/24, 10.0.1.0/24,10.0.2.0/24"])
            .unwrap();
        let nets: Vec<String> = result.networks.iter().map(|n| n.to_string()).collect();
        assert_eq!(nets, vec!["10.0.0.0/23", "10.0.2.0/24"]);
        assert_eq!(result.input, vec!["10.0.0.0/24, 10.0.1.0/24,10.0.2.0/24"]);
    }

    #[test]
    fn test_supernet_from_two_addresses() {
        let result = Calculator::default()
            .compute_supernet(&["10.0.0.0", "10.0.1.255"])
            .unwrap();
        assert_eq!(result.networks.len(), 1);
        assert_eq!(result.networks[0].to_string(), "10.0.0.0/23");
        assert_eq!(result.range.to_string(), "10.0.0.0-10.0.1.255");
    }

    #[test]
    fn test_supernet_from_two_networks() {
        let result = Calculator::default()
            .compute_supernet(&["10.0.4.0/24", "10.0.5.0/24"])
            .unwrap();
        assert_eq!(result.networks.len(), 1);
        assert_eq!(result.networks[0].to_string(), "10.0.4.0/23");
    }

    #[test]
    fn test_supernet_errors() {
        let calc = Calculator::default();
        assert!(matches!(
            calc.compute_supernet(&["10.0.1.0", "10.0.0.0"]),
            Err(CalcError::InvalidRange { .. })
        ));
        assert!(matches!(
            calc.compute_supernet::<&str>(&[]),
            Err(CalcError::InvalidRange { .. })
        ));
        assert!(matches!(
            calc.compute_supernet(&[" , "]),
            Err(CalcError::InvalidRange { .. })
        ));
        assert!(matches!(
            calc.compute_supernet(&["10.0.0.0/24,10.0.0.999/24"]),
            Err(CalcError::InvalidAddress { .. })
        ));
        assert!(matches!(
            calc.compute_supernet(&["10.0.0.0/24", "10.0.1.0/40"]),
            Err(CalcError::InvalidPrefix { .. })
        ));
    }

    #[test]
    fn test_results_serialize() {
        let result = Calculator::default()
            .compute_network("192.168.1.10", Some("24"))
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["network"], "192.168.1.0/24");
        assert_eq!(json["broadcast_address"], "192.168.1.255");
        assert_eq!(json["usable_hosts"], 254);
        assert_eq!(json["input"]["mask"], "24");

        let result = Calculator::default()
            .compute_subnets_by_hosts("192.168.1.0", Some("24"), 100)
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mode"], "hosts");
        assert_eq!(json["subnets"][1], "192.168.1.128/25");
    }
}
