//! CSV output for subnet listings.

use crate::models::{Address, Network};
use std::fmt::Write;

use super::terminal::format_field;

/// CSV header matching [`network_row`].
pub const CSV_HEADER: &str =
    r#" "cnt",       "network",     "first_host",      "last_host",      "broadcast", "usable_hosts""#;

/// One quoted, column-aligned CSV row for `network`.
pub fn network_row(cnt: usize, network: &Network) -> String {
    let host = |a: Option<Address>| a.map_or_else(String::new, |a| a.to_string());
    format!(
        "{cnt},{network},{first},{last},{broadcast},{hosts}",
        cnt = format_field(cnt, 6),
        network = format_field(network, 18),
        first = format_field(host(network.first_host()), 17),
        last = format_field(host(network.last_host()), 17),
        broadcast = format_field(network.broadcast(), 17),
        hosts = format_field(network.usable_hosts(), 14),
    )
}

/// Header plus one row per network, newline terminated.
pub fn networks_csv(networks: &[Network]) -> String {
    log::debug!("Writing {} network(s) as CSV", networks.len());
    let mut out = String::new();
    let _ = writeln!(out, "{CSV_HEADER}");
    for (i, network) in networks.iter().enumerate() {
        let _ = writeln!(out, "{}", network_row(i + 1, network));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_row() {
        let net: Network = "192.168.1.0/30".parse().unwrap();
        assert_eq!(
            network_row(1, &net),
            r#"   "1",  "192.168.1.0/30",    "192.168.1.1",    "192.168.1.2",    "192.168.1.3",           "2""#
        );
    }

    #[test]
    fn test_host_route_row_has_empty_hosts() {
        let net: Network = "10.0.0.1/32".parse().unwrap();
        let row = network_row(3, &net);
        assert!(row.contains(r#""","#));
        assert!(row.ends_with(r#""0""#));
    }

    #[test]
    fn test_networks_csv() {
        let nets: Vec<Network> = ["10.0.0.0/23", "10.0.2.0/24"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let csv = networks_csv(&nets);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[2].contains("\"10.0.2.0/24\""));
        assert!(lines[1].contains("\"510\""));
    }
}
