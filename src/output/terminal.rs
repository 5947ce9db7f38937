//! Human readable terminal reports.

use crate::calculator::{NetworkResult, SubnetMode, SubnetResult, SupernetResult};
use crate::models::Address;
use colored::Colorize;
use itertools::Itertools;
use std::fmt::Write;

/// Width of the label column in reports.
const LABEL_WIDTH: usize = 18;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

fn line(out: &mut String, label: &str, value: impl std::fmt::Display) {
    // writing to a String cannot fail
    let _ = writeln!(
        out,
        "{:<width$} {value}",
        format!("{label}:").bold(),
        width = LABEL_WIDTH
    );
}

fn opt_addr(addr: Option<Address>) -> String {
    addr.map_or_else(|| "-".to_string(), |a| a.to_string())
}

/// Report for a single network.
pub fn render_network(result: &NetworkResult) -> String {
    let mut out = String::new();
    let entered = match &result.input.mask {
        Some(mask) => format!("{} {}", result.input.address, mask),
        None => result.input.address.clone(),
    };
    line(&mut out, "Input", entered);
    line(&mut out, "Network", result.network.to_string().green());
    line(&mut out, "Address (bin)", &result.address_binary);
    line(&mut out, "Netmask (bin)", &result.mask_binary);
    line(&mut out, "Netmask", result.netmask);
    line(&mut out, "Wildcard", result.wildcard);
    line(&mut out, "Network bits", result.network_bits);
    line(&mut out, "Host bits", result.host_bits);
    line(&mut out, "Network address", result.network_address);
    line(&mut out, "Broadcast", result.broadcast_address);
    line(
        &mut out,
        "Host range",
        format!("{} - {}", opt_addr(result.first_host), opt_addr(result.last_host)),
    );
    line(&mut out, "Addresses", result.total_addresses);
    line(&mut out, "Usable hosts", result.usable_hosts.to_string().cyan());

    for example in &result.subnetting_examples {
        line(
            &mut out,
            &format!("Subnets /{}", example.new_prefix),
            format!(
                "{} subnets: {}, {}, ...",
                example.subnet_count, example.first, example.second
            ),
        );
    }
    if let Some(supernet) = result.supernet {
        line(&mut out, "Supernet", supernet);
    }
    out
}

/// Report for a partition, preceded by its parent network report.
pub fn render_subnets(result: &SubnetResult) -> String {
    let mut out = render_network(&result.network);
    out.push('\n');
    let mode = match result.mode {
        SubnetMode::Hosts => format!("{} hosts per subnet", result.requested),
        SubnetMode::Count => format!("{} subnets", result.requested),
    };
    line(&mut out, "Requested", mode);
    line(&mut out, "Required bits", result.required_bits);
    line(&mut out, "New prefix", format!("/{}", result.new_prefix).green());
    line(&mut out, "Hosts per subnet", result.hosts_per_subnet);
    line(&mut out, "Total subnets", result.total_subnets.to_string().cyan());

    for (i, subnet) in result.subnets.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>6}  {:<18} {} - {}  {}",
            i + 1,
            subnet.to_string(),
            opt_addr(subnet.first_host()),
            opt_addr(subnet.last_host()),
            subnet.broadcast()
        );
    }
    if result.truncated {
        let _ = writeln!(
            out,
            "{} showing {} of {} subnets",
            "NOTE".on_red(),
            result.subnets.len(),
            result.total_subnets
        );
    }
    out
}

/// Report for a supernet summary.
pub fn render_supernet(result: &SupernetResult) -> String {
    let mut out = String::new();
    line(&mut out, "Input", result.input.iter().join(" "));
    line(&mut out, "Range", result.range);
    line(&mut out, "Addresses", result.range.size());
    line(
        &mut out,
        "Networks",
        result.networks.len().to_string().cyan(),
    );
    for network in &result.networks {
        let _ = writeln!(out, "  {}", network.to_string().green());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Calculator;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_render_network() {
        plain();
        let result = Calculator::default()
            .compute_network("192.168.1.10", Some("24"))
            .unwrap();
        let text = render_network(&result);
        assert!(text.contains("192.168.1.0/24"));
        assert!(text.contains("192.168.1.1 - 192.168.1.254"));
        assert!(text.contains("11000000.10101000.00000001.00001010"));
        assert!(text.contains("254"));
        assert!(text.contains("Supernet"));
    }

    #[test]
    fn test_render_host_route_has_no_range() {
        plain();
        let result = Calculator::default()
            .compute_network("10.0.0.1", Some("32"))
            .unwrap();
        assert!(render_network(&result).contains("- - -"));
    }

    #[test]
    fn test_render_subnets_truncated() {
        plain();
        let result = Calculator::new(2)
            .compute_subnets_by_count("10.0.0.0", Some("24"), 4)
            .unwrap();
        let text = render_subnets(&result);
        assert!(text.contains("10.0.0.64/26"));
        assert!(!text.contains("10.0.0.128/26"));
        assert!(text.contains("showing 2 of 4 subnets"));
    }

    #[test]
    fn test_render_supernet() {
        plain();
        let result = Calculator::default()
            .compute_supernet(&["10.0.0.0", "10.0.2.255"])
            .unwrap();
        let text = render_supernet(&result);
        assert!(text.contains("10.0.0.0-10.0.2.255"));
        assert!(text.contains("10.0.0.0/23"));
        assert!(text.contains("10.0.2.0/24"));
    }
}
