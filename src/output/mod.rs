//! Output formatting for calculator results.
//!
//! This module handles formatting results for display:
//! - [`csv`] - CSV listing of networks
//! - [`terminal`] - Terminal report with colors
//!
//! JSON goes straight through `serde_json`.

mod csv;
mod terminal;

use crate::calculator::{NetworkResult, SubnetResult, SupernetResult};
use serde::Serialize;

pub use csv::{network_row, networks_csv, CSV_HEADER};
pub use terminal::{format_field, render_network, render_subnets, render_supernet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// A result that can be printed in every [`OutputFormat`].
pub trait Report: Serialize {
    fn text(&self) -> String;
    fn csv(&self) -> String;
}

impl Report for NetworkResult {
    fn text(&self) -> String {
        render_network(self)
    }

    fn csv(&self) -> String {
        networks_csv(&[self.network])
    }
}

impl Report for SubnetResult {
    fn text(&self) -> String {
        render_subnets(self)
    }

    fn csv(&self) -> String {
        networks_csv(&self.subnets)
    }
}

impl Report for SupernetResult {
    fn text(&self) -> String {
        render_supernet(self)
    }

    fn csv(&self) -> String {
        networks_csv(&self.networks)
    }
}

/// Render `report` in the requested format.
pub fn render<R: Report>(report: &R, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(report.text()),
        OutputFormat::Csv => Ok(report.csv()),
        OutputFormat::Json => serde_json::to_string_pretty(report).map(|mut s| {
            s.push('\n');
            s
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Calculator;

    #[test]
    fn test_render_json() {
        let result = Calculator::default()
            .compute_supernet(&["10.0.0.0/24,10.0.1.0/24"])
            .unwrap();
        let json = render(&result, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["networks"][0], "10.0.0.0/23");
        assert_eq!(value["range"]["start"], "10.0.0.0");
        assert_eq!(value["range"]["end"], "10.0.1.255");
    }

    #[test]
    fn test_render_csv_lists_subnets() {
        let result = Calculator::default()
            .compute_subnets_by_count("192.168.0.0", Some("24"), 2)
            .unwrap();
        let csv = render(&result, OutputFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains("\"192.168.0.128/25\""));
    }

    #[test]
    fn test_render_csv_single_network() {
        let result = Calculator::default()
            .compute_network("172.16.0.9", Some("255.255.0.0"))
            .unwrap();
        let csv = render(&result, OutputFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("\"172.16.0.0/16\""));
    }

    #[test]
    fn test_default_format_is_text() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
