//! IPv4 address codec and prefix/mask utilities.
//!
//! Provides the [`Address`] value type (a 32-bit address with a dotted-quad
//! text form) along with the bit helpers the network types are built on.

use crate::error::{CalcError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_calc::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        Err(CalcError::prefix(len, "prefix length must be between 0 and 32"))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Netmask for `prefix` as an [`Address`]; `mask(0)` is `0.0.0.0`.
pub fn mask(prefix: u8) -> Result<Address> {
    get_cidr_mask(prefix).map(Address::from_bits)
}

/// Prefix length of a contiguous netmask, `None` if the one-bits have gaps.
pub fn prefix_from_mask(bits: u32) -> Option<u8> {
    let len = bits.leading_ones() as u8;
    match get_cidr_mask(len) {
        Ok(m) if m == bits => Some(len),
        _ => None,
    }
}

/// Calculate the minimum mask for an IP address based on trailing zeros.
///
/// This is the shortest prefix for which `ip` is still a valid network
/// address. `0.0.0.0` is aligned to every prefix, so it returns 0.
pub fn lo_mask(ip: Address) -> u8 {
    let trailing_zeros = ip.to_bits().trailing_zeros() as u8;
    MAX_LENGTH - trailing_zeros
}

/// IPv4 address held as its 32-bit value.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash, Default)]
pub struct Address(u32);

impl Address {
    pub const MIN: Address = Address(0);
    pub const MAX: Address = Address(u32::MAX);

    pub const fn from_bits(bits: u32) -> Self {
        Address(bits)
    }

    pub const fn to_bits(self) -> u32 {
        self.0
    }

    pub const fn from_octets(octets: [u8; 4]) -> Self {
        Address(u32::from_be_bytes(octets))
    }

    pub const fn octets(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parse dotted-quad text, e.g. `"192.168.1.10"`.
    ///
    /// Exactly four decimal components are required, each in 0-255, written
    /// without sign, whitespace or leading zeros.
    pub fn parse(text: &str) -> Result<Address> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() != 4 {
            return Err(CalcError::address(
                text,
                format!("expected 4 octets, found {}", parts.len()),
            ));
        }

        let mut octets = [0u8; 4];
        for (octet, part) in octets.iter_mut().zip(parts.iter()) {
            *octet = parse_octet(text, part)?;
        }
        Ok(Address::from_octets(octets))
    }

    /// Octets as dot-separated 8-bit groups, e.g. `11000000.10101000.00000001.00001010`.
    pub fn to_binary(self) -> String {
        self.octets()
            .iter()
            .map(|o| format!("{o:08b}"))
            .collect::<Vec<String>>()
            .join(".")
    }

    /// First octet based heuristic used when no mask is supplied.
    ///
    /// 0-127 gives /8, 128-191 gives /16 and everything else /24. Classes D
    /// and E fall through to /24 as well; callers rely on this exact table.
    pub fn default_prefix_for_legacy_class(self) -> u8 {
        match self.octets()[0] {
            0..=127 => 8,
            128..=191 => 16,
            _ => 24,
        }
    }
}

fn parse_octet(text: &str, part: &str) -> Result<u8> {
    if part.is_empty() {
        return Err(CalcError::address(text, "empty octet"));
    }
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CalcError::address(
            text,
            format!("octet '{part}' is not a decimal number"),
        ));
    }
    if part.len() > 1 && part.starts_with('0') {
        return Err(CalcError::address(
            text,
            format!("leading zeros are not permitted in octet '{part}'"),
        ));
    }
    // At most 3 digits survive the checks above for any in-range value.
    if part.len() > 3 {
        return Err(CalcError::address(
            text,
            format!("octet '{part}' is out of range 0-255"),
        ));
    }
    let value: u16 = part
        .parse()
        .map_err(|_| CalcError::address(text, format!("octet '{part}' is not a number")))?;
    u8::try_from(value)
        .map_err(|_| CalcError::address(text, format!("octet {value} is out of range 0-255")))
}

impl FromStr for Address {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        Address::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Address(u32::from(addr))
    }
}

impl From<Address> for Ipv4Addr {
    fn from(addr: Address) -> Self {
        Ipv4Addr::from(addr.0)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
