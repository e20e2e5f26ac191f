//! IPv4 validation and the IPv6 address codec.
//!
//! SNMP tables index addresses by their raw octets (`ipAddressIfIndex.2.16.32.1.13.184...`).
//! The functions here turn those octets into the compressed textual form used in
//! inventory reports, and back.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Number of 16-bit groups in an IPv6 address.
const IPV6_GROUPS: usize = 8;

/// Number of octets in an IPv6 address.
const IPV6_OCTETS: usize = 16;

/// An IPv4 address that passed dotted-quad validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ipv4Address(Ipv4Addr);

impl Ipv4Address {
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Ipv4Address(Ipv4Addr::new(a, b, c, d))
    }

    pub const fn inner(&self) -> Ipv4Addr {
        self.0
    }

    pub const fn octets(&self) -> [u8; 4] {
        self.0.octets()
    }

    /// Builds an address from four decimal OID arcs, e.g. the tail of
    /// `ipAdEntIfIndex.10.0.0.1`.
    pub fn from_segments(segments: &[&str]) -> Result<Self, ParseError> {
        segments.join(".").parse()
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Ipv4Address {
    type Err = ParseError;

    /// Accepts exactly four dot-separated decimal octets of one to three digits, each 0-255.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidIpv4Address(s.to_string());

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 4 {
            return Err(invalid());
        }

        let mut octets = [0u8; 4];
        for (slot, part) in octets.iter_mut().zip(&parts) {
            if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *slot = part.parse::<u8>().map_err(|_| invalid())?;
        }

        Ok(Ipv4Address(Ipv4Addr::from(octets)))
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(addr: Ipv4Addr) -> Self {
        Ipv4Address(addr)
    }
}

/// Address family selector for interface address polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// The `InetAddressType` and length arcs that open an `ipAddressTable` index
    /// for this family: `1.4` for IPv4, `2.16` for IPv6.
    pub const fn index_prefix(&self) -> [u32; 2] {
        match self {
            AddressFamily::V4 => [1, 4],
            AddressFamily::V6 => [2, 16],
        }
    }

    /// Number of address octets carried in the index.
    pub const fn address_len(&self) -> usize {
        match self {
            AddressFamily::V4 => 4,
            AddressFamily::V6 => IPV6_OCTETS,
        }
    }

    pub const fn is_v6(&self) -> bool {
        matches!(self, AddressFamily::V6)
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => write!(f, "v4"),
            AddressFamily::V6 => write!(f, "v6"),
        }
    }
}

/// Compresses eight IPv6 hex groups into canonical text.
///
/// Each group loses its leading zeros (an all-zero group stays `"0"`), then the
/// longest run of zero groups is replaced with `::`. Ties go to the leftmost run,
/// and a run of a single zero group is compressed like any other.
///
/// # Examples
///
/// ```
/// use poller_types::compress_ipv6_groups;
///
/// let groups = ["2001", "0db8", "0000", "0000", "0000", "0000", "0000", "0001"];
/// assert_eq!(compress_ipv6_groups(&groups).unwrap(), "2001:db8::1");
/// ```
pub fn compress_ipv6_groups<S: AsRef<str>>(groups: &[S]) -> Result<String, ParseError> {
    if groups.len() != IPV6_GROUPS {
        return Err(ParseError::InvalidIpv6Address(join_groups(groups)));
    }

    let stripped = groups
        .iter()
        .map(|g| strip_group(g.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(compress_stripped(&stripped))
}

/// Renders 16 raw address octets in canonical compressed form.
pub fn ipv6_from_octets(octets: &[u8; 16]) -> String {
    let groups: Vec<String> = octets
        .chunks_exact(2)
        .map(|pair| format!("{:x}", u16::from_be_bytes([pair[0], pair[1]])))
        .collect();
    compress_stripped(&groups)
}

/// Renders an address given as sixteen decimal OID arcs (`32.1.13.184...`).
///
/// Fails if there are not exactly sixteen arcs or any arc is not a decimal byte.
pub fn ipv6_from_decimal_segments(segments: &[&str]) -> Result<String, ParseError> {
    let invalid = || ParseError::InvalidIpv6Address(segments.join("."));

    if segments.len() != IPV6_OCTETS {
        return Err(invalid());
    }

    let mut octets = [0u8; IPV6_OCTETS];
    for (slot, segment) in octets.iter_mut().zip(segments) {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *slot = segment.parse::<u8>().map_err(|_| invalid())?;
    }

    Ok(ipv6_from_octets(&octets))
}

/// Expands compressed IPv6 text back into its eight groups, leading zeros stripped.
///
/// `expand_ipv6("2001:db8::1")` yields `["2001", "db8", "0", "0", "0", "0", "0", "1"]`.
pub fn expand_ipv6(text: &str) -> Result<[String; 8], ParseError> {
    let invalid = || ParseError::InvalidIpv6Address(text.to_string());

    let split_groups = |part: &str| -> Result<Vec<String>, ParseError> {
        if part.is_empty() {
            return Ok(Vec::new());
        }
        part.split(':').map(strip_group).collect()
    };

    let groups = match text.split_once("::") {
        Some((head, tail)) => {
            if tail.contains("::") {
                return Err(invalid());
            }
            let head = split_groups(head)?;
            let tail = split_groups(tail)?;
            if head.len() + tail.len() >= IPV6_GROUPS {
                return Err(invalid());
            }
            let fill = IPV6_GROUPS - head.len() - tail.len();
            head.into_iter()
                .chain(std::iter::repeat_n("0".to_string(), fill))
                .chain(tail)
                .collect::<Vec<_>>()
        }
        None => split_groups(text)?,
    };

    groups.try_into().map_err(|_| invalid())
}

/// Validates one hex group and removes its leading zeros.
fn strip_group(group: &str) -> Result<String, ParseError> {
    if group.is_empty() || group.len() > 4 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidIpv6Address(group.to_string()));
    }

    let trimmed = group.trim_start_matches('0');
    if trimmed.is_empty() {
        Ok("0".to_string())
    } else {
        Ok(trimmed.to_ascii_lowercase())
    }
}

fn compress_stripped(groups: &[String]) -> String {
    match longest_zero_run(groups) {
        Some((start, len)) => format!(
            "{}::{}",
            groups[..start].join(":"),
            groups[start + len..].join(":")
        ),
        None => groups.join(":"),
    }
}

/// Finds the longest run of `"0"` groups as `(start, len)`; the first one wins a tie.
fn longest_zero_run(groups: &[String]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut current: Option<(usize, usize)> = None;

    for (i, group) in groups.iter().enumerate() {
        if group == "0" {
            let run = match current {
                Some((start, len)) => (start, len + 1),
                None => (i, 1),
            };
            current = Some(run);
            if best.is_none_or(|(_, best_len)| run.1 > best_len) {
                best = Some(run);
            }
        } else {
            current = None;
        }
    }

    best
}

fn join_groups<S: AsRef<str>>(groups: &[S]) -> String {
    groups
        .iter()
        .map(|g| g.as_ref())
        .collect::<Vec<_>>()
        .join(":")
}
