//! Dotted-numeric object identifiers.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numeric SNMP object identifier such as `1.3.6.1.4.1.9.1.2494`.
///
/// A leading separator (`.1.3.6...`, as printed by net-snmp) is stripped on parse.
///
/// # Examples
///
/// ```
/// use poller_types::Oid;
///
/// let oid: Oid = ".1.3.6.1.4.1.9.1.2494".parse().unwrap();
/// assert_eq!(oid.to_string(), "1.3.6.1.4.1.9.1.2494");
/// assert_eq!(oid.len(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(Vec<u32>);

impl Oid {
    pub fn new(arcs: Vec<u32>) -> Self {
        Oid(arcs)
    }

    /// Returns the numeric arcs.
    pub fn arcs(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the OID with its last arc removed, or None for an empty OID.
    pub fn parent(&self) -> Option<Oid> {
        self.0.split_last().map(|(_, rest)| Oid(rest.to_vec()))
    }

    /// Returns true if `self` equals `other` or is a proper ancestor of it.
    ///
    /// This compares whole arcs: `1.3.6.1.4.1.9` is an ancestor of
    /// `1.3.6.1.4.1.9.1` but not of `1.3.6.1.4.1.99`.
    pub fn is_prefix_of(&self, other: &Oid) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Returns the arcs that follow `prefix`, or None if `prefix` is not an ancestor.
    pub fn suffix_after(&self, prefix: &Oid) -> Option<&[u32]> {
        self.0.strip_prefix(prefix.0.as_slice())
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", arc)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Oid {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(ParseError::InvalidOid(s.to_string()));
        }

        trimmed
            .split('.')
            .map(|arc| {
                if arc.is_empty() || !arc.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ParseError::InvalidOid(s.to_string()));
                }
                arc.parse::<u32>()
                    .map_err(|_| ParseError::InvalidOid(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Oid)
    }
}

impl TryFrom<String> for Oid {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_strips_leading_dot() {
        let oid: Oid = ".1.3.6.1.2.1".parse().unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("".parse::<Oid>().is_err());
        assert!(".".parse::<Oid>().is_err());
        assert!("1..3".parse::<Oid>().is_err());
        assert!("1.3.x".parse::<Oid>().is_err());
        assert!("1.3.-6".parse::<Oid>().is_err());
        assert!("sysDescr.0".parse::<Oid>().is_err());
    }

    #[test]
    fn test_parent_walks_to_empty() {
        let oid: Oid = "1.3.6".parse().unwrap();
        let p = oid.parent().unwrap();
        assert_eq!(p.to_string(), "1.3");
        let p = p.parent().unwrap().parent().unwrap();
        assert!(p.is_empty());
        assert!(p.parent().is_none());
    }

    #[test]
    fn test_prefix_is_arc_wise() {
        let cisco: Oid = "1.3.6.1.4.1.9".parse().unwrap();
        let device: Oid = "1.3.6.1.4.1.9.1.2494".parse().unwrap();
        let other: Oid = "1.3.6.1.4.1.99.1".parse().unwrap();

        assert!(cisco.is_prefix_of(&device));
        assert!(cisco.is_prefix_of(&cisco));
        assert!(!cisco.is_prefix_of(&other));
        assert_eq!(device.suffix_after(&cisco), Some(&[1u32, 2494][..]));
        assert_eq!(other.suffix_after(&cisco), None);
    }

    #[test]
    fn test_display_roundtrip() {
        let oid: Oid = "1.3.6.1.4.1.30065.1.3011.7048".parse().unwrap();
        assert_eq!(oid.to_string(), "1.3.6.1.4.1.30065.1.3011.7048");
    }
}
