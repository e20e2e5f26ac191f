//! Value types for SNMP inventory polling.
//!
//! This crate provides the leaf representations shared by the poller core:
//!
//! - [`Oid`]: dotted-numeric object identifiers with prefix arithmetic
//! - [`Ipv4Address`]: validated dotted-quad addresses taken from OID indexes
//! - [`compress_ipv6_groups`] and friends: the IPv6 address codec that turns
//!   expanded SNMP index octets into canonical compressed text
//! - [`AddressFamily`]: IPv4/IPv6 selector with its `ipAddressTable` index prefix
//! - [`AdminState`] / [`OperState`]: IF-MIB interface status codes

mod ip;
mod oid;
mod status;

pub use ip::{
    AddressFamily, Ipv4Address, compress_ipv6_groups, expand_ipv6, ipv6_from_decimal_segments,
    ipv6_from_octets,
};
pub use oid::Oid;
pub use status::{AdminState, OperState};

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid OID: {0}")]
    InvalidOid(String),

    #[error("invalid IPv4 address: {0}")]
    InvalidIpv4Address(String),

    #[error("invalid IPv6 address: {0}")]
    InvalidIpv6Address(String),

    #[error("invalid interface status: {0}")]
    InvalidStatus(String),
}
