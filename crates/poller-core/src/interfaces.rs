//! Interface inventory: joins address, description and status walks by ifIndex.
//!
//! Addresses come from one of two tables:
//!
//! - `ipAdEntIfIndex` (RFC 1213, IPv4 only), keyed by the address itself
//! - `ipAddressIfIndex` (RFC 4293), keyed by `<type>.<len>.<octets...>`
//!
//! The legacy table is preferred when it yields anything. Either way the result
//! is an ifIndex to address map that [`aggregate_interfaces`] joins against
//! `ifDescr`, `ifOperStatus` and `ifAdminStatus`.

use crate::query::{OidValueMap, is_sentinel};
use poller_types::{
    AddressFamily, AdminState, Ipv4Address, OperState, ipv6_from_decimal_segments,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

pub const IP_AD_ENT_IF_INDEX: &str = "ipAdEntIfIndex";
pub const IP_ADDRESS_IF_INDEX: &str = "ipAddressIfIndex";
pub const IF_DESCR: &str = "ifDescr";
pub const IF_OPER_STATUS: &str = "ifOperStatus";
pub const IF_ADMIN_STATUS: &str = "ifAdminStatus";

/// Address arc that marks the reserved range excluded from `ipAddressIfIndex`.
const RESERVED_ADDRESS_ARC: &str = "254";

/// ifIndex to textual address.
pub type AddressTable = BTreeMap<u32, String>;

/// One interface with an address, after the join.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InterfaceRecord {
    pub interface_name: String,
    pub address: String,
    pub address_family: AddressFamily,
    pub oper_status: String,
    pub admin_status: String,
}

impl InterfaceRecord {
    /// `admin_status` interpreted as an IF-MIB value, if it is one.
    pub fn admin_state(&self) -> Option<AdminState> {
        self.admin_status.parse().ok()
    }

    /// `oper_status` interpreted as an IF-MIB value, if it is one.
    pub fn oper_state(&self) -> Option<OperState> {
        self.oper_status.parse().ok()
    }
}

fn parse_if_index(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

/// Builds the ifIndex to address map for `family`.
///
/// `legacy` is the `ipAdEntIfIndex` walk and is only consulted for IPv4; when it
/// produces at least one address it wins outright. Otherwise `indexed` (the
/// `ipAddressIfIndex` walk) is filtered to rows of the requested family, skipping
/// the reserved `.254` range and rows whose ifIndex is zero.
///
/// With `only_index` set, the first address found for that ifIndex is returned
/// alone. Rows with a non-numeric ifIndex or a malformed address are skipped.
pub fn build_address_table(
    legacy: Option<&OidValueMap>,
    indexed: Option<&OidValueMap>,
    family: AddressFamily,
    only_index: Option<u32>,
) -> AddressTable {
    if family == AddressFamily::V4 {
        if let Some(legacy) = legacy {
            let table = legacy_addresses(legacy, only_index);
            if !table.is_empty() {
                return table;
            }
        }
    }

    match indexed {
        Some(indexed) => indexed_addresses(indexed, family, only_index),
        None => AddressTable::new(),
    }
}

fn legacy_addresses(legacy: &OidValueMap, only_index: Option<u32>) -> AddressTable {
    let mut table = AddressTable::new();

    for (suffix, value) in legacy.column(IP_AD_ENT_IF_INDEX) {
        let Some(if_index) = parse_if_index(value) else {
            debug!(
                "Skipping {}.{}: ifIndex '{}' is not numeric",
                IP_AD_ENT_IF_INDEX, suffix, value
            );
            continue;
        };

        let segments: Vec<&str> = suffix.split('.').collect();
        let tail = &segments[segments.len().saturating_sub(4)..];
        let address = match Ipv4Address::from_segments(tail) {
            Ok(address) => address,
            Err(e) => {
                debug!("Skipping {}.{}: {}", IP_AD_ENT_IF_INDEX, suffix, e);
                continue;
            }
        };

        if let Some(wanted) = only_index {
            if if_index == wanted {
                return AddressTable::from([(if_index, address.to_string())]);
            }
            continue;
        }
        table.insert(if_index, address.to_string());
    }

    table
}

fn indexed_addresses(
    indexed: &OidValueMap,
    family: AddressFamily,
    only_index: Option<u32>,
) -> AddressTable {
    let [addr_type, addr_len] = family.index_prefix().map(|arc| arc.to_string());
    let mut table = AddressTable::new();

    for (suffix, value) in indexed.column(IP_ADDRESS_IF_INDEX) {
        let if_index = match parse_if_index(value) {
            Some(0) => continue,
            Some(if_index) => if_index,
            None => {
                debug!(
                    "Skipping {}.{}: ifIndex '{}' is not numeric",
                    IP_ADDRESS_IF_INDEX, suffix, value
                );
                continue;
            }
        };

        let segments: Vec<&str> = suffix.split('.').collect();
        let (prefix, address_arcs) = segments.split_at(2.min(segments.len()));
        if prefix != [addr_type.as_str(), addr_len.as_str()] {
            continue;
        }
        if address_arcs.first() == Some(&RESERVED_ADDRESS_ARC) {
            continue;
        }

        let address = match family {
            AddressFamily::V4 => Ipv4Address::from_segments(address_arcs).map(|a| a.to_string()),
            AddressFamily::V6 => ipv6_from_decimal_segments(address_arcs),
        };
        let address = match address {
            Ok(address) => address,
            Err(e) => {
                debug!("Skipping {}.{}: {}", IP_ADDRESS_IF_INDEX, suffix, e);
                continue;
            }
        };

        if let Some(wanted) = only_index {
            if if_index == wanted {
                return AddressTable::from([(if_index, address)]);
            }
            continue;
        }
        table.insert(if_index, address);
    }

    table
}

/// Value of `column.if_index` unless it is missing, empty or a sentinel.
///
/// Whitespace-only values are kept: a blank `ifDescr` still names an interface.
fn joined_value<'a>(table: &'a OidValueMap, column: &str, if_index: u32) -> Option<&'a str> {
    table
        .get(&format!("{}.{}", column, if_index))
        .filter(|value| !value.is_empty() && !is_sentinel(value))
}

/// Joins the address table with description and status walks.
///
/// A record is emitted only when `ifDescr`, `ifOperStatus` and `ifAdminStatus`
/// all hold a non-empty, non-sentinel value for the ifIndex; anything else is
/// skipped without affecting the other interfaces. Records come out in ifIndex order.
pub fn aggregate_interfaces(
    addresses: &AddressTable,
    descriptions: &OidValueMap,
    oper_status: &OidValueMap,
    admin_status: &OidValueMap,
    family: AddressFamily,
) -> Vec<InterfaceRecord> {
    let mut records = Vec::with_capacity(addresses.len());

    for (if_index, address) in addresses {
        let name = joined_value(descriptions, IF_DESCR, *if_index);
        let oper = joined_value(oper_status, IF_OPER_STATUS, *if_index);
        let admin = joined_value(admin_status, IF_ADMIN_STATUS, *if_index);

        let (Some(name), Some(oper), Some(admin)) = (name, oper, admin) else {
            debug!("Skipping ifIndex {}: incomplete interface data", if_index);
            continue;
        };

        records.push(InterfaceRecord {
            interface_name: name.to_string(),
            address: address.clone(),
            address_family: family,
            oper_status: oper.to_string(),
            admin_status: admin.to_string(),
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::NO_SUCH_INSTANCE;
    use pretty_assertions::assert_eq;

    fn status_tables() -> (OidValueMap, OidValueMap, OidValueMap) {
        (
            OidValueMap::new()
                .with("ifDescr.1", "eth0")
                .with("ifDescr.2", "eth1")
                .with("ifDescr.3", "eth2"),
            OidValueMap::new()
                .with("ifOperStatus.1", "1")
                .with("ifOperStatus.2", "2")
                .with("ifOperStatus.3", "1"),
            OidValueMap::new()
                .with("ifAdminStatus.1", "1")
                .with("ifAdminStatus.2", "1")
                .with("ifAdminStatus.3", NO_SUCH_INSTANCE),
        )
    }

    #[test]
    fn test_single_record_join() {
        let addresses = AddressTable::from([(1, "10.0.0.1".to_string())]);
        let descr = OidValueMap::new().with("ifDescr.1", "eth0");
        let oper = OidValueMap::new().with("ifOperStatus.1", "1");
        let admin = OidValueMap::new().with("ifAdminStatus.1", "1");

        let records = aggregate_interfaces(&addresses, &descr, &oper, &admin, AddressFamily::V4);
        assert_eq!(
            records,
            vec![InterfaceRecord {
                interface_name: "eth0".to_string(),
                address: "10.0.0.1".to_string(),
                address_family: AddressFamily::V4,
                oper_status: "1".to_string(),
                admin_status: "1".to_string(),
            }]
        );

        let mut addresses = addresses;
        addresses.insert(2, "10.0.0.2".to_string());
        let records = aggregate_interfaces(&addresses, &descr, &oper, &admin, AddressFamily::V4);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_inner_join_skips_partial_rows() {
        let (descr, oper, admin) = status_tables();
        let addresses = AddressTable::from([
            (3, "10.0.0.3".to_string()),
            (2, "10.0.0.2".to_string()),
            (1, "10.0.0.1".to_string()),
            (9, "10.0.0.9".to_string()),
        ]);

        let records = aggregate_interfaces(&addresses, &descr, &oper, &admin, AddressFamily::V4);
        let names: Vec<&str> = records.iter().map(|r| r.interface_name.as_str()).collect();
        assert_eq!(names, vec!["eth0", "eth1"]);
        assert_eq!(records[1].oper_state(), Some(OperState::Down));
        assert_eq!(records[1].admin_state(), Some(AdminState::Up));
    }

    #[test]
    fn test_blank_description_is_kept() {
        let addresses = AddressTable::from([
            (1, "10.0.0.1".to_string()),
            (2, "10.0.0.2".to_string()),
        ]);
        let descr = OidValueMap::new().with("ifDescr.1", " ").with("ifDescr.2", "");
        let oper = OidValueMap::new()
            .with("ifOperStatus.1", "1")
            .with("ifOperStatus.2", "1");
        let admin = OidValueMap::new()
            .with("ifAdminStatus.1", "1")
            .with("ifAdminStatus.2", "1");

        let records = aggregate_interfaces(&addresses, &descr, &oper, &admin, AddressFamily::V4);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].interface_name, " ");
        assert_eq!(records[0].address, "10.0.0.1");
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let (descr, oper, admin) = status_tables();
        let addresses = AddressTable::from([(2, "a".to_string()), (1, "b".to_string())]);
        let first = aggregate_interfaces(&addresses, &descr, &oper, &admin, AddressFamily::V6);
        let second = aggregate_interfaces(&addresses, &descr, &oper, &admin, AddressFamily::V6);
        assert_eq!(first, second);
    }

    #[test]
    fn test_legacy_table_preferred() {
        let legacy = OidValueMap::new()
            .with("ipAdEntIfIndex.10.0.0.1", "1")
            .with("ipAdEntIfIndex.192.168.5.1", "7")
            .with("ipAdEntIfIndex.10.0.0.300", "3")
            .with("ipAdEntIfIndex.172.16.0.1", "bogus");
        let indexed = OidValueMap::new().with("ipAddressIfIndex.1.4.10.9.9.9", "4");

        let table = build_address_table(Some(&legacy), Some(&indexed), AddressFamily::V4, None);
        assert_eq!(
            table,
            AddressTable::from([(1, "10.0.0.1".to_string()), (7, "192.168.5.1".to_string())])
        );
    }

    #[test]
    fn test_empty_legacy_falls_back() {
        let legacy = OidValueMap::new();
        let indexed = OidValueMap::new()
            .with("ipAddressIfIndex.1.4.10.0.0.1", "1")
            .with("ipAddressIfIndex.1.4.254.0.0.1", "2")
            .with("ipAddressIfIndex.1.4.10.0.0.5", "0")
            .with("ipAddressIfIndex.2.16.32.1.13.184.0.0.0.0.0.0.0.0.0.0.0.1", "3");

        let table = build_address_table(Some(&legacy), Some(&indexed), AddressFamily::V4, None);
        assert_eq!(table, AddressTable::from([(1, "10.0.0.1".to_string())]));
    }

    #[test]
    fn test_ipv6_rows() {
        let indexed = OidValueMap::new()
            .with("ipAddressIfIndex.2.16.32.1.13.184.0.0.0.0.0.0.0.0.0.0.0.1", "3")
            .with("ipAddressIfIndex.2.16.254.128.0.0.0.0.0.0.2.80.86.255.254.154.0.1", "3")
            .with("ipAddressIfIndex.2.16.32.1.13.184.0.1.0.0.0.2.0.0.0.0.0.0", "5")
            .with("ipAddressIfIndex.2.16.32.1.13", "6")
            .with("ipAddressIfIndex.1.4.10.0.0.1", "1");
        let legacy = OidValueMap::new().with("ipAdEntIfIndex.10.0.0.1", "1");

        let table = build_address_table(Some(&legacy), Some(&indexed), AddressFamily::V6, None);
        assert_eq!(
            table,
            AddressTable::from([
                (3, "2001:db8::1".to_string()),
                (5, "2001:db8:1:0:2::".to_string()),
            ])
        );
    }

    #[test]
    fn test_only_index_filter() {
        let indexed = OidValueMap::new()
            .with("ipAddressIfIndex.1.4.10.0.0.1", "1")
            .with("ipAddressIfIndex.1.4.10.0.0.2", "2");

        let table = build_address_table(None, Some(&indexed), AddressFamily::V4, Some(2));
        assert_eq!(table, AddressTable::from([(2, "10.0.0.2".to_string())]));

        let table = build_address_table(None, Some(&indexed), AddressFamily::V4, Some(42));
        assert!(table.is_empty());
    }

    #[test]
    fn test_no_tables() {
        assert!(build_address_table(None, None, AddressFamily::V4, None).is_empty());
    }
}
