//! Captured device snapshots and the inventory report built from them.
//!
//! A snapshot is the JSON dump of the queries a collector ran against one device.
//! It stands in for the live query layer: supplementary lookups are answered from
//! its `scalars` and `system` maps.

use crate::entity::select_model;
use crate::error::PollerResult;
use crate::interfaces::{InterfaceRecord, aggregate_interfaces, build_address_table};
use crate::inventory::{
    JNX_CONTENTS_DESCR, chassis_column, chassis_count, query_serial, resolve_serial,
};
use crate::query::{OidValueMap, SupplementaryQuery};
use crate::resolver::{DeviceIdentity, ModelResolver};
use crate::system::{SystemInfo, scalar_aliases};
use crate::translation::TranslationTable;
use poller_types::AddressFamily;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Raw query results for one device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSnapshot {
    pub system: OidValueMap,
    pub scalars: OidValueMap,
    #[serde(rename = "ipAdEntIfIndex")]
    pub ip_ad_ent_if_index: Option<OidValueMap>,
    #[serde(rename = "ipAddressIfIndex")]
    pub ip_address_if_index: Option<OidValueMap>,
    #[serde(rename = "ifDescr")]
    pub if_descr: OidValueMap,
    #[serde(rename = "ifOperStatus")]
    pub if_oper_status: OidValueMap,
    #[serde(rename = "ifAdminStatus")]
    pub if_admin_status: OidValueMap,
    #[serde(rename = "entPhysicalClass")]
    pub ent_physical_class: OidValueMap,
    #[serde(rename = "jnxContentsDescr")]
    pub jnx_contents_descr: OidValueMap,
}

impl DeviceSnapshot {
    pub fn load(path: impl AsRef<Path>) -> PollerResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let snapshot: DeviceSnapshot = serde_json::from_str(&content)?;
        debug!(
            "Loaded snapshot {} ({} system, {} scalar values)",
            path.display(),
            snapshot.system.len(),
            snapshot.scalars.len()
        );
        Ok(snapshot)
    }

    fn chassis_walk(&self, make: &str) -> &OidValueMap {
        if chassis_column(make) == JNX_CONTENTS_DESCR {
            &self.jnx_contents_descr
        } else {
            &self.ent_physical_class
        }
    }

    fn interfaces(&self, family: AddressFamily) -> Vec<InterfaceRecord> {
        let addresses = build_address_table(
            self.ip_ad_ent_if_index.as_ref(),
            self.ip_address_if_index.as_ref(),
            family,
            None,
        );
        aggregate_interfaces(
            &addresses,
            &self.if_descr,
            &self.if_oper_status,
            &self.if_admin_status,
            family,
        )
    }
}

impl SupplementaryQuery for DeviceSnapshot {
    /// Answers from `scalars`, then `system`.
    ///
    /// System scalars may be captured under the numeric or the named OID, so a
    /// miss on the requested spelling retries the other one. The answer is keyed
    /// by the requested OID either way.
    fn query(&self, oid: &str) -> Option<OidValueMap> {
        let lookup = |key: &str| self.scalars.get(key).or_else(|| self.system.get(key));

        if let Some(value) = lookup(oid) {
            return Some(OidValueMap::new().with(oid, value));
        }
        scalar_aliases(oid)
            .iter()
            .filter(|alias| **alias != oid)
            .find_map(|alias| lookup(*alias))
            .map(|value| OidValueMap::new().with(oid, value))
    }
}

/// Normalized inventory of one device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
    pub system: SystemInfo,
    pub identity: DeviceIdentity,
    pub interfaces_v4: Vec<InterfaceRecord>,
    pub interfaces_v6: Vec<InterfaceRecord>,
    pub serial: Option<String>,
    pub chassis_count: Option<usize>,
}

impl InventoryReport {
    /// Runs every resolver over `snapshot`.
    ///
    /// When the vendor is known but the translation table gives no model, the
    /// entity-MIB candidates are consulted as a fallback.
    pub fn build(snapshot: &DeviceSnapshot, table: &TranslationTable) -> Self {
        let system = SystemInfo::from_map(&snapshot.system);

        let mut identity = match system.object_id.as_deref() {
            Some(root_oid) => ModelResolver::new(table).resolve(root_oid, snapshot),
            None => {
                debug!("Snapshot has no sysObjectID, identity left empty");
                DeviceIdentity::default()
            }
        };

        if identity.make.is_some() && identity.model.is_none() {
            let candidate = select_model(snapshot)
                .and_then(|m| m.first_present().map(str::to_string));
            if let Some(model) = candidate {
                debug!("Model '{}' taken from entity candidates", model);
                identity.model = Some(model);
            }
        }

        let make = identity.make.clone().unwrap_or_default();
        let serial =
            resolve_serial(&make, &snapshot.scalars).or_else(|| query_serial(&make, snapshot));
        let chassis_count = chassis_count(&make, snapshot.chassis_walk(&make));

        let report = Self {
            system,
            identity,
            interfaces_v4: snapshot.interfaces(AddressFamily::V4),
            interfaces_v6: snapshot.interfaces(AddressFamily::V6),
            serial,
            chassis_count,
        };

        info!(
            "Inventory for {}: {} ({} IPv4, {} IPv6 interfaces)",
            report.system.name.as_deref().unwrap_or("unnamed device"),
            report.identity,
            report.interfaces_v4.len(),
            report.interfaces_v6.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> TranslationTable {
        TranslationTable::from_json_str(
            "test",
            r#"{
                "1.3.6.1.4.1.9.1": {
                    "make": "cisco",
                    "1208": { "series": "Cat2960" }
                }
            }"#,
        )
        .unwrap()
    }

    fn snapshot() -> DeviceSnapshot {
        serde_json::from_str(
            r#"{
                "system": {
                    "sysObjectID.0": "1.3.6.1.4.1.9.1.1208",
                    "sysName.0": "access-7"
                },
                "scalars": {
                    "1.3.6.1.2.1.47.1.1.1.1.13.1": "WS-C2960X-48FPD-L",
                    "1.3.6.1.2.1.47.1.1.1.1.11.1": "FOC1901X1AB"
                },
                "ipAdEntIfIndex": { "ipAdEntIfIndex.10.1.1.7": "5" },
                "ifDescr": { "ifDescr.5": "Vlan10" },
                "ifOperStatus": { "ifOperStatus.5": "1" },
                "ifAdminStatus": { "ifAdminStatus.5": "1" },
                "entPhysicalClass": { "entPhysicalClass.1": "3", "entPhysicalClass.2": "9" }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_report_from_snapshot() {
        let report = InventoryReport::build(&snapshot(), &table());

        assert_eq!(
            report.identity,
            DeviceIdentity::new("cisco", "Cat2960", "WS-C2960X-48FPD-L")
        );
        assert_eq!(report.system.name.as_deref(), Some("access-7"));
        assert_eq!(report.interfaces_v4.len(), 1);
        assert_eq!(report.interfaces_v4[0].address, "10.1.1.7");
        assert!(report.interfaces_v6.is_empty());
        assert_eq!(report.serial.as_deref(), Some("FOC1901X1AB"));
        assert_eq!(report.chassis_count, Some(1));
    }

    #[test]
    fn test_empty_snapshot() {
        let report = InventoryReport::build(&DeviceSnapshot::default(), &table());
        assert!(report.identity.is_empty());
        assert_eq!(report.serial, None);
        assert_eq!(report.chassis_count, None);
    }

    #[test]
    fn test_numeric_system_keys_feed_vendor_rules() {
        let table = TranslationTable::from_json_str(
            "test",
            r#"{"1.3.6.1.4.1.22610.1.3": {"make": "a10", "15": "Thunder"}}"#,
        )
        .unwrap();
        let snapshot: DeviceSnapshot = serde_json::from_str(
            r#"{
                "system": {
                    "1.3.6.1.2.1.1.1.0": "Thunder Series Gateway TH3030S, ACOS 4.1.4",
                    "1.3.6.1.2.1.1.2.0": "1.3.6.1.4.1.22610.1.3.15"
                }
            }"#,
        )
        .unwrap();

        let report = InventoryReport::build(&snapshot, &table);
        assert_eq!(report.identity, DeviceIdentity::new("a10", "Thunder", "TH3030S"));

        let answer = snapshot.query("sysDescr.0").unwrap();
        assert_eq!(answer.len(), 1);
        assert!(answer.get("sysDescr.0").is_some());
    }

    #[test]
    fn test_snapshot_answers_queries() {
        let snapshot = snapshot();
        let answer = snapshot.query("sysName.0").unwrap();
        assert_eq!(answer.get("sysName.0"), Some("access-7"));
        assert_eq!(snapshot.query("1.3.6.1.4.1.9.9.9"), None);
    }
}
