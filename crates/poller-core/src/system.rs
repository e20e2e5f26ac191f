//! SNMPv2-MIB `system` group parsing.

use crate::query::OidValueMap;
use serde::Serialize;
use tracing::warn;

pub const SYS_DESCR: &str = "sysDescr.0";
pub const SYS_OBJECT_ID: &str = "sysObjectID.0";
pub const SYS_UPTIME: &str = "sysUpTime.0";
pub const SYS_CONTACT: &str = "sysContact.0";
pub const SYS_NAME: &str = "sysName.0";
pub const SYS_LOCATION: &str = "sysLocation.0";

/// Misspelled sysLocation key emitted by some historical collectors.
///
/// Whether it was a typo or a deliberately divergent OID cannot be told from the
/// data, so it is read as a fallback and reported rather than rewritten.
pub const SYS_LOCATION_MISSPELLED: &str = "sysLocatino.0";

/// Named key and numeric OID for each scalar, tried in that order.
const DESCR_KEYS: &[&str] = &[SYS_DESCR, "1.3.6.1.2.1.1.1.0"];
const OBJECT_ID_KEYS: &[&str] = &[SYS_OBJECT_ID, "1.3.6.1.2.1.1.2.0"];
const UPTIME_KEYS: &[&str] = &[SYS_UPTIME, "1.3.6.1.2.1.1.3.0"];
const CONTACT_KEYS: &[&str] = &[SYS_CONTACT, "1.3.6.1.2.1.1.4.0"];
const NAME_KEYS: &[&str] = &[SYS_NAME, "1.3.6.1.2.1.1.5.0"];
const LOCATION_KEYS: &[&str] = &[SYS_LOCATION, "1.3.6.1.2.1.1.6.0"];

const ALL_KEYS: [&[&str]; 6] = [
    DESCR_KEYS,
    OBJECT_ID_KEYS,
    UPTIME_KEYS,
    CONTACT_KEYS,
    NAME_KEYS,
    LOCATION_KEYS,
];

/// Every spelling of the `system` scalar named by `key`, named form first.
///
/// Empty for keys outside the group.
pub fn scalar_aliases(key: &str) -> &'static [&'static str] {
    ALL_KEYS
        .iter()
        .find(|keys| keys.contains(&key))
        .copied()
        .unwrap_or(&[])
}

/// Scalars of the `system` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    pub descr: Option<String>,
    pub object_id: Option<String>,
    pub uptime: Option<String>,
    pub contact: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
}

impl SystemInfo {
    /// Extracts the group from a bulk `system` query result.
    pub fn from_map(map: &OidValueMap) -> Self {
        let pick = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| map.get_present(k))
                .map(str::to_string)
        };

        let location = pick(LOCATION_KEYS).or_else(|| {
            let value = map.get_present(SYS_LOCATION_MISSPELLED)?;
            warn!(
                "Using misspelled key {} for sysLocation (known collector defect)",
                SYS_LOCATION_MISSPELLED
            );
            Some(value.to_string())
        });

        Self {
            descr: pick(DESCR_KEYS),
            object_id: pick(OBJECT_ID_KEYS),
            uptime: pick(UPTIME_KEYS),
            contact: pick(CONTACT_KEYS),
            name: pick(NAME_KEYS),
            location,
        }
    }
}
