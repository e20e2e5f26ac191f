//! Serial number and chassis count resolution.

use crate::query::{OidValueMap, SupplementaryQuery};
use tracing::debug;

/// entPhysicalSerialNum of the first physical entity.
pub const ENT_SERIAL_FIRST: &str = "1.3.6.1.2.1.47.1.1.1.1.11.1";

const CISCO_SERIAL_OIDS: &[&str] = &[
    ENT_SERIAL_FIRST,
    "1.3.6.1.2.1.47.1.1.1.1.11.1001",
    // OLD-CISCO-CHASSIS-MIB chassisId
    "1.3.6.1.4.1.9.3.6.3.0",
];
const JUNIPER_SERIAL_OIDS: &[&str] = &["1.3.6.1.4.1.2636.3.1.3.0", ENT_SERIAL_FIRST];
const F5_SERIAL_OIDS: &[&str] = &["1.3.6.1.4.1.3375.2.1.3.3.3.0"];
const ARISTA_SERIAL_OIDS: &[&str] = &[ENT_SERIAL_FIRST, "1.3.6.1.2.1.47.1.1.1.1.11.100006001"];
const ALCATEL_SERIAL_OIDS: &[&str] = &[
    "1.3.6.1.4.1.6527.3.1.2.2.1.8.1.5.1.50331649",
    ENT_SERIAL_FIRST,
];
const DEFAULT_SERIAL_OIDS: &[&str] = &[ENT_SERIAL_FIRST];

pub const ENT_PHYSICAL_CLASS: &str = "entPhysicalClass";
pub const JNX_CONTENTS_DESCR: &str = "jnxContentsDescr";

/// PhysicalClass value for a chassis.
const CHASSIS_CLASS: u32 = 3;

/// Serial number OIDs for `make`, most specific first.
pub fn serial_oids(make: &str) -> &'static [&'static str] {
    match make.to_ascii_lowercase().as_str() {
        "cisco" => CISCO_SERIAL_OIDS,
        "juniper" => JUNIPER_SERIAL_OIDS,
        "f5" => F5_SERIAL_OIDS,
        "arista" => ARISTA_SERIAL_OIDS,
        "alcatel" => ALCATEL_SERIAL_OIDS,
        _ => DEFAULT_SERIAL_OIDS,
    }
}

/// First usable serial in `map` among the OIDs for `make`.
pub fn resolve_serial(make: &str, map: &OidValueMap) -> Option<String> {
    serial_oids(make)
        .iter()
        .find_map(|oid| map.get_present(oid))
        .map(|serial| serial.trim().to_string())
}

/// Queries the serial OIDs for `make` in order and returns the first usable answer.
pub fn query_serial<Q>(make: &str, query: &Q) -> Option<String>
where
    Q: SupplementaryQuery + ?Sized,
{
    for oid in serial_oids(make) {
        let Some(response) = query.query(oid) else {
            debug!("Serial query for {} failed", oid);
            continue;
        };
        if let Some(serial) = response.scalar(oid) {
            return Some(serial.trim().to_string());
        }
    }
    None
}

/// Column walked to count chassis for `make`.
pub fn chassis_column(make: &str) -> &'static str {
    if make.eq_ignore_ascii_case("juniper") {
        JNX_CONTENTS_DESCR
    } else {
        ENT_PHYSICAL_CLASS
    }
}

/// Number of chassis reported by a walk of [`chassis_column`]`(make)`.
///
/// Juniper devices list their contents by description, so rows mentioning
/// "chassis" are counted. Everyone else is counted by entPhysicalClass, accepting
/// both the numeric (`3`) and labelled (`chassis(3)`) renderings. An empty walk
/// yields None.
pub fn chassis_count(make: &str, walk: &OidValueMap) -> Option<usize> {
    let column = chassis_column(make);
    let mut rows = walk.column(column).peekable();
    if rows.peek().is_none() {
        debug!("No {} rows to count chassis from", column);
        return None;
    }

    let count = if column == JNX_CONTENTS_DESCR {
        rows.filter(|(_, descr)| descr.to_ascii_lowercase().contains("chassis"))
            .count()
    } else {
        rows.filter(|(_, class)| is_chassis_class(class)).count()
    };
    Some(count)
}

fn is_chassis_class(value: &str) -> bool {
    let value = value.trim();
    let code = value
        .strip_suffix(')')
        .and_then(|rest| rest.rsplit_once('('))
        .map_or(value, |(_, code)| code);
    code.parse::<u32>().ok() == Some(CHASSIS_CLASS) || value.eq_ignore_ascii_case("chassis")
}
