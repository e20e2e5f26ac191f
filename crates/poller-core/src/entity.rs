//! Model name discovery from ENTITY-MIB and vendor inventory tables.
//!
//! Used when the sysObjectID translation does not produce a model. Each
//! candidate OID is queried in order; the first response whose every value looks
//! like a real product name wins.

use crate::query::{OidValueMap, SupplementaryQuery};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Candidate OIDs, most reliable first.
pub const MODEL_CANDIDATE_OIDS: [&str; 14] = [
    // entPhysicalModelName
    "1.3.6.1.2.1.47.1.1.1.1.13.4",
    "1.3.6.1.2.1.47.1.1.1.1.13.1",
    // entPhysicalDescr
    "1.3.6.1.2.1.47.1.1.1.1.2.1",
    "1.3.6.1.2.1.47.1.1.1.1.2.149",
    "1.3.6.1.2.1.47.1.1.1.1.13.1001",
    "1.3.6.1.2.1.47.1.1.1.1.2.24555730",
    "1.3.6.1.2.1.47.1.1.1.1.2.2",
    // CISCO-ENTITY-FRU-CONTROL
    "1.3.6.1.4.1.9.9.249.1.1.1.1.3",
    "1.3.6.1.4.1.9.9.249.1.1.1.1.2",
    // entPhysicalSoftwareRev
    "1.3.6.1.2.1.47.1.1.1.1.10.2",
    // TIMETRA-CHASSIS-MIB
    "1.3.6.1.4.1.6527.3.1.2.2.1.6.1.2.2",
    "1.3.6.1.4.1.6527.3.1.2.2.1.6.1.2.12",
    // JUNIPER-MIB
    "1.3.6.1.4.1.2636.3.40.1.4.1.1.1.8.0",
    "1.3.6.1.4.1.2636.3.1.2.0",
];

/// Values that show up in the candidate OIDs but are not model names.
static FALSE_POSITIVES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        concat!(
            r"MIDPLANE|NOSUCH|N/A|PORT|ÿ|DaughterCard|Switch Stack|Chassis System|",
            r"Control Ethernet|NC6-RP|\d\d\d-\d\d\d\d|Virtual|\d\d\.\d|\d\.\d\.\d|7600",
        ),
    )
    .expect("Invalid regex pattern")
});

/// Exact values rejected on top of [`FALSE_POSITIVES`].
const REJECTED_VALUES: [&str; 2] = ["CHASSIS", "C "];

/// True when `value` cannot be a model name.
pub fn is_false_positive(value: &str) -> bool {
    value.trim().is_empty() || REJECTED_VALUES.contains(&value) || FALSE_POSITIVES.is_match(value)
}

/// Queries [`MODEL_CANDIDATE_OIDS`] in order and returns the first response whose
/// values are all plausible model names.
pub fn select_model<Q>(query: &Q) -> Option<OidValueMap>
where
    Q: SupplementaryQuery + ?Sized,
{
    for oid in MODEL_CANDIDATE_OIDS {
        let Some(response) = query.query(oid) else {
            continue;
        };
        if response.is_empty() {
            continue;
        }
        if let Some(rejected) = response.values().find(|v| is_false_positive(v)) {
            debug!("Rejecting model candidate {}: '{}'", oid, rejected);
            continue;
        }
        return Some(response);
    }
    None
}
