//! Device identity resolution from sysObjectID.
//!
//! [`ModelResolver::resolve`] looks the device's root OID up in the
//! [`TranslationTable`], takes the arcs that follow the matched prefix as the
//! model octets, and hands them to the vendor's [`VendorRule`].

mod vendor;

pub use vendor::{A10_MODEL_PATTERN, AVOCENT_MODEL_OIDS, VendorRule};

use crate::query::SupplementaryQuery;
use crate::translation::TranslationTable;
use poller_types::Oid;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Legacy Juniper prefix whose model octets start two arcs further in.
pub const JUNIPER_LEGACY_PREFIX: &str = "1.3.6.1.4.1.2636.1.1.1";

/// Arcs skipped after [`JUNIPER_LEGACY_PREFIX`].
const JUNIPER_LEGACY_OFFSET: usize = 2;

/// Make / series / model of a device.
///
/// Only a record with all three fields present counts as identified; partial
/// records are returned as-is so callers can tell "vendor known, model unknown"
/// apart from "vendor unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub make: Option<String>,
    pub series: Option<String>,
    pub model: Option<String>,
}

impl DeviceIdentity {
    pub fn new(
        make: impl Into<String>,
        series: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            make: Some(make.into()),
            series: Some(series.into()),
            model: Some(model.into()),
        }
    }

    /// True when make, series and model are all present.
    pub fn is_complete(&self) -> bool {
        self.make.is_some() && self.series.is_some() && self.model.is_some()
    }

    /// True when nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.make.is_none() && self.series.is_none() && self.model.is_none()
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{} {} {}",
            field(&self.make),
            field(&self.series),
            field(&self.model)
        )
    }
}

/// Series and model produced by a vendor rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesModel {
    pub series: Option<String>,
    pub model: Option<String>,
}

/// Resolves device identities against a shared translation table.
#[derive(Debug, Clone, Copy)]
pub struct ModelResolver<'a> {
    table: &'a TranslationTable,
}

impl<'a> ModelResolver<'a> {
    pub fn new(table: &'a TranslationTable) -> Self {
        Self { table }
    }

    /// Resolves `root_oid` (a sysObjectID value) into a [`DeviceIdentity`].
    ///
    /// `query` serves the single follow-up lookup the A10, Avocent and Niagara
    /// rules need. Unknown vendors yield an empty identity; partial results are
    /// logged at debug level and returned.
    pub fn resolve<Q>(&self, root_oid: &str, query: &Q) -> DeviceIdentity
    where
        Q: SupplementaryQuery + ?Sized,
    {
        let oid: Oid = match root_oid.parse() {
            Ok(oid) => oid,
            Err(_) => {
                debug!("Root OID '{}' is not numeric, vendor unrecognized", root_oid);
                return DeviceIdentity::default();
            }
        };

        let Some(matched) = self.table.lookup(&oid) else {
            debug!("No translation prefix for {}, vendor unrecognized", oid);
            return DeviceIdentity::default();
        };

        let octets = model_octets(&oid, &matched.prefix);
        let make = matched.entry.make();
        let rule = VendorRule::for_make(make);

        let Some(extracted) = rule.extract(make, matched.entry.node(), &octets, query) else {
            debug!(
                "{:?} rule gave up on {} (prefix {})",
                rule, oid, matched.prefix
            );
            return DeviceIdentity::default();
        };

        let identity = DeviceIdentity {
            make: Some(make.to_string()),
            series: extracted.series,
            model: extracted.model,
        };

        if !identity.is_complete() {
            debug!(
                "Partial identity for {} under prefix {}: {}",
                oid, matched.prefix, identity
            );
        }

        identity
    }
}

/// Arcs of `oid` after `prefix`, as strings, honouring the legacy Juniper offset.
fn model_octets(oid: &Oid, prefix: &Oid) -> Vec<String> {
    let suffix = oid.suffix_after(prefix).unwrap_or_default();
    let skip = if prefix.to_string() == JUNIPER_LEGACY_PREFIX {
        JUNIPER_LEGACY_OFFSET
    } else {
        0
    };

    suffix
        .iter()
        .skip(skip)
        .map(|arc| arc.to_string())
        .collect()
}
