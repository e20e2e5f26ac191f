//! Boundary types shared with the query layer.
//!
//! The transport (get / bulk-get / walk) lives outside this crate. It hands results
//! over as [`QueryValue`]s or ready-made [`OidValueMap`]s, and answers the few
//! follow-up lookups vendor rules need through [`SupplementaryQuery`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value reported for an OID the agent does not implement.
pub const NO_SUCH_OBJECT: &str = "NOSUCHOBJECT";

/// Value reported for a missing instance of an implemented object.
pub const NO_SUCH_INSTANCE: &str = "NOSUCHINSTANCE";

/// Value reported when a walk runs past the end of the MIB view.
pub const END_OF_MIB_VIEW: &str = "ENDOFMIBVIEW";

/// Returns true if `value` is one of the "object not present" sentinels.
pub fn is_sentinel(value: &str) -> bool {
    matches!(value, NO_SUCH_OBJECT | NO_SUCH_INSTANCE | END_OF_MIB_VIEW)
}

/// Returns the value unless it is empty, whitespace or a sentinel.
fn present(value: &str) -> Option<&str> {
    if value.trim().is_empty() || is_sentinel(value) {
        None
    } else {
        Some(value)
    }
}

/// OID (optionally `name.index`) to textual value, as returned by one query.
///
/// Keys iterate in sorted order so every consumer sees the same sequence for the
/// same input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OidValueMap(BTreeMap<String, String>);

impl OidValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Raw value, sentinels included.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for `key`, treating empty strings and sentinels as absent.
    pub fn get_present(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(present)
    }

    /// First usable value in key order.
    pub fn first_present(&self) -> Option<&str> {
        self.0.values().find_map(|v| present(v))
    }

    /// Value of a scalar response for `oid`.
    ///
    /// Uses the entry keyed exactly by `oid` when there is one (a sentinel there
    /// means absent). Otherwise the agent may have echoed the OID under a different
    /// spelling (`sysDescr.0` for `1.3.6.1.2.1.1.1.0`), so the first usable value
    /// is taken.
    pub fn scalar(&self, oid: &str) -> Option<&str> {
        match self.get(oid) {
            Some(value) => present(value),
            None => self.first_present(),
        }
    }

    /// Iterates `(index, value)` for every key of the form `column.index`.
    pub fn column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.0.iter().filter_map(move |(key, value)| {
            key.strip_prefix(column)
                .and_then(|rest| rest.strip_prefix('.'))
                .filter(|index| !index.is_empty())
                .map(|index| (index, value.as_str()))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OidValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        OidValueMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for OidValueMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        OidValueMap(map)
    }
}

/// One variable binding as decoded by the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Varbind {
    /// Object name or numeric OID (`ifDescr`, `1.3.6.1.2.1.2.2.1.2`)
    pub oid: String,
    /// Instance index (`12`, `0`), empty or absent for fully qualified OIDs
    #[serde(default)]
    pub index: Option<String>,
    pub value: String,
}

impl Varbind {
    pub fn new(oid: impl Into<String>, index: Option<&str>, value: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            index: index.map(str::to_string),
            value: value.into(),
        }
    }

    /// Map key for this binding: `oid.index`, or just `oid` without an index.
    pub fn key(&self) -> String {
        match self.index.as_deref() {
            Some(index) if !index.is_empty() => format!("{}.{}", self.oid, index),
            _ => self.oid.clone(),
        }
    }
}

/// Result of one query: a single binding or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryValue {
    Scalar(Varbind),
    Collection(Vec<Varbind>),
}

impl QueryValue {
    /// Flattens the result into an [`OidValueMap`]; later duplicates overwrite earlier ones.
    pub fn into_map(self) -> OidValueMap {
        match self {
            QueryValue::Scalar(vb) => std::iter::once(vb).collect(),
            QueryValue::Collection(vbs) => vbs.into_iter().collect(),
        }
    }
}

impl FromIterator<Varbind> for OidValueMap {
    fn from_iter<I: IntoIterator<Item = Varbind>>(iter: I) -> Self {
        iter.into_iter().map(|vb| (vb.key(), vb.value)).collect()
    }
}

impl From<QueryValue> for OidValueMap {
    fn from(value: QueryValue) -> Self {
        value.into_map()
    }
}

/// A single-OID lookup the resolver may ask of the query layer.
///
/// Returns None when the request itself failed; an agent-side "no such object"
/// comes back as a map holding a sentinel value.
pub trait SupplementaryQuery {
    fn query(&self, oid: &str) -> Option<OidValueMap>;
}

impl<F> SupplementaryQuery for F
where
    F: Fn(&str) -> Option<OidValueMap>,
{
    fn query(&self, oid: &str) -> Option<OidValueMap> {
        self(oid)
    }
}

/// Answers from already captured data.
impl SupplementaryQuery for OidValueMap {
    fn query(&self, oid: &str) -> Option<OidValueMap> {
        self.get(oid).map(|value| OidValueMap::new().with(oid, value))
    }
}
