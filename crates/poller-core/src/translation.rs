//! sysObjectID translation table.
//!
//! Maps registered OID prefixes to vendor decoding metadata. The dataset is a JSON
//! object keyed by dotted prefix; each value is a tree whose leaves are strings:
//!
//! ```json
//! {
//!   "1.3.6.1.4.1.9.1": {
//!     "make": "cisco",
//!     "2494": { "series": "Cat9300", "model": "C9300-24T" }
//!   }
//! }
//! ```
//!
//! Lookups return the longest registered prefix that is an ancestor of (or equal to)
//! the queried OID.

use crate::error::{PollerError, PollerResult};
use once_cell::sync::OnceCell;
use poller_types::Oid;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Dataset shipped with the crate.
const BUNDLED_DATASET: &str = include_str!("../data/translation.json");

/// Source name reported for errors in the bundled dataset.
pub const BUNDLED_SOURCE: &str = "bundled";

/// Field holding the vendor name on every root node.
pub const MAKE_FIELD: &str = "make";

/// Deepest nesting accepted below a root node.
const MAX_DEPTH: usize = 64;

static BUNDLED: OnceCell<TranslationTable> = OnceCell::new();

/// A value inside a translation node: a string leaf or a nested node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TranslationValue {
    Text(String),
    Node(TranslationNode),
}

/// One level of the translation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranslationNode(BTreeMap<String, TranslationValue>);

impl TranslationNode {
    pub fn get(&self, key: &str) -> Option<&TranslationValue> {
        self.0.get(key)
    }

    /// String leaf under `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(TranslationValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Nested node under `key`.
    pub fn child(&self, key: &str) -> Option<&TranslationNode> {
        match self.0.get(key) {
            Some(TranslationValue::Node(node)) => Some(node),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A registered prefix: its vendor and decoding subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    make: String,
    node: TranslationNode,
}

impl TranslationEntry {
    pub fn make(&self) -> &str {
        &self.make
    }

    /// The whole subtree registered at the prefix (including the `make` field).
    pub fn node(&self) -> &TranslationNode {
        &self.node
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatch<'a> {
    pub prefix: Oid,
    pub entry: &'a TranslationEntry,
}

/// Prefix table loaded once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: BTreeMap<Oid, TranslationEntry>,
}

impl TranslationTable {
    /// The dataset compiled into the crate, parsed on first use.
    pub fn bundled() -> PollerResult<&'static TranslationTable> {
        BUNDLED.get_or_try_init(|| Self::from_json_str(BUNDLED_SOURCE, BUNDLED_DATASET))
    }

    /// Loads and validates a dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> PollerResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&path.display().to_string(), &content)
    }

    /// Parses and validates a dataset.
    ///
    /// # Errors
    ///
    /// Returns [`PollerError::Dataset`] if the document is not an object of
    /// prefix to node, a prefix is not a numeric OID or is registered twice,
    /// a root lacks a string `make`, a key is empty, a value is neither string
    /// nor object, or nesting exceeds the depth limit.
    pub fn from_json_str(source_name: &str, content: &str) -> PollerResult<Self> {
        let document: Value = serde_json::from_str(content)
            .map_err(|e| PollerError::dataset(source_name, format!("not valid JSON: {}", e)))?;

        let Value::Object(roots) = document else {
            return Err(PollerError::dataset(
                source_name,
                "top level must be an object of prefix to node",
            ));
        };

        let mut entries = BTreeMap::new();
        for (prefix_text, root) in roots {
            let prefix: Oid = prefix_text.parse().map_err(|_| {
                PollerError::dataset(
                    source_name,
                    format!("prefix '{}' is not a numeric OID", prefix_text),
                )
            })?;

            let Value::Object(fields) = root else {
                return Err(PollerError::dataset(
                    source_name,
                    format!("prefix '{}' must map to an object", prefix_text),
                ));
            };

            let node = build_node(source_name, &prefix_text, fields, 0)?;
            let make = match node.text(MAKE_FIELD) {
                Some(make) if !make.trim().is_empty() => make.trim().to_ascii_lowercase(),
                _ => {
                    return Err(PollerError::dataset(
                        source_name,
                        format!("prefix '{}' has no string '{}'", prefix_text, MAKE_FIELD),
                    ));
                }
            };

            if entries.contains_key(&prefix) {
                return Err(PollerError::dataset(
                    source_name,
                    format!("prefix '{}' is registered more than once", prefix),
                ));
            }
            entries.insert(prefix, TranslationEntry { make, node });
        }

        info!(
            "Loaded translation dataset {}: {} prefixes",
            source_name,
            entries.len()
        );

        Ok(TranslationTable { entries })
    }

    /// Longest registered prefix that is an ancestor of, or equal to, `oid`.
    ///
    /// Strips one trailing arc at a time until a registered prefix is found, so a
    /// shorter prefix can never shadow a longer one and `1.3.6.1.4.1.9` never
    /// matches `1.3.6.1.4.1.99`.
    pub fn lookup(&self, oid: &Oid) -> Option<PrefixMatch<'_>> {
        let mut candidate = Some(oid.clone());
        while let Some(prefix) = candidate {
            if prefix.is_empty() {
                break;
            }
            if let Some(entry) = self.entries.get(&prefix) {
                return Some(PrefixMatch { prefix, entry });
            }
            candidate = prefix.parent();
        }
        None
    }

    /// Registered prefixes in OID order.
    pub fn prefixes(&self) -> impl Iterator<Item = &Oid> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn build_node(
    source_name: &str,
    path: &str,
    fields: Map<String, Value>,
    depth: usize,
) -> PollerResult<TranslationNode> {
    if depth > MAX_DEPTH {
        return Err(PollerError::dataset(
            source_name,
            format!("'{}' nests deeper than {} levels", path, MAX_DEPTH),
        ));
    }

    let mut node = BTreeMap::new();
    for (key, value) in fields {
        let key_path = format!("{}/{}", path, key);
        if key.trim().is_empty() {
            return Err(PollerError::dataset(
                source_name,
                format!("empty key under '{}'", path),
            ));
        }

        let value = match value {
            Value::String(s) => TranslationValue::Text(s),
            Value::Object(children) => {
                TranslationValue::Node(build_node(source_name, &key_path, children, depth + 1)?)
            }
            other => {
                return Err(PollerError::dataset(
                    source_name,
                    format!(
                        "'{}' must be a string or object, found {}",
                        key_path,
                        json_kind(&other)
                    ),
                ));
            }
        };
        node.insert(key, value);
    }

    Ok(TranslationNode(node))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
