//! Per-vendor series/model extraction rules.

use super::SeriesModel;
use crate::query::SupplementaryQuery;
use crate::system::SYS_DESCR;
use crate::translation::{TranslationNode, TranslationValue};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// A10 model token inside sysDescr: AX/TH, 3-4 digits, optional `S` or `-<digits>`.
pub const A10_MODEL_PATTERN: &str = r"(AX|TH)\d{3,4}(S|-\d+)?";

/// Scalars holding the Avocent product name, tried in order.
pub const AVOCENT_MODEL_OIDS: [&str; 2] = ["1.3.6.1.4.1.10418.16.2.1.2.0", SYS_DESCR];

static A10_MODEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(A10_MODEL_PATTERN).expect("Invalid regex pattern"));

static AVOCENT_MODEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ACS\d{4}").expect("Invalid regex pattern"));

static NIAGARA_MODEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Model Number: (\w+)([ -])(\w+)").expect("Invalid regex pattern")
});

/// Decoding policy selected by the `make` of the matched prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorRule {
    /// Series from the subtree, model from sysDescr.
    A10,
    /// Series and model spelled out fragment by fragment.
    Arista,
    /// Direct `series` / `model` fields under the first octet.
    Cisco,
    /// `series` / `model` / `base` subsets keyed by the first octet.
    AlcatelJuniperF5,
    /// ACS model token from a product-name scalar.
    Avocent,
    /// `Model Number:` field from sysDescr.
    Niagara,
    /// Known make without a decoding rule.
    Unknown,
}

impl VendorRule {
    pub fn for_make(make: &str) -> Self {
        match make.to_ascii_lowercase().as_str() {
            "a10" => VendorRule::A10,
            "arista" => VendorRule::Arista,
            "cisco" => VendorRule::Cisco,
            "alcatel" | "juniper" | "f5" => VendorRule::AlcatelJuniperF5,
            "avocent" => VendorRule::Avocent,
            "niagara" => VendorRule::Niagara,
            _ => VendorRule::Unknown,
        }
    }

    /// Runs the rule.
    ///
    /// Returns None when the whole resolution must be abandoned (A10 without a
    /// usable sysDescr); otherwise whatever series/model could be found.
    pub fn extract<Q>(
        &self,
        make: &str,
        subtree: &TranslationNode,
        octets: &[String],
        query: &Q,
    ) -> Option<SeriesModel>
    where
        Q: SupplementaryQuery + ?Sized,
    {
        match self {
            VendorRule::A10 => extract_a10(subtree, octets, query),
            VendorRule::Arista => Some(extract_arista(subtree, octets)),
            VendorRule::Cisco => Some(extract_cisco(subtree, octets)),
            VendorRule::AlcatelJuniperF5 => Some(extract_subset(make, subtree, octets)),
            VendorRule::Avocent => Some(extract_avocent(query)),
            VendorRule::Niagara => Some(extract_niagara(query)),
            VendorRule::Unknown => Some(SeriesModel::default()),
        }
    }
}

/// Asks for one scalar and returns its usable value.
fn query_scalar<Q>(query: &Q, oid: &str) -> Option<String>
where
    Q: SupplementaryQuery + ?Sized,
{
    let response = query.query(oid)?;
    match response.scalar(oid) {
        Some(value) => Some(value.to_string()),
        None => {
            warn!("Supplementary query {} returned no usable value", oid);
            None
        }
    }
}

fn extract_a10<Q>(subtree: &TranslationNode, octets: &[String], query: &Q) -> Option<SeriesModel>
where
    Q: SupplementaryQuery + ?Sized,
{
    let series = match octets.first().and_then(|o| subtree.get(o)) {
        Some(TranslationValue::Text(series)) => Some(series.clone()),
        Some(TranslationValue::Node(level)) => octets
            .get(1)
            .and_then(|o| level.text(o))
            .or_else(|| level.text("series"))
            .map(str::to_string),
        None => None,
    };

    let descr = query_scalar(query, SYS_DESCR)?;
    let model = A10_MODEL_RE
        .find(&descr)
        .map(|m| m.as_str().to_string());

    Some(SeriesModel { series, model })
}

/// Concatenates the translated fragment (or the raw octet) for each octet.
fn spell_out(subtree: &TranslationNode, octets: &[String]) -> Option<String> {
    if octets.is_empty() {
        return None;
    }
    Some(
        octets
            .iter()
            .map(|o| subtree.text(o).unwrap_or(o.as_str()))
            .collect(),
    )
}

fn extract_arista(subtree: &TranslationNode, octets: &[String]) -> SeriesModel {
    let series_len = octets.len().min(2);
    SeriesModel {
        series: spell_out(subtree, &octets[..series_len]),
        model: spell_out(subtree, octets),
    }
}

fn extract_cisco(subtree: &TranslationNode, octets: &[String]) -> SeriesModel {
    let Some(subset) = octets.first().and_then(|o| subtree.child(o)) else {
        return SeriesModel::default();
    };
    SeriesModel {
        series: subset.text("series").map(str::to_string),
        model: subset.text("model").map(str::to_string),
    }
}

fn concat(base: Option<&str>, tail: Option<&str>) -> Option<String> {
    Some(format!("{}{}", base?, tail?))
}

fn extract_subset(make: &str, subtree: &TranslationNode, octets: &[String]) -> SeriesModel {
    let Some(subset) = octets.first().and_then(|o| subtree.child(o)) else {
        return SeriesModel::default();
    };

    let mut series = subset.text("series").map(str::to_string);
    let base = subset.text("base");

    let model = if octets.len() == 1 {
        subset.text("model").or(base).map(str::to_string)
    } else {
        let nested = octets.last().and_then(|o| subset.child(o));
        let model = subset
            .text("model")
            .map(str::to_string)
            .or_else(|| concat(base, nested.and_then(|n| n.text("model"))));

        if series.is_none() && make.eq_ignore_ascii_case("juniper") {
            series = concat(base, nested.and_then(|n| n.text("series")));
        }
        model
    };

    SeriesModel { series, model }
}

fn extract_avocent<Q>(query: &Q) -> SeriesModel
where
    Q: SupplementaryQuery + ?Sized,
{
    let Some(product) = AVOCENT_MODEL_OIDS
        .iter()
        .find_map(|oid| query_scalar(query, oid))
    else {
        return SeriesModel::default();
    };

    let Some(token) = AVOCENT_MODEL_RE.find(&product) else {
        debug!("No ACS model token in '{}'", product);
        return SeriesModel::default();
    };

    let model = token.as_str().to_string();
    // ACS6048 belongs to the ACS6000 series
    let series = format!("{}00", &model[..model.len() - 2]);
    SeriesModel {
        series: Some(series),
        model: Some(model),
    }
}

fn extract_niagara<Q>(query: &Q) -> SeriesModel
where
    Q: SupplementaryQuery + ?Sized,
{
    let Some(descr) = query_scalar(query, SYS_DESCR) else {
        return SeriesModel::default();
    };

    let Some(caps) = NIAGARA_MODEL_RE.captures(&descr) else {
        debug!("No model number in '{}'", descr);
        return SeriesModel::default();
    };

    let family = &caps[1];
    let variant = &caps[3];
    let model = if &caps[2] == "-" {
        format!("{}-{}", family, variant)
    } else {
        variant.to_string()
    };

    SeriesModel {
        series: Some(family.to_string()),
        model: Some(model),
    }
}
