//! Identity resolution against the bundled translation dataset.

use poller_core::{DeviceIdentity, ModelResolver, OidValueMap, TranslationTable};
use pretty_assertions::assert_eq;

fn resolver() -> ModelResolver<'static> {
    ModelResolver::new(TranslationTable::bundled().unwrap())
}

fn no_query(_: &str) -> Option<OidValueMap> {
    None
}

fn answering(text: &'static str) -> impl Fn(&str) -> Option<OidValueMap> {
    move |oid: &str| Some(OidValueMap::new().with(oid, text))
}

#[test]
fn test_bundled_dataset_is_valid() {
    let table = TranslationTable::bundled().unwrap();
    assert!(table.len() >= 10);
    assert!(table.prefixes().any(|p| p.to_string() == "1.3.6.1.4.1.2636.1.1.1"));
}

#[test]
fn test_table_driven_vendors() {
    let resolver = resolver();
    for (root, expected) in [
        (
            "1.3.6.1.4.1.9.1.2494",
            DeviceIdentity::new("cisco", "Catalyst 9300", "C9300-24T"),
        ),
        (
            ".1.3.6.1.4.1.9.12.3.1.3.1084",
            DeviceIdentity::new("cisco", "Nexus 9000", "N9K-C93180YC-EX"),
        ),
        (
            "1.3.6.1.4.1.30065.1.3011.7048.427.3648",
            DeviceIdentity::new("arista", "DCS-7048", "DCS-7048T-A"),
        ),
        (
            "1.3.6.1.4.1.2636.1.1.1.2.131.1",
            DeviceIdentity::new("juniper", "QFX5100", "QFX5100-48S-6Q"),
        ),
        (
            "1.3.6.1.4.1.2636.1.1.1.2.31.2",
            DeviceIdentity::new("juniper", "EX", "EX4200-48T"),
        ),
        (
            "1.3.6.1.4.1.2636.1.1.1.4.82.8",
            DeviceIdentity::new("juniper", "SRX", "SRX210"),
        ),
        (
            "1.3.6.1.4.1.6527.1.3.18.12",
            DeviceIdentity::new("alcatel", "7750 SR", "7750 SR-12"),
        ),
        (
            "1.3.6.1.4.1.3375.2.1.3.4.113.5",
            DeviceIdentity::new("f5", "BIG-IP i-Series", "BIG-IP i5800"),
        ),
    ] {
        assert_eq!(resolver.resolve(root, &no_query), expected, "root {root}");
    }
}

#[test]
fn test_query_driven_vendors() {
    let resolver = resolver();

    let a10 = answering("Thunder Series Unified Application Service Gateway TH3030S, ACOS 4.1.4");
    assert_eq!(
        resolver.resolve("1.3.6.1.4.1.22610.1.3.15", &a10),
        DeviceIdentity::new("a10", "Thunder", "TH3030S")
    );

    let avocent = answering("Avocent ACS6048 Advanced Console Server");
    assert_eq!(
        resolver.resolve("1.3.6.1.4.1.10418.16.1.5", &avocent),
        DeviceIdentity::new("avocent", "ACS6000", "ACS6048")
    );

    let niagara = answering("Niagara Networks packet broker, Model Number: N2-3299");
    assert_eq!(
        resolver.resolve("1.3.6.1.4.1.29349.1.1", &niagara),
        DeviceIdentity::new("niagara", "N2", "N2-3299")
    );
}

#[test]
fn test_a10_without_description_is_unidentified() {
    assert!(resolver().resolve("1.3.6.1.4.1.22610.1.3.15", &no_query).is_empty());
}

#[test]
fn test_unrecognized_roots() {
    let resolver = resolver();
    // net-snmp agent
    assert!(resolver.resolve("1.3.6.1.4.1.8072.3.2.10", &no_query).is_empty());
    // 1.3.6.1.4.1.99 must not match the Cisco 1.3.6.1.4.1.9 family
    assert!(resolver.resolve("1.3.6.1.4.1.99.1.2494", &no_query).is_empty());
}

#[test]
fn test_partial_identities() {
    let resolver = resolver();

    let hp = resolver.resolve("1.3.6.1.4.1.11.2.3.7.11.160", &no_query);
    assert_eq!(hp.make.as_deref(), Some("hp"));
    assert!(!hp.is_complete());

    let cisco = resolver.resolve("1.3.6.1.4.1.9.1.9999", &no_query);
    assert_eq!(cisco.make.as_deref(), Some("cisco"));
    assert_eq!(cisco.series, None);
    assert_eq!(cisco.model, None);
}
