//! SNMP Inventory Normalization
//!
//! Turns raw OID/value maps from SNMP queries into device identities (make,
//! series, model), interface records, serial numbers and chassis counts.
//! Querying devices is left to the caller; this crate only interprets results.

pub mod config;
pub mod entity;
pub mod error;
pub mod interfaces;
pub mod inventory;
pub mod query;
pub mod resolver;
pub mod snapshot;
pub mod system;
pub mod translation;

pub use config::{DEFAULT_CONFIG_PATH, PollerConfig, SnmpVersion};
pub use entity::{MODEL_CANDIDATE_OIDS, is_false_positive, select_model};
pub use error::*;
pub use interfaces::{AddressTable, InterfaceRecord, aggregate_interfaces, build_address_table};
pub use inventory::{chassis_column, chassis_count, query_serial, resolve_serial, serial_oids};
pub use query::{
    END_OF_MIB_VIEW, NO_SUCH_INSTANCE, NO_SUCH_OBJECT, OidValueMap, QueryValue,
    SupplementaryQuery, Varbind, is_sentinel,
};
pub use resolver::{DeviceIdentity, ModelResolver, SeriesModel, VendorRule};
pub use snapshot::{DeviceSnapshot, InventoryReport};
pub use system::SystemInfo;
pub use translation::{
    PrefixMatch, TranslationEntry, TranslationNode, TranslationTable, TranslationValue,
};
