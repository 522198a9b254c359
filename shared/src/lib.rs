//! Shared types for the Nimbus cloud console.
//!
//! This crate holds everything the UI needs that is independent of the
//! browser: the filter/property model, the cloud resource records exchanged
//! with the console API, and the search query-string codec that persists
//! list-view filter state in the URL.

pub mod cloud;
pub mod model;
pub mod search;

pub use cloud::{
    validate_rule_name, Eip, FirewallRule, InstanceChargeType, IpVersion, ListResult,
    LoadBalancer, LoadBalancerApplication, NetworkChargeType, NetworkType, ProtocolPorts,
    PurchaseUnit, RuleAction, RuleDirection, RuleNameError, SourceKind, SpecOption, TargetKind,
    ZoneType,
};
pub use model::{
    firewall_rule_properties, load_balancer_properties, Condition, FilterValue, ModelProperty,
    PropertyKind, Vendor,
};
pub use search::{decode_condition, encode_condition, find_property};
