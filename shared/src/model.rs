//! Filter and property model
//!
//! List views describe their filterable fields with [`ModelProperty`]
//! descriptors. The decoded filter state is a [`Condition`]: property id
//! mapped to a scalar or list [`FilterValue`]. Descriptors carry the value
//! kind so the query-string codec can coerce raw strings back into their
//! intended types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value kind a filterable property carries.
///
/// Only `Number` and `Bool` trigger coercion when decoding a query string;
/// every other kind passes the raw string through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyKind {
    String,
    Number,
    Bool,
    Datetime,
    Enum,
    Array,
    Vendor,
    Region,
    Account,
}

/// Metadata describing a filterable field: id, display label, value kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProperty {
    pub id: String,
    pub name: String,
    pub kind: PropertyKind,
}

impl ModelProperty {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}

/// A decoded filter value: scalar string/number/bool or an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// String slice if this is a scalar string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// List items if this is a list value.
    pub fn as_list(&self) -> Option<&[FilterValue]> {
        match self {
            FilterValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Empty string or empty list. Used by views to skip inactive filters.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::String(s) => s.is_empty(),
            FilterValue::List(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::String(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value as f64)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Filter state keyed by property id.
///
/// Ordered map so the encoded query string is deterministic.
pub type Condition = BTreeMap<String, FilterValue>;

/// Cloud vendors the console manages resources for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Tcloud,
    Aws,
    Azure,
    Gcp,
    Huawei,
}

impl Vendor {
    pub const ALL: [Vendor; 5] = [
        Vendor::Tcloud,
        Vendor::Aws,
        Vendor::Azure,
        Vendor::Gcp,
        Vendor::Huawei,
    ];

    /// Wire value, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Tcloud => "tcloud",
            Vendor::Aws => "aws",
            Vendor::Azure => "azure",
            Vendor::Gcp => "gcp",
            Vendor::Huawei => "huawei",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Vendor::Tcloud => "Tencent Cloud",
            Vendor::Aws => "AWS",
            Vendor::Azure => "Microsoft Azure",
            Vendor::Gcp => "Google Cloud",
            Vendor::Huawei => "Huawei Cloud",
        }
    }

    pub fn parse(value: &str) -> Option<Vendor> {
        Vendor::ALL.iter().copied().find(|v| v.as_str() == value)
    }
}

/// Descriptors for the load balancer list view.
pub fn load_balancer_properties() -> Vec<ModelProperty> {
    vec![
        ModelProperty::new("name", "Name", PropertyKind::String),
        ModelProperty::new("vendor", "Vendor", PropertyKind::Vendor),
        ModelProperty::new("region", "Region", PropertyKind::Region),
        ModelProperty::new("zones", "Zones", PropertyKind::Array),
        ModelProperty::new("net_type", "Network Type", PropertyKind::Enum),
        ModelProperty::new("ip_version", "IP Version", PropertyKind::Enum),
        ModelProperty::new("bandwidth", "Bandwidth (Mbps)", PropertyKind::Number),
        ModelProperty::new("created_at", "Created At", PropertyKind::Datetime),
    ]
}

/// Descriptors for the firewall rule list view.
pub fn firewall_rule_properties() -> Vec<ModelProperty> {
    vec![
        ModelProperty::new("name", "Name", PropertyKind::String),
        ModelProperty::new("priority", "Priority", PropertyKind::Number),
        ModelProperty::new("direction", "Direction", PropertyKind::Enum),
        ModelProperty::new("vpc_id", "VPC", PropertyKind::String),
        ModelProperty::new("disabled", "Disabled", PropertyKind::Bool),
        ModelProperty::new("target_tags", "Target Tags", PropertyKind::Array),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_value_conversions() {
        assert_eq!(FilterValue::from("web"), FilterValue::String("web".into()));
        assert_eq!(FilterValue::from(443i64), FilterValue::Number(443.0));
        assert_eq!(FilterValue::from(true), FilterValue::Bool(true));
        assert_eq!(
            FilterValue::from(vec!["a", "b"]),
            FilterValue::List(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn filter_value_emptiness() {
        assert!(FilterValue::String(String::new()).is_empty());
        assert!(FilterValue::List(vec![]).is_empty());
        assert!(!FilterValue::Number(0.0).is_empty());
        assert!(!FilterValue::Bool(false).is_empty());
    }

    #[test]
    fn vendor_round_trips_through_wire_value() {
        for vendor in Vendor::ALL {
            assert_eq!(Vendor::parse(vendor.as_str()), Some(vendor));
        }
        assert_eq!(Vendor::parse("alibaba"), None);
    }

    #[test]
    fn filter_value_untagged_serde() {
        let value: FilterValue = serde_json::from_str(r#"["ap-1", 2, true]"#).unwrap();
        assert_eq!(
            value,
            FilterValue::List(vec![
                FilterValue::String("ap-1".into()),
                FilterValue::Number(2.0),
                FilterValue::Bool(true),
            ])
        );
    }
}
