//! Search filter query-string codec
//!
//! Bidirectional mapping between a [`Condition`] and the single query-string
//! value the list views persist under their `filter` parameter. The encoding
//! is comma-delimited: pairs joined with `&`, list values joined with `,`,
//! no percent-encoding. An empty list is kept as a bare `id[]` token so it
//! survives a round trip instead of being dropped.
//!
//! Decoding is best-effort, never fails, and coerces values through the
//! matching [`ModelProperty`] descriptor; a value whose id has no descriptor
//! passes through unchanged.

use crate::model::{Condition, FilterValue, ModelProperty, PropertyKind};

/// A decoded query value before descriptor coercion: a value containing
/// commas becomes a list of strings, everything else stays a scalar string.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Scalar(String),
    List(Vec<String>),
}

/// Look up a property descriptor by id.
pub fn find_property<'a>(id: &str, properties: &'a [ModelProperty]) -> Option<&'a ModelProperty> {
    properties.iter().find(|p| p.id == id)
}

/// Serialize a condition into the comma-delimited filter string.
pub fn encode_condition(condition: &Condition) -> String {
    condition
        .iter()
        .map(|(id, value)| match value {
            FilterValue::List(items) if items.is_empty() => format!("{id}[]"),
            FilterValue::List(items) => {
                let joined = items.iter().map(encode_scalar).collect::<Vec<_>>().join(",");
                format!("{id}={joined}")
            }
            scalar => format!("{id}={}", encode_scalar(scalar)),
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_scalar(value: &FilterValue) -> String {
    match value {
        FilterValue::Bool(b) => b.to_string(),
        FilterValue::Number(n) => format_number(*n),
        FilterValue::String(s) => s.clone(),
        // Lists never nest; a list reaching here flattens to its items.
        FilterValue::List(items) => items.iter().map(encode_scalar).collect::<Vec<_>>().join(","),
    }
}

/// Numbers serialize as plain decimal strings, without a trailing `.0` for
/// integral values.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Split a filter string into `(id, raw value)` pairs.
pub fn parse_filter_string(raw: &str) -> Vec<(String, RawValue)> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((id, value)) if value.contains(',') => (
                id.to_string(),
                RawValue::List(value.split(',').map(str::to_string).collect()),
            ),
            Some((id, value)) => (id.to_string(), RawValue::Scalar(value.to_string())),
            // Bare `id[]` marks an empty list; any other bare token is an
            // empty scalar.
            None => match pair.strip_suffix("[]") {
                Some(id) => (id.to_string(), RawValue::List(Vec::new())),
                None => (pair.to_string(), RawValue::Scalar(String::new())),
            },
        })
        .collect()
}

/// Coerce a raw decoded value into the type its descriptor declares.
///
/// Without a descriptor the value passes through unchanged; with one, only
/// `Number` and `Bool` kinds convert, and unparseable input stays a string
/// rather than failing.
pub fn convert_value(raw: RawValue, property: Option<&ModelProperty>) -> FilterValue {
    match raw {
        RawValue::Scalar(s) => convert_scalar(s, property),
        RawValue::List(items) => FilterValue::List(
            items
                .into_iter()
                .map(|s| convert_scalar(s, property))
                .collect(),
        ),
    }
}

fn convert_scalar(value: String, property: Option<&ModelProperty>) -> FilterValue {
    let Some(property) = property else {
        return FilterValue::String(value);
    };
    match property.kind {
        PropertyKind::Number => value
            .parse::<f64>()
            .map(FilterValue::Number)
            .unwrap_or(FilterValue::String(value)),
        PropertyKind::Bool => match value.as_str() {
            "true" => FilterValue::Bool(true),
            "false" => FilterValue::Bool(false),
            _ => FilterValue::String(value),
        },
        _ => FilterValue::String(value),
    }
}

/// Decode a filter string into a condition, coercing each value through its
/// property descriptor.
pub fn decode_condition(raw: &str, properties: &[ModelProperty]) -> Condition {
    parse_filter_string(raw)
        .into_iter()
        .map(|(id, value)| {
            let property = find_property(&id, properties);
            let converted = convert_value(value, property);
            (id, converted)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyKind;

    fn properties() -> Vec<ModelProperty> {
        vec![
            ModelProperty::new("name", "Name", PropertyKind::String),
            ModelProperty::new("priority", "Priority", PropertyKind::Number),
            ModelProperty::new("disabled", "Disabled", PropertyKind::Bool),
            ModelProperty::new("zones", "Zones", PropertyKind::Array),
            ModelProperty::new("ports", "Ports", PropertyKind::Number),
        ]
    }

    fn condition(entries: &[(&str, FilterValue)]) -> Condition {
        entries
            .iter()
            .map(|(id, v)| (id.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn list_encodes_comma_delimited() {
        let cond = condition(&[("a", FilterValue::from(vec![1i64, 2, 3]))]);
        assert_eq!(encode_condition(&cond), "a=1,2,3");
    }

    #[test]
    fn scalars_and_lists_round_trip_with_coercion() {
        let cond = condition(&[
            ("disabled", FilterValue::Bool(false)),
            ("name", FilterValue::from("web-01")),
            ("ports", FilterValue::from(vec![80i64, 443])),
            ("priority", FilterValue::Number(1000.0)),
            ("zones", FilterValue::from(vec!["ap-1", "ap-2"])),
        ]);
        let encoded = encode_condition(&cond);
        assert_eq!(
            encoded,
            "disabled=false&name=web-01&ports=80,443&priority=1000&zones=ap-1,ap-2"
        );
        assert_eq!(decode_condition(&encoded, &properties()), cond);
    }

    #[test]
    fn empty_list_survives_round_trip() {
        let cond = condition(&[("zones", FilterValue::List(vec![]))]);
        let encoded = encode_condition(&cond);
        assert_eq!(encoded, "zones[]");
        let decoded = decode_condition(&encoded, &properties());
        assert_eq!(decoded.get("zones"), Some(&FilterValue::List(vec![])));
    }

    #[test]
    fn unknown_key_passes_through_unchanged() {
        let decoded = decode_condition("z=raw&w=1,2", &properties());
        assert_eq!(decoded.get("z"), Some(&FilterValue::String("raw".into())));
        assert_eq!(
            decoded.get("w"),
            Some(&FilterValue::List(vec!["1".into(), "2".into()]))
        );
    }

    #[test]
    fn unparseable_number_stays_a_string() {
        let decoded = decode_condition("priority=not-a-number", &properties());
        assert_eq!(
            decoded.get("priority"),
            Some(&FilterValue::String("not-a-number".into()))
        );
    }

    #[test]
    fn bool_coercion_is_permissive() {
        let decoded = decode_condition("disabled=true", &properties());
        assert_eq!(decoded.get("disabled"), Some(&FilterValue::Bool(true)));
        let decoded = decode_condition("disabled=yes", &properties());
        assert_eq!(decoded.get("disabled"), Some(&FilterValue::String("yes".into())));
    }

    #[test]
    fn numeric_lists_coerce_per_item() {
        let decoded = decode_condition("ports=80,oops,443", &properties());
        assert_eq!(
            decoded.get("ports"),
            Some(&FilterValue::List(vec![
                FilterValue::Number(80.0),
                FilterValue::String("oops".into()),
                FilterValue::Number(443.0),
            ]))
        );
    }

    #[test]
    fn empty_scalar_value_is_kept() {
        let decoded = decode_condition("name=", &properties());
        assert_eq!(decoded.get("name"), Some(&FilterValue::String(String::new())));
    }

    #[test]
    fn malformed_input_decodes_permissively() {
        // Dangling separators and bare tokens must not panic or drop the
        // rest of the string.
        let decoded = decode_condition("&&name=web&&stray&", &properties());
        assert_eq!(decoded.get("name"), Some(&FilterValue::String("web".into())));
        assert_eq!(decoded.get("stray"), Some(&FilterValue::String(String::new())));
    }

    #[test]
    fn find_property_is_an_explicit_lookup() {
        let props = properties();
        assert!(find_property("priority", &props).is_some());
        assert!(find_property("missing", &props).is_none());
    }

    #[test]
    fn number_formatting_drops_integral_fraction() {
        assert_eq!(format_number(443.0), "443");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(0.5), "0.5");
    }
}
