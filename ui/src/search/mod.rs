//! Query-string search filter synchronization
//!
//! [`SearchQs`] keeps a list view's filter condition in the URL under a
//! single query parameter (`filter` by default) so the state survives
//! navigation. Encoding and type coercion live in `nimbus_shared::search`;
//! this module computes a patch to the outer query string and applies it
//! through the router instead of mutating location state directly.

use std::rc::Rc;

use leptos::SignalGetUntracked;
use leptos_router::{use_location, use_navigate, Location, NavigateOptions, ParamsMap};
use nimbus_shared::model::{Condition, ModelProperty};
use nimbus_shared::search::{decode_condition, encode_condition};

/// Binds a filter condition to a named query-string parameter.
#[derive(Clone)]
pub struct SearchQs {
    location: Location,
    navigate: Rc<dyn Fn(&str, NavigateOptions)>,
    properties: Vec<ModelProperty>,
    key: String,
    force_update: bool,
}

/// Create the hook for a list view. Must be called during component setup,
/// inside a `<Router/>`.
pub fn use_search_qs(properties: Vec<ModelProperty>) -> SearchQs {
    let navigate: Rc<dyn Fn(&str, NavigateOptions)> = Rc::new(use_navigate());
    SearchQs {
        location: use_location(),
        navigate,
        properties,
        key: "filter".to_string(),
        force_update: true,
    }
}

impl SearchQs {
    /// Persist under a different query parameter name.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Replace the current history entry on writes instead of pushing a
    /// new one.
    pub fn replace_history(mut self) -> Self {
        self.force_update = false;
        self
    }

    /// Serialize `condition` and write it into the query parameter.
    pub fn set(&self, condition: &Condition) {
        self.write(Some(&encode_condition(condition)));
    }

    /// Decode the condition carried by `query`, coercing each value through
    /// this view's property descriptors. When the parameter is absent the
    /// result is a clone of `defaults`, untouched.
    pub fn get(&self, query: &ParamsMap, defaults: &Condition) -> Condition {
        condition_from_query(query, &self.key, &self.properties, defaults)
    }

    /// Remove the query parameter entirely.
    pub fn clear(&self) {
        self.write(None);
    }

    fn write(&self, value: Option<&str>) {
        let pathname = self.location.pathname.get_untracked();
        let search = self.location.search.get_untracked();
        let next = replace_query_param(&search, &self.key, value);
        let target = if next.is_empty() {
            pathname
        } else {
            format!("{pathname}?{next}")
        };
        (self.navigate)(
            &target,
            NavigateOptions {
                replace: !self.force_update,
                scroll: false,
                ..Default::default()
            },
        );
    }
}

/// Pure decode step behind [`SearchQs::get`].
pub fn condition_from_query(
    query: &ParamsMap,
    key: &str,
    properties: &[ModelProperty],
    defaults: &Condition,
) -> Condition {
    match query.get(key) {
        Some(raw) => decode_condition(raw, properties),
        None => defaults.clone(),
    }
}

/// Rewrite a raw search string (without the leading `?`), replacing or
/// removing one parameter while leaving every other pair byte-for-byte
/// intact. `None` removes the parameter.
pub(crate) fn replace_query_param(search: &str, key: &str, value: Option<&str>) -> String {
    let search = search.strip_prefix('?').unwrap_or(search);
    let mut pairs: Vec<String> = search
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let name = match pair.split_once('=') {
                Some((name, _)) => name,
                None => pair,
            };
            name != key
        })
        .map(str::to_string)
        .collect();
    if let Some(value) = value {
        pairs.push(format!("{key}={}", encode_component(value)));
    }
    pairs.join("&")
}

/// Escape only the characters that would corrupt the outer query string.
/// The comma encoding itself stays readable in the URL.
fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '#' => out.push_str("%23"),
            '=' => out.push_str("%3D"),
            '+' => out.push_str("%2B"),
            ' ' => out.push_str("%20"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_shared::model::{FilterValue, PropertyKind};

    fn properties() -> Vec<ModelProperty> {
        vec![
            ModelProperty::new("name", "Name", PropertyKind::String),
            ModelProperty::new("bandwidth", "Bandwidth", PropertyKind::Number),
        ]
    }

    fn defaults() -> Condition {
        let mut condition = Condition::new();
        condition.insert("name".to_string(), FilterValue::from(""));
        condition.insert("bandwidth".to_string(), FilterValue::Number(0.0));
        condition
    }

    #[test]
    fn absent_key_returns_defaults_clone() {
        let query = ParamsMap::new();
        let got = condition_from_query(&query, "filter", &properties(), &defaults());
        assert_eq!(got, defaults());
    }

    #[test]
    fn present_key_decodes_and_coerces() {
        let mut query = ParamsMap::new();
        query.insert("filter".to_string(), "bandwidth=512&name=web".to_string());
        let got = condition_from_query(&query, "filter", &properties(), &defaults());
        assert_eq!(got.get("bandwidth"), Some(&FilterValue::Number(512.0)));
        assert_eq!(got.get("name"), Some(&FilterValue::String("web".into())));
        // Defaults are not merged in once the parameter exists.
        assert_eq!(got.len(), 2);
    }

    #[test]
    fn clearing_then_reading_yields_defaults() {
        let cleared = replace_query_param("filter=name%3Dweb&page=2", "filter", None);
        assert_eq!(cleared, "page=2");
        let query = ParamsMap::new();
        let got = condition_from_query(&query, "filter", &properties(), &defaults());
        assert_eq!(got, defaults());
    }

    #[test]
    fn replace_keeps_other_pairs_untouched() {
        let next = replace_query_param("page=2&sort=name&filter=old", "filter", Some("a=1,2,3"));
        assert_eq!(next, "page=2&sort=name&filter=a%3D1,2,3");
    }

    #[test]
    fn replace_appends_when_key_missing() {
        assert_eq!(
            replace_query_param("", "filter", Some("zones[]")),
            "filter=zones[]"
        );
        assert_eq!(
            replace_query_param("?page=1", "filter", Some("x=y")),
            "page=1&filter=x%3Dy"
        );
    }

    #[test]
    fn component_escaping_covers_reserved_characters() {
        assert_eq!(encode_component("a=1&b=2"), "a%3D1%26b%3D2");
        assert_eq!(encode_component("100% + x #1"), "100%25%20%2B%20x%20%231");
        // Commas survive untouched so the encoding stays readable.
        assert_eq!(encode_component("a=1,2,3"), "a%3D1,2,3");
    }

    #[test]
    fn set_then_get_round_trip_at_the_query_level() {
        let mut condition = Condition::new();
        condition.insert("name".to_string(), FilterValue::from("web"));
        condition.insert("bandwidth".to_string(), FilterValue::Number(256.0));
        let encoded = nimbus_shared::search::encode_condition(&condition);

        // What SearchQs::set writes into the parameter, as the router would
        // hand it back (percent-decoded).
        let mut query = ParamsMap::new();
        query.insert("filter".to_string(), encoded);
        let got = condition_from_query(&query, "filter", &properties(), &Condition::new());
        assert_eq!(got, condition);
    }
}
