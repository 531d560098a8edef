//! Key-style conversion between CamelCase and snake_case for JSON trees.
//!
//! Azure Resource Manager responses arrive with CamelCase (or dromedaryCase)
//! keys. Facts are exposed to users with snake_case keys, and user-supplied
//! parameters travel the other way before they are sent to the API.
//!
//! Two camel → snake encodings are available:
//!
//! - **Default**: heuristic word splitting. `HTTPEndpoint` becomes
//!   `http_endpoint` and the pluralized acronym in `TargetGroupARNs` becomes
//!   `target_group_arns`.
//! - **Reversible**: every uppercase letter is mapped on its own, so
//!   `HTTPEndpoint` becomes `h_t_t_p_endpoint` and converts back to
//!   `HTTPEndpoint` with [`snake_to_camel`] and `capitalize_first = true`.
//!
//! # Example
//!
//! ```
//! use azfacts::keys::{camel_dict_to_snake_dict, snake_dict_to_camel_dict};
//! use serde_json::json;
//!
//! let response = json!({"Name": "rg1", "Tags": {"Owner": "X"}});
//! let facts = camel_dict_to_snake_dict(&response, false, &["Tags"]);
//! assert_eq!(facts, json!({"name": "rg1", "tags": {"Owner": "X"}}));
//!
//! let params = snake_dict_to_camel_dict(&json!({"target_group_arns": 1}), true);
//! assert_eq!(params, json!({"TargetGroupArns": 1}));
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

// Pluralized acronyms such as `TargetGroupARNs`, which would otherwise come
// out as `target_group_ar_ns`. Anchored at the end of the key only.
static PLURAL_ACRONYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]{3,}s$").unwrap());

static UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());

static FIRST_CAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.)([A-Z][a-z]+)").unwrap());

static ALL_CAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z]+)").unwrap());

/// Converts a single CamelCase key to snake_case.
///
/// With `reversible` set, each uppercase letter is encoded independently as
/// `_` plus its lowercase form, which [`snake_to_camel`] can undo. A leading
/// underscore introduced by the encoding (the key started with an uppercase
/// letter) is dropped; one already present in `name` is kept.
///
/// ```
/// use azfacts::keys::camel_to_snake;
///
/// assert_eq!(camel_to_snake("HTTPEndpoint", false), "http_endpoint");
/// assert_eq!(camel_to_snake("HTTPEndpoint", true), "h_t_t_p_endpoint");
/// assert_eq!(camel_to_snake("TargetGroupARNs", false), "target_group_arns");
/// ```
pub fn camel_to_snake(name: &str, reversible: bool) -> String {
    let pattern = if reversible { &*UPPER } else { &*PLURAL_ACRONYM };

    let encoded = pattern.replace_all(name, |caps: &Captures<'_>| {
        format!("_{}", caps[0].to_lowercase())
    });

    let encoded = if encoded.starts_with('_') && !name.starts_with('_') {
        encoded[1..].to_string()
    } else {
        encoded.into_owned()
    };

    if reversible {
        return encoded;
    }

    let split = FIRST_CAP.replace_all(&encoded, "${1}_${2}");
    ALL_CAP.replace_all(&split, "${1}_${2}").to_lowercase()
}

/// Converts a single snake_case key to camelCase.
///
/// The key is split on `_`. A non-empty segment is capitalized by
/// uppercasing its first character only; an empty segment (from a leading,
/// trailing or doubled underscore) turns into a literal `_` so nothing is
/// lost. When `capitalize_first` is false a non-empty first segment is kept
/// as-is.
///
/// ```
/// use azfacts::keys::snake_to_camel;
///
/// assert_eq!(snake_to_camel("target_group_arns", false), "targetGroupArns");
/// assert_eq!(snake_to_camel("target_group_arns", true), "TargetGroupArns");
/// assert_eq!(snake_to_camel("h_t_t_p_endpoint", true), "HTTPEndpoint");
/// ```
pub fn snake_to_camel(name: &str, capitalize_first: bool) -> String {
    let mut segments = name.split('_');
    let mut camel = String::with_capacity(name.len());

    if !capitalize_first {
        match segments.next() {
            Some("") => camel.push('_'),
            Some(first) => camel.push_str(first),
            None => {}
        }
    }

    for segment in segments {
        capitalize_into(segment, &mut camel);
    }

    camel
}

fn capitalize_into(segment: &str, out: &mut String) {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
        None => out.push('_'),
    }
}

/// Rewrites every mapping key in `tree` from CamelCase to snake_case.
///
/// Sequences are converted element by element and keep their order and
/// length; scalars are returned unchanged. For a key listed in
/// `ignore_keys`, the key itself is still renamed but its value is copied
/// verbatim, so free-form maps such as resource tags keep their keys. The
/// ignore list is honored in every mapping the recursion reaches, not only
/// in the top-level one, so `Properties.Tags` is protected as well as `Tags`.
///
/// The result is a new tree; `tree` is only read.
pub fn camel_dict_to_snake_dict(tree: &Value, reversible: bool, ignore_keys: &[&str]) -> Value {
    match tree {
        Value::Object(map) => {
            let converted: Map<String, Value> = map
                .iter()
                .map(|(key, value)| {
                    let value = if ignore_keys.contains(&key.as_str()) {
                        value.clone()
                    } else {
                        camel_dict_to_snake_dict(value, reversible, ignore_keys)
                    };
                    (camel_to_snake(key, reversible), value)
                })
                .collect();
            Value::Object(converted)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| camel_dict_to_snake_dict(item, reversible, ignore_keys))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

/// Rewrites every mapping key in `tree` from snake_case to camelCase.
///
/// Unlike [`camel_dict_to_snake_dict`] there is no ignore list: every key at
/// every depth is converted. Callers that need to protect a subtree must
/// detach it before converting and put it back afterwards.
pub fn snake_dict_to_camel_dict(tree: &Value, capitalize_first: bool) -> Value {
    match tree {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    (
                        snake_to_camel(key, capitalize_first),
                        snake_dict_to_camel_dict(value, capitalize_first),
                    )
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| snake_dict_to_camel_dict(item, capitalize_first))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_to_snake_default() {
        assert_eq!(camel_to_snake("HTTPEndpoint", false), "http_endpoint");
        assert_eq!(camel_to_snake("ResourceGroupName", false), "resource_group_name");
        assert_eq!(camel_to_snake("provisioningState", false), "provisioning_state");
        assert_eq!(camel_to_snake("vmSize", false), "vm_size");
        assert_eq!(camel_to_snake("IPv6Address", false), "i_pv6_address");
        assert_eq!(camel_to_snake("Ipv4", false), "ipv4");
        assert_eq!(camel_to_snake("name", false), "name");
    }

    #[test]
    fn test_camel_to_snake_plural_acronym() {
        assert_eq!(camel_to_snake("TargetGroupARNs", false), "target_group_arns");
        assert_eq!(camel_to_snake("ARNs", false), "arns");
        // only a trailing run is collapsed
        assert_eq!(camel_to_snake("ARNsList", false), "ar_ns_list");
        assert_eq!(camel_to_snake("IDs", false), "i_ds");
    }

    #[test]
    fn test_camel_to_snake_reversible() {
        assert_eq!(camel_to_snake("HTTPEndpoint", true), "h_t_t_p_endpoint");
        assert_eq!(camel_to_snake("TargetGroupARNs", true), "target_group_a_r_ns");
        assert_eq!(camel_to_snake("vmSize", true), "vm_size");
    }

    #[test]
    fn test_camel_to_snake_leading_underscore() {
        assert_eq!(camel_to_snake("_Private", true), "__private");
        // an original leading underscore does not survive a round trip
        assert_eq!(snake_to_camel(&camel_to_snake("_Private", true), true), "__Private");
        assert_eq!(camel_to_snake("_etag", false), "_etag");
        assert_eq!(camel_to_snake("", false), "");
    }

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("target_group_arns", false), "targetGroupArns");
        assert_eq!(snake_to_camel("target_group_arns", true), "TargetGroupArns");
        assert_eq!(snake_to_camel("name", false), "name");
        assert_eq!(snake_to_camel("name", true), "Name");
    }

    #[test]
    fn test_snake_to_camel_empty_segments() {
        assert_eq!(snake_to_camel("a__b", true), "A_B");
        assert_eq!(snake_to_camel("_private", false), "_Private");
        assert_eq!(snake_to_camel("trailing_", true), "Trailing_");
        assert_eq!(snake_to_camel("", true), "_");
        assert_eq!(snake_to_camel("", false), "_");
    }

    #[test]
    fn test_reversible_round_trip() {
        for key in ["HTTPEndpoint", "TargetGroupARNs", "VPCId", "Name", "DNSSettings"] {
            let snake = camel_to_snake(key, true);
            assert_eq!(snake_to_camel(&snake, true), key, "via {snake}");
        }
    }

    #[test]
    fn test_dict_scenarios() {
        assert_eq!(
            camel_dict_to_snake_dict(&json!({"HTTPEndpoint": 1}), false, &[]),
            json!({"http_endpoint": 1})
        );
        assert_eq!(
            camel_dict_to_snake_dict(&json!({"HTTPEndpoint": 1}), true, &[]),
            json!({"h_t_t_p_endpoint": 1})
        );
        assert_eq!(
            camel_dict_to_snake_dict(&json!({"TargetGroupARNs": ["a"]}), false, &[]),
            json!({"target_group_arns": ["a"]})
        );
        assert_eq!(
            snake_dict_to_camel_dict(&json!({"target_group_arns": 1}), false),
            json!({"targetGroupArns": 1})
        );
        assert_eq!(
            snake_dict_to_camel_dict(&json!({"target_group_arns": 1}), true),
            json!({"TargetGroupArns": 1})
        );
    }

    #[test]
    fn test_ignore_keys() {
        let input = json!({"Tags": {"Owner": "X"}});
        assert_eq!(
            camel_dict_to_snake_dict(&input, false, &["Tags"]),
            json!({"tags": {"Owner": "X"}})
        );
        assert_eq!(
            camel_dict_to_snake_dict(&input, false, &[]),
            json!({"tags": {"owner": "X"}})
        );
    }

    #[test]
    fn test_ignore_keys_in_nested_mappings() {
        let input = json!({
            "Value": [
                {"Name": "vm1", "Tags": {"CostCenter": "42"}},
                {"Name": "vm2", "Properties": {"Tags": {"OwnerTeam": "Ops"}}}
            ]
        });
        let expected = json!({
            "value": [
                {"name": "vm1", "tags": {"CostCenter": "42"}},
                {"name": "vm2", "properties": {"tags": {"OwnerTeam": "Ops"}}}
            ]
        });
        assert_eq!(camel_dict_to_snake_dict(&input, false, &["Tags"]), expected);
    }

    #[test]
    fn test_empty_containers_and_scalars() {
        assert_eq!(camel_dict_to_snake_dict(&json!({}), false, &[]), json!({}));
        assert_eq!(camel_dict_to_snake_dict(&json!([]), true, &[]), json!([]));
        assert_eq!(snake_dict_to_camel_dict(&json!({}), false), json!({}));
        assert_eq!(snake_dict_to_camel_dict(&json!([]), true), json!([]));
        assert_eq!(camel_dict_to_snake_dict(&Value::Null, false, &[]), Value::Null);
        assert_eq!(snake_dict_to_camel_dict(&json!("SomeText"), true), json!("SomeText"));
        assert_eq!(
            camel_dict_to_snake_dict(&json!({"OsDisk": null}), false, &[]),
            json!({"os_disk": null})
        );
    }

    #[test]
    fn test_nested_sequences_keep_order() {
        let input = json!({"DataDisks": [[{"Lun": 0}, {"Lun": 1}], [], 3, "x", null]});
        let snake = camel_dict_to_snake_dict(&input, false, &[]);
        assert_eq!(
            snake,
            json!({"data_disks": [[{"lun": 0}, {"lun": 1}], [], 3, "x", null]})
        );
        assert_eq!(
            snake_dict_to_camel_dict(&snake, true),
            json!({"DataDisks": [[{"Lun": 0}, {"Lun": 1}], [], 3, "x", null]})
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let input = json!({"Properties": {"HardwareProfile": {"VmSize": "Standard_B1s"}}});
        let before = input.clone();
        let mut output = camel_dict_to_snake_dict(&input, false, &[]);
        output["properties"]["hardware_profile"]["vm_size"] = json!("changed");
        assert_eq!(input, before);
    }
}
