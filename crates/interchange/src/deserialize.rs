//! Deserialization from export JSON into typed structs.
//!
//! The main entry point is [`from_export`], which takes a
//! `&serde_json::Value` and produces a [`VariablesExport`].

use crate::types::*;
use serde_json::Value;
use std::collections::BTreeMap;

/// JSON `type` tag marking an alias record.
pub const ALIAS_TYPE: &str = "VARIABLE_ALIAS";

/// Errors during export deserialization.
///
/// Only the top-level shape is checked strictly. Everything below it is
/// read permissively.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterchangeError {
    /// The document root is not a JSON object.
    #[error("export document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
    /// A top-level field has the wrong JSON type.
    #[error("field '{field}' must be {expected}, found {found}")]
    InvalidField {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Deserialize an export document into typed structs.
///
/// A missing `collections` field is treated as an empty list. Collection
/// entries that are not objects and variables without an `id` are skipped.
pub fn from_export(doc: &Value) -> Result<VariablesExport, InterchangeError> {
    let root = doc.as_object().ok_or(InterchangeError::NotAnObject {
        found: json_kind(doc),
    })?;

    let collections_arr = match root.get("collections") {
        None | Some(Value::Null) => {
            tracing::warn!("export has no 'collections' field; treating it as empty");
            return Ok(VariablesExport::default());
        }
        Some(Value::Array(arr)) => arr,
        Some(other) => {
            return Err(InterchangeError::InvalidField {
                field: "collections".to_string(),
                expected: "an array",
                found: json_kind(other),
            })
        }
    };

    let collections = collections_arr
        .iter()
        .enumerate()
        .filter_map(|(i, obj)| {
            if !obj.is_object() {
                tracing::warn!(index = i, "skipping collection entry that is not an object");
                return None;
            }
            Some(parse_collection(obj))
        })
        .collect();

    Ok(VariablesExport { collections })
}

// ── Parsing helpers ─────────────────────────────────────────────────

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn opt_str(obj: &Value, field: &str) -> Option<String> {
    obj.get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn parse_collection(obj: &Value) -> Collection {
    let name = opt_str(obj, "name").unwrap_or_default();

    let modes = obj
        .get("modes")
        .and_then(|m| m.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|m| {
                    let mode_id = m.get("modeId")?.as_str()?.to_string();
                    let name = m.get("name")?.as_str()?.to_string();
                    Some(Mode { mode_id, name })
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let default_mode_id = opt_str(obj, "defaultModeId");

    let variables = obj
        .get("variables")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| parse_variable(&name, v))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    Collection {
        name,
        modes,
        default_mode_id,
        variables,
    }
}

fn parse_variable(collection: &str, obj: &Value) -> Option<Variable> {
    let Some(id) = opt_str(obj, "id") else {
        tracing::warn!(collection, "skipping variable without an 'id'");
        return None;
    };
    let name = opt_str(obj, "name").unwrap_or_default();
    let resolved_type = VariableType::parse(
        obj.get("resolvedType")
            .and_then(|v| v.as_str())
            .unwrap_or(""),
    );

    let values_by_mode = obj
        .get("valuesByMode")
        .and_then(|v| v.as_object())
        .map(|map| {
            map.iter()
                .filter(|(_, raw)| !raw.is_null())
                .map(|(mode_id, raw)| (mode_id.clone(), parse_raw_value(raw)))
                .collect::<BTreeMap<_, _>>()
        })
        .unwrap_or_default();

    Some(Variable {
        id,
        name,
        resolved_type,
        values_by_mode,
    })
}

/// Classify a raw per-mode value.
///
/// Alias records are recognized by their `type` tag before color records,
/// so an alias carrying stray `r`/`g`/`b` keys is still an alias.
pub fn parse_raw_value(raw: &Value) -> RawValue {
    match raw {
        Value::Bool(b) => RawValue::Scalar(Scalar::Bool(*b)),
        Value::Number(n) => RawValue::Scalar(Scalar::Number(n.clone())),
        Value::String(s) => RawValue::Scalar(Scalar::String(s.clone())),
        Value::Object(map) => {
            if map.get("type").and_then(|t| t.as_str()) == Some(ALIAS_TYPE) {
                let id = map
                    .get("id")
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string());
                return RawValue::Alias { id };
            }
            if map.contains_key("r") && map.contains_key("g") && map.contains_key("b") {
                return match parse_rgba(raw) {
                    Some(c) => RawValue::Color(c),
                    None => RawValue::Unsupported(raw.clone()),
                };
            }
            RawValue::Unsupported(raw.clone())
        }
        Value::Null | Value::Array(_) => RawValue::Unsupported(raw.clone()),
    }
}

fn parse_rgba(obj: &Value) -> Option<Rgba> {
    let r = obj.get("r")?.as_f64()?;
    let g = obj.get("g")?.as_f64()?;
    let b = obj.get("b")?.as_f64()?;
    let a = match obj.get("a") {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.as_f64()?),
    };
    Some(Rgba { r, g, b, a })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_collections_is_empty() {
        let doc = from_export(&json!({})).unwrap();
        assert!(doc.collections.is_empty());
    }

    #[test]
    fn test_root_must_be_object() {
        match from_export(&json!([1, 2])).unwrap_err() {
            InterchangeError::NotAnObject { found } => assert_eq!(found, "an array"),
            other => panic!("expected NotAnObject, got {:?}", other),
        }
    }

    #[test]
    fn test_collections_must_be_array() {
        let err = from_export(&json!({"collections": "nope"})).unwrap_err();
        assert_eq!(
            err,
            InterchangeError::InvalidField {
                field: "collections".to_string(),
                expected: "an array",
                found: "a string",
            }
        );
        assert_eq!(
            err.to_string(),
            "field 'collections' must be an array, found a string"
        );
    }

    #[test]
    fn test_parse_collection_with_modes_and_variables() {
        let doc = from_export(&json!({
            "collections": [{
                "name": "ColorMode",
                "defaultModeId": "2:1",
                "modes": [
                    {"modeId": "1:0", "name": "Light"},
                    {"modeId": "2:1", "name": "Dark"}
                ],
                "variables": [{
                    "id": "VariableID:1",
                    "name": "Surface/Primary",
                    "resolvedType": "COLOR",
                    "valuesByMode": {
                        "1:0": {"r": 1, "g": 1, "b": 1, "a": 1},
                        "2:1": {"type": "VARIABLE_ALIAS", "id": "VariableID:9"}
                    }
                }]
            }]
        }))
        .unwrap();

        let col = &doc.collections[0];
        assert_eq!(col.name, "ColorMode");
        assert_eq!(col.modes.len(), 2);
        assert_eq!(col.default_mode().unwrap().name, "Dark");

        let var = &col.variables[0];
        assert_eq!(var.resolved_type, VariableType::Color);
        assert_eq!(
            var.value_for("1:0"),
            Some(&RawValue::Color(Rgba {
                r: 1.0,
                g: 1.0,
                b: 1.0,
                a: Some(1.0)
            }))
        );
        assert_eq!(
            var.value_for("2:1"),
            Some(&RawValue::Alias {
                id: Some("VariableID:9".to_string())
            })
        );
    }

    #[test]
    fn test_default_mode_falls_back_to_first() {
        let col = Collection {
            name: "_SpacePrimitive".into(),
            modes: vec![Mode {
                mode_id: "m1".into(),
                name: "Value".into(),
            }],
            default_mode_id: Some("missing".into()),
            variables: vec![],
        };
        assert_eq!(col.default_mode().unwrap().mode_id, "m1");
    }

    #[test]
    fn test_variable_without_id_is_skipped() {
        let doc = from_export(&json!({
            "collections": [{
                "name": "Density",
                "variables": [
                    {"name": "no-id", "resolvedType": "FLOAT", "valuesByMode": {}},
                    {"id": "v2", "name": "ok", "resolvedType": "FLOAT", "valuesByMode": {}}
                ]
            }]
        }))
        .unwrap();
        let vars = &doc.collections[0].variables;
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].id, "v2");
    }

    #[test]
    fn test_null_values_are_not_stored() {
        let doc = from_export(&json!({
            "collections": [{
                "name": "Density",
                "variables": [{
                    "id": "v", "name": "gap", "resolvedType": "FLOAT",
                    "valuesByMode": {"m1": null, "m2": 8}
                }]
            }]
        }))
        .unwrap();
        let var = &doc.collections[0].variables[0];
        assert!(var.value_for("m1").is_none());
        assert!(var.value_for("m2").is_some());
    }

    #[test]
    fn test_raw_value_classification() {
        assert_eq!(
            parse_raw_value(&json!(true)),
            RawValue::Scalar(Scalar::Bool(true))
        );
        assert_eq!(
            parse_raw_value(&json!("Inter")),
            RawValue::Scalar(Scalar::String("Inter".into()))
        );
        assert_eq!(
            parse_raw_value(&json!({"type": "VARIABLE_ALIAS"})),
            RawValue::Alias { id: None }
        );
        assert!(matches!(
            parse_raw_value(&json!({"r": "x", "g": 0, "b": 0})),
            RawValue::Unsupported(_)
        ));
        assert!(matches!(
            parse_raw_value(&json!({"foo": 1})),
            RawValue::Unsupported(_)
        ));
        assert_eq!(
            parse_raw_value(&json!({"r": 0, "g": 0.5, "b": 1})),
            RawValue::Color(Rgba {
                r: 0.0,
                g: 0.5,
                b: 1.0,
                a: None
            })
        );
    }

    #[test]
    fn test_unknown_resolved_type_is_kept() {
        assert_eq!(
            VariableType::parse("GRADIENT"),
            VariableType::Other("GRADIENT".to_string())
        );
        assert_eq!(VariableType::parse("GRADIENT").to_string(), "GRADIENT");
    }
}
