//! Typed tool arguments
//!
//! Incoming `arguments` are untyped JSON. Before a handler sees them they are
//! checked against the tool's declared parameters and converted into
//! [`ArgValue`]s, so handlers never inspect raw JSON.

use super::registry::{ParamKind, ParamSpec};
use serde_json::Value;
use std::collections::BTreeMap;

/// Diagnostic returned to the caller for any argument problem
pub const INVALID_ARGUMENTS: &str = "Invalid arguments format";

/// A validated argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// Why a set of arguments was rejected. Only used for logging; callers always
/// see [`INVALID_ARGUMENTS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    NotAnObject,
    Missing(String),
    WrongType { name: String, expected: ParamKind },
}

impl std::fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgumentError::NotAnObject => write!(f, "arguments are not an object"),
            ArgumentError::Missing(name) => write!(f, "missing required argument '{}'", name),
            ArgumentError::WrongType { name, expected } => {
                write!(f, "argument '{}' is not a {}", name, expected.json_type())
            }
        }
    }
}

impl std::error::Error for ArgumentError {}

/// Arguments after validation against a tool's parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs {
    values: BTreeMap<String, ArgValue>,
}

impl ToolArgs {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// String argument by name. Required string parameters are always present.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ArgValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Validate `arguments` against `params` and extract the declared values.
///
/// `null` is treated as an empty object. Keys that are not declared are
/// ignored. A declared key holding JSON `null` counts as absent.
pub fn extract_arguments(params: &[ParamSpec], arguments: &Value) -> Result<ToolArgs, ArgumentError> {
    let empty = serde_json::Map::new();
    let map = match arguments {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => return Err(ArgumentError::NotAnObject),
    };

    let mut values = BTreeMap::new();
    for param in params {
        match map.get(&param.name) {
            None | Some(Value::Null) => {
                if param.required {
                    return Err(ArgumentError::Missing(param.name.clone()));
                }
            }
            Some(raw) => {
                let value = convert(param.kind, raw).ok_or_else(|| ArgumentError::WrongType {
                    name: param.name.clone(),
                    expected: param.kind,
                })?;
                values.insert(param.name.clone(), value);
            }
        }
    }

    Ok(ToolArgs { values })
}

fn convert(kind: ParamKind, raw: &Value) -> Option<ArgValue> {
    match kind {
        ParamKind::String => raw.as_str().map(|s| ArgValue::String(s.to_string())),
        ParamKind::Number => raw.as_f64().map(ArgValue::Number),
        ParamKind::Boolean => raw.as_bool().map(ArgValue::Boolean),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params() -> Vec<ParamSpec> {
        vec![
            ParamSpec::string("content", "content to show").required(),
            ParamSpec::boolean("preview", "open as preview"),
        ]
    }

    #[test]
    fn test_extract_valid() {
        let args = extract_arguments(&params(), &json!({"content": "hello", "preview": true})).unwrap();
        assert_eq!(args.str("content"), Some("hello"));
        assert_eq!(args.get("preview").and_then(ArgValue::as_bool), Some(true));
    }

    #[test]
    fn test_extract_number() {
        let params = vec![ParamSpec::number("line", "line to reveal").required()];
        let args = extract_arguments(&params, &json!({"line": 42})).unwrap();
        assert_eq!(args.get("line").and_then(ArgValue::as_f64), Some(42.0));
        assert_eq!(args.str("line"), None);

        let err = extract_arguments(&params, &json!({"line": "42"})).unwrap_err();
        assert!(matches!(err, ArgumentError::WrongType { expected: ParamKind::Number, .. }));
    }

    #[test]
    fn test_extract_ignores_undeclared() {
        let args = extract_arguments(&params(), &json!({"content": "x", "other": 1})).unwrap();
        assert_eq!(args.len(), 1);
        assert!(args.get("other").is_none());
    }

    #[test]
    fn test_extract_missing_required() {
        let err = extract_arguments(&params(), &json!({"preview": false})).unwrap_err();
        assert_eq!(err, ArgumentError::Missing("content".to_string()));
    }

    #[test]
    fn test_extract_null_arguments() {
        let err = extract_arguments(&params(), &Value::Null).unwrap_err();
        assert_eq!(err, ArgumentError::Missing("content".to_string()));

        // No required params, so null is fine
        let args = extract_arguments(&[], &Value::Null).unwrap();
        assert!(args.is_empty());
    }

    #[test]
    fn test_extract_not_an_object() {
        for bad in [json!("content"), json!(["content", "x"]), json!(42)] {
            assert_eq!(
                extract_arguments(&params(), &bad).unwrap_err(),
                ArgumentError::NotAnObject
            );
        }
    }

    #[test]
    fn test_extract_wrong_type() {
        let err = extract_arguments(&params(), &json!({"content": 5})).unwrap_err();
        assert!(matches!(err, ArgumentError::WrongType { ref name, .. } if name == "content"));

        // Optional parameters are type-checked too
        let err = extract_arguments(&params(), &json!({"content": "x", "preview": "yes"})).unwrap_err();
        assert!(matches!(err, ArgumentError::WrongType { ref name, .. } if name == "preview"));
    }
}
