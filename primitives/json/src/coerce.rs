//! Conversion of loosely-typed arguments into declared semantic types.

use descriptor::{ParamDef, ParamType};
use serde_json::{Number, Value};

/// Convert `value` into the JSON shape declared by `param`.
///
/// Returns the reason on failure; the caller attaches method and parameter
/// names.
pub(crate) fn coerce(param: &ParamDef, value: Value) -> Result<Value, String> {
    if value.is_null() {
        return if param.required {
            Err("null is not allowed for a required parameter".to_string())
        } else {
            Ok(Value::Null)
        };
    }

    match param.param_type {
        ParamType::String => match value {
            Value::String(_) => Ok(value),
            other => Err(format!("expected a string, got {}", other)),
        },
        ParamType::Integer => to_integer(value),
        ParamType::Float => to_float(value),
        ParamType::Bool => to_bool(value),
        ParamType::Array => to_shape(value, ParamType::Array),
        ParamType::Map | ParamType::Object => to_shape(value, param.param_type),
    }
}

fn to_integer(value: Value) -> Result<Value, String> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(Value::Number(n)),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
                Ok(Value::from(f as i64))
            }
            _ => Err(format!("{} is not an integer", n)),
        },
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                Ok(Value::from(i))
            } else if let Ok(u) = trimmed.parse::<u64>() {
                Ok(Value::from(u))
            } else {
                Err(format!("'{}' is not an integer", s))
            }
        }
        other => Err(format!("expected an integer, got {}", other)),
    }
}

fn to_float(value: Value) -> Result<Value, String> {
    let f = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    f.and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| format!("{} is not a finite number", value))
}

fn to_bool(value: Value) -> Result<Value, String> {
    match value {
        Value::Bool(_) => Ok(value),
        Value::String(s) => match s.as_str() {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(Value::Bool(true)),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(Value::Bool(false)),
            _ => Err(format!("'{}' is not a boolean", s)),
        },
        other => Err(format!("expected a boolean, got {}", other)),
    }
}

/// Arrays, maps and objects may arrive as JSON text.
fn to_shape(value: Value, shape: ParamType) -> Result<Value, String> {
    let value = match value {
        Value::String(text) => serde_json::from_str::<Value>(&text)
            .map_err(|e| format!("'{}' is not valid JSON: {}", text, e))?,
        other => other,
    };
    if shape.accepts(&value) {
        Ok(value)
    } else {
        Err(format!("expected {}, got {}", shape, value))
    }
}

#[cfg(test)]
mod tests {
    use descriptor::CommandDescriptor;
    use serde_json::json;

    use super::*;

    fn param(param_type: ParamType, required: bool) -> ParamDef {
        let builder = CommandDescriptor::builder("t");
        let builder = if required {
            builder.required("p", param_type)
        } else {
            builder.optional("p", param_type)
        };
        builder.build().params.remove(0)
    }

    #[test]
    fn test_integer() {
        let p = param(ParamType::Integer, true);
        assert_eq!(coerce(&p, json!(6)), Ok(json!(6)));
        assert_eq!(coerce(&p, json!(6.0)), Ok(json!(6)));
        assert_eq!(coerce(&p, json!("6")), Ok(json!(6)));
        assert!(coerce(&p, json!(6.5)).is_err());
        assert!(coerce(&p, json!("six")).is_err());
        assert!(coerce(&p, json!(true)).is_err());
    }

    #[test]
    fn test_float() {
        let p = param(ParamType::Float, true);
        assert_eq!(coerce(&p, json!(1.5)), Ok(json!(1.5)));
        assert_eq!(coerce(&p, json!(2)), Ok(json!(2.0)));
        assert_eq!(coerce(&p, json!("0.0001")), Ok(json!(0.0001)));
        assert!(coerce(&p, json!("abc")).is_err());
    }

    #[test]
    fn test_bool() {
        let p = param(ParamType::Bool, true);
        assert_eq!(coerce(&p, json!(false)), Ok(json!(false)));
        assert_eq!(coerce(&p, json!("T")), Ok(json!(true)));
        assert_eq!(coerce(&p, json!("0")), Ok(json!(false)));
        assert!(coerce(&p, json!("yes")).is_err());
        assert!(coerce(&p, json!(1)).is_err());
    }

    #[test]
    fn test_string() {
        let p = param(ParamType::String, true);
        assert_eq!(coerce(&p, json!("t1abc")), Ok(json!("t1abc")));
        assert!(coerce(&p, json!(1)).is_err());
    }

    #[test]
    fn test_shapes_from_json_text() {
        let array = param(ParamType::Array, true);
        assert_eq!(coerce(&array, json!(r#"["a","b"]"#)), Ok(json!(["a", "b"])));
        assert_eq!(coerce(&array, json!(["a"])), Ok(json!(["a"])));
        assert!(coerce(&array, json!(r#"{"a":1}"#)).is_err());
        assert!(coerce(&array, json!("[unclosed")).is_err());

        let object = param(ParamType::Object, true);
        assert_eq!(coerce(&object, json!(r#"{"a":1}"#)), Ok(json!({"a": 1})));
    }

    #[test]
    fn test_null() {
        assert_eq!(coerce(&param(ParamType::Integer, false), Value::Null), Ok(Value::Null));
        assert!(coerce(&param(ParamType::Integer, true), Value::Null).is_err());
    }
}
