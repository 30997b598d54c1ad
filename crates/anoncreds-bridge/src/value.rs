//! Primitive coercion from host values to fixed-width native types.

use anoncreds_bridge_types::ObjectHandle;
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};

/// Host-side type name of a value, as reported in type mismatches.
pub fn type_of(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

pub fn as_str<'a>(name: &str, value: &'a Value) -> BridgeResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| BridgeError::mismatch(name, "string", type_of(Some(value))))
}

/// Whole numbers only. Host numbers may arrive as integral doubles, which
/// are accepted; fractions and values outside `i64` are not.
pub fn as_i64(name: &str, value: &Value) -> BridgeResult<i64> {
    let Value::Number(number) = value else {
        return Err(BridgeError::mismatch(name, "integer", type_of(Some(value))));
    };
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        _ => Err(BridgeError::mismatch(
            name,
            "integer",
            format!("number {number}"),
        )),
    }
}

pub fn as_i32(name: &str, value: &Value) -> BridgeResult<i32> {
    let n = as_i64(name, value)?;
    i32::try_from(n)
        .map_err(|_| BridgeError::mismatch(name, "32-bit integer", format!("number {n}")))
}

/// Booleans and the integers 0 and 1, as the native single-byte flag.
pub fn as_flag(name: &str, value: &Value) -> BridgeResult<i8> {
    match value {
        Value::Bool(b) => Ok(i8::from(*b)),
        Value::Number(_) => match as_i64(name, value)? {
            n @ (0 | 1) => Ok(n as i8),
            n => Err(BridgeError::mismatch(name, "boolean", format!("number {n}"))),
        },
        other => Err(BridgeError::mismatch(name, "boolean", type_of(Some(other)))),
    }
}

/// A host handle is either the wrapper object `{"handle": n}` the bridge
/// hands out, or the bare integer.
pub fn as_handle(name: &str, value: &Value) -> BridgeResult<ObjectHandle> {
    let raw = match value {
        Value::Object(map) => match map.get("handle") {
            Some(inner @ Value::Number(_)) => inner,
            _ => return Err(BridgeError::mismatch(name, "object handle", "object")),
        },
        Value::Number(_) => value,
        other => {
            return Err(BridgeError::mismatch(
                name,
                "object handle",
                type_of(Some(other)),
            ))
        }
    };
    let n = as_i64(name, raw)?;
    usize::try_from(n)
        .map(ObjectHandle)
        .map_err(|_| BridgeError::mismatch(name, "object handle", format!("number {n}")))
}

/// JSON payloads travel as text; structured host values are serialized
/// first.
pub fn as_json_text(name: &str, value: &Value) -> BridgeResult<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Object(_) | Value::Array(_) => Ok(value.to_string()),
        other => Err(BridgeError::mismatch(
            name,
            "JSON string or object",
            type_of(Some(other)),
        )),
    }
}
