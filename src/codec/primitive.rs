//! Primitive kinds: Boolean, Integer, Number, Null, String and Binary.

use serde_json::{Number, Value};

use super::{json_kind, ApiValue, Codec, CodecError, CodecResult};
use crate::format::{Checker, Conversion};
use crate::schema::CompiledType;

fn check_range(ct: &CompiledType, value: i64, what: &str) -> CodecResult<()> {
    if let Some(min) = ct.min.filter(|&m| value < m) {
        return Err(CodecError::range(&ct.name, format!("{} {} < minimum {}", what, value, min)));
    }
    if let Some(max) = ct.max.filter(|&m| value > m) {
        return Err(CodecError::range(&ct.name, format!("{} {} > maximum {}", what, value, max)));
    }
    Ok(())
}

fn check_float_range(ct: &CompiledType, value: f64) -> CodecResult<()> {
    if let Some(min) = ct.min.filter(|&m| value < m as f64) {
        return Err(CodecError::range(&ct.name, format!("value {} < minimum {}", value, min)));
    }
    if let Some(max) = ct.max.filter(|&m| value > m as f64) {
        return Err(CodecError::range(&ct.name, format!("value {} > maximum {}", value, max)));
    }
    Ok(())
}

fn check_length(ct: &CompiledType, len: usize) -> CodecResult<()> {
    check_range(ct, i64::try_from(len).unwrap_or(i64::MAX), "length")
}

/// A JSON integer that does not fit in `i64` is out of range, not mistyped.
fn oversized(ct: &CompiledType, value: &Value) -> CodecError {
    CodecError::range(&ct.name, format!("value {} exceeds the 64-bit signed range", value))
}

fn violation(ct: &CompiledType, format: &str, value: impl Into<String>) -> CodecError {
    CodecError::FormatConstraintViolation {
        type_name: ct.name.clone(),
        format: format.to_string(),
        value: value.into(),
    }
}

fn check_format_str(ct: &CompiledType, value: &str) -> CodecResult<()> {
    match ct.format {
        Some(check) => match check.checker {
            Checker::String(f) if !f(value) => Err(violation(ct, check.name, format!("{:?}", value))),
            _ => Ok(()),
        },
        None => Ok(()),
    }
}

fn check_format_bytes(ct: &CompiledType, value: &[u8]) -> CodecResult<()> {
    match ct.format {
        Some(check) => match check.checker {
            Checker::Binary(f) if !f(value) => Err(violation(ct, check.name, hex::encode(value))),
            _ => Ok(()),
        },
        None => Ok(()),
    }
}

fn check_format_int(ct: &CompiledType, value: i64) -> CodecResult<()> {
    match ct.format {
        Some(check) => match check.checker {
            Checker::Integer(f) if !f(value) => Err(violation(ct, check.name, value.to_string())),
            _ => Ok(()),
        },
        None => Ok(()),
    }
}

pub(crate) fn encode_boolean(_: &Codec, ct: &CompiledType, value: &ApiValue) -> CodecResult<Value> {
    match value {
        ApiValue::Bool(b) => Ok(Value::Bool(*b)),
        other => Err(CodecError::type_mismatch(&ct.name, "boolean", other.kind_name())),
    }
}

pub(crate) fn decode_boolean(_: &Codec, ct: &CompiledType, value: &Value) -> CodecResult<ApiValue> {
    match value {
        Value::Bool(b) => Ok(ApiValue::Bool(*b)),
        other => Err(CodecError::type_mismatch(&ct.name, "boolean", json_kind(other))),
    }
}

fn checked_integer(ct: &CompiledType, value: i64) -> CodecResult<i64> {
    check_range(ct, value, "value")?;
    check_format_int(ct, value)?;
    Ok(value)
}

pub(crate) fn encode_integer(_: &Codec, ct: &CompiledType, value: &ApiValue) -> CodecResult<Value> {
    match value {
        ApiValue::Integer(i) => Ok(Value::from(checked_integer(ct, *i)?)),
        other => Err(CodecError::type_mismatch(&ct.name, "integer", other.kind_name())),
    }
}

pub(crate) fn decode_integer(_: &Codec, ct: &CompiledType, value: &Value) -> CodecResult<ApiValue> {
    match value.as_i64() {
        Some(i) => Ok(ApiValue::Integer(checked_integer(ct, i)?)),
        None if value.is_u64() => Err(oversized(ct, value)),
        None => Err(CodecError::type_mismatch(&ct.name, "integer", json_kind(value))),
    }
}

pub(crate) fn encode_number(_: &Codec, ct: &CompiledType, value: &ApiValue) -> CodecResult<Value> {
    match value {
        ApiValue::Integer(i) => {
            check_range(ct, *i, "value")?;
            Ok(Value::from(*i))
        }
        ApiValue::Number(n) => {
            let number = Number::from_f64(*n)
                .ok_or_else(|| CodecError::type_mismatch(&ct.name, "finite number", n.to_string()))?;
            check_float_range(ct, *n)?;
            Ok(Value::Number(number))
        }
        other => Err(CodecError::type_mismatch(&ct.name, "number", other.kind_name())),
    }
}

pub(crate) fn decode_number(_: &Codec, ct: &CompiledType, value: &Value) -> CodecResult<ApiValue> {
    let Value::Number(n) = value else {
        return Err(CodecError::type_mismatch(&ct.name, "number", json_kind(value)));
    };
    if let Some(i) = n.as_i64() {
        check_range(ct, i, "value")?;
        return Ok(ApiValue::Integer(i));
    }
    match n.as_f64() {
        Some(f) => {
            check_float_range(ct, f)?;
            Ok(ApiValue::Number(f))
        }
        None => Err(CodecError::type_mismatch(&ct.name, "number", n.to_string())),
    }
}

pub(crate) fn encode_null(_: &Codec, ct: &CompiledType, value: &ApiValue) -> CodecResult<Value> {
    match value {
        ApiValue::Null => Ok(Value::Null),
        other => Err(CodecError::type_mismatch(&ct.name, "null", other.kind_name())),
    }
}

pub(crate) fn decode_null(_: &Codec, ct: &CompiledType, value: &Value) -> CodecResult<ApiValue> {
    match value {
        Value::Null => Ok(ApiValue::Null),
        other => Err(CodecError::type_mismatch(&ct.name, "null", json_kind(other))),
    }
}

fn checked_string(ct: &CompiledType, s: &str) -> CodecResult<()> {
    check_length(ct, s.chars().count())?;
    if let Some(pattern) = &ct.pattern {
        if !pattern.is_match(s) {
            return Err(violation(ct, &format!("pattern {}", pattern.as_str()), format!("{:?}", s)));
        }
    }
    check_format_str(ct, s)
}

pub(crate) fn encode_string(_: &Codec, ct: &CompiledType, value: &ApiValue) -> CodecResult<Value> {
    match value {
        ApiValue::String(s) => {
            checked_string(ct, s)?;
            Ok(Value::String(s.clone()))
        }
        other => Err(CodecError::type_mismatch(&ct.name, "string", other.kind_name())),
    }
}

pub(crate) fn decode_string(_: &Codec, ct: &CompiledType, value: &Value) -> CodecResult<ApiValue> {
    match value {
        Value::String(s) => {
            checked_string(ct, s)?;
            Ok(ApiValue::String(s.clone()))
        }
        other => Err(CodecError::type_mismatch(&ct.name, "string", json_kind(other))),
    }
}

pub(crate) fn encode_binary(_: &Codec, ct: &CompiledType, value: &ApiValue) -> CodecResult<Value> {
    let ApiValue::Binary(bytes) = value else {
        return Err(CodecError::type_mismatch(&ct.name, "binary", value.kind_name()));
    };
    check_format_bytes(ct, bytes)?;
    check_length(ct, bytes.len())?;
    match ct.conversion.map(|entry| entry.conversion) {
        Some(Conversion::Text { encode, .. }) => encode(bytes)
            .map(Value::String)
            .map_err(|e| CodecError::conversion(&ct.name, e)),
        _ => Err(CodecError::conversion(&ct.name, "no text conversion")),
    }
}

pub(crate) fn decode_binary(_: &Codec, ct: &CompiledType, value: &Value) -> CodecResult<ApiValue> {
    let Value::String(text) = value else {
        return Err(CodecError::type_mismatch(&ct.name, "string", json_kind(value)));
    };
    let bytes = match ct.conversion.map(|entry| entry.conversion) {
        Some(Conversion::Text { decode, .. }) => decode(text).map_err(|e| CodecError::conversion(&ct.name, e))?,
        _ => return Err(CodecError::conversion(&ct.name, "no text conversion")),
    };
    check_length(ct, bytes.len())?;
    check_format_bytes(ct, &bytes)?;
    Ok(ApiValue::Binary(bytes))
}
