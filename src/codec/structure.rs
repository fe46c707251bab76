//! Array, ArrayOf, Choice and Enumerated.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::selector::{decode_selected, encode_selected, variant_type};
use super::{json_kind, ApiValue, Codec, CodecError, CodecResult, Key};
use crate::format::{Conversion, NetDecodeFn, NetEncodeFn};
use crate::schema::CompiledType;

/// Enforces a structure's `min`/`max` on the number of populated fields.
pub(crate) fn check_populated(ct: &CompiledType, count: usize) -> CodecResult<()> {
    let count = count as i64;
    if let Some(min) = ct.min.filter(|&m| count < m) {
        return Err(CodecError::range(&ct.name, format!("{} fields populated, minimum {}", count, min)));
    }
    if let Some(max) = ct.max.filter(|&m| count > m) {
        return Err(CodecError::range(&ct.name, format!("{} fields populated, maximum {}", count, max)));
    }
    Ok(())
}

/// Drops absent optional values from the end of a positional sequence.
pub(crate) fn trim_trailing<T>(items: &mut Vec<T>, is_absent: impl Fn(&T) -> bool) {
    while items.last().is_some_and(&is_absent) {
        items.pop();
    }
}

fn check_length(ct: &CompiledType, len: usize) -> CodecResult<()> {
    let n = len as i64;
    match (ct.min, ct.max) {
        (Some(min), _) if n < min => Err(CodecError::range(&ct.name, format!("length {} < minimum {}", n, min))),
        (_, Some(max)) if n > max => Err(CodecError::range(&ct.name, format!("length {} > maximum {}", n, max))),
        _ => Ok(()),
    }
}

fn element_type(ct: &CompiledType) -> CodecResult<&str> {
    ct.options
        .rtype
        .as_deref()
        .ok_or_else(|| CodecError::unknown_type(format!("{} element", ct.name)))
}

pub(crate) fn encode_array_of(codec: &Codec, ct: &CompiledType, value: &ApiValue) -> CodecResult<Value> {
    let ApiValue::Array(items) = value else {
        return Err(CodecError::type_mismatch(&ct.name, "array", value.kind_name()));
    };
    check_length(ct, items.len())?;
    let rtype = element_type(ct)?;
    items
        .iter()
        .map(|item| codec.encode(rtype, item))
        .collect::<CodecResult<Vec<_>>>()
        .map(Value::Array)
}

pub(crate) fn decode_array_of(codec: &Codec, ct: &CompiledType, value: &Value) -> CodecResult<ApiValue> {
    let Value::Array(items) = value else {
        return Err(CodecError::type_mismatch(&ct.name, "array", json_kind(value)));
    };
    check_length(ct, items.len())?;
    let rtype = element_type(ct)?;
    items
        .iter()
        .map(|item| codec.decode(rtype, item))
        .collect::<CodecResult<Vec<_>>>()
        .map(ApiValue::Array)
}

fn network_conversion(ct: &CompiledType) -> Option<(NetEncodeFn, NetDecodeFn)> {
    match ct.conversion?.conversion {
        Conversion::Network { encode, decode } => Some((encode, decode)),
        Conversion::Text { .. } => None,
    }
}

fn encode_network(ct: &CompiledType, items: &[ApiValue], encode: NetEncodeFn) -> CodecResult<Value> {
    match items {
        [ApiValue::Binary(addr), ApiValue::Integer(prefix)] => encode(addr, *prefix)
            .map(Value::String)
            .map_err(|e| CodecError::conversion(&ct.name, e)),
        _ => Err(CodecError::type_mismatch(
            &ct.name,
            "[address, prefix length]",
            format!("array of {}", items.len()),
        )),
    }
}

fn decode_network(ct: &CompiledType, value: &Value, decode: NetDecodeFn) -> CodecResult<ApiValue> {
    let Value::String(text) = value else {
        return Err(CodecError::type_mismatch(&ct.name, "string", json_kind(value)));
    };
    let (addr, prefix) = decode(text).map_err(|e| CodecError::conversion(&ct.name, e))?;
    Ok(ApiValue::Array(vec![ApiValue::Binary(addr), ApiValue::Integer(prefix)]))
}

pub(crate) fn encode_array(codec: &Codec, ct: &CompiledType, value: &ApiValue) -> CodecResult<Value> {
    let ApiValue::Array(items) = value else {
        return Err(CodecError::type_mismatch(&ct.name, "array", value.kind_name()));
    };
    if let Some((encode, _)) = network_conversion(ct) {
        return encode_network(ct, items, encode);
    }
    if items.len() > ct.fields.len() {
        return Err(CodecError::unexpected_field(&ct.name, format!("position {}", ct.fields.len() + 1)));
    }

    let mut out = vec![Value::Null; ct.fields.len()];
    let mut populated = 0;
    for (i, field) in ct.fields.iter().enumerate() {
        match items.get(i).filter(|v| !v.is_null()) {
            Some(v) => {
                out[i] = match field.selector {
                    Some(s) => {
                        let variant = variant_type(codec, ct, field, items.get(s))?;
                        encode_selected(codec, ct, field, variant, v)?
                    }
                    None => codec.encode(&field.type_name, v)?,
                };
                populated += 1;
            }
            None if !field.optional => return Err(CodecError::missing_field(&ct.name, field.name.as_str())),
            None => {}
        }
    }
    check_populated(ct, populated)?;
    trim_trailing(&mut out, Value::is_null);
    Ok(Value::Array(out))
}

pub(crate) fn decode_array(codec: &Codec, ct: &CompiledType, value: &Value) -> CodecResult<ApiValue> {
    if let Some((_, decode)) = network_conversion(ct) {
        return decode_network(ct, value, decode);
    }
    let Value::Array(items) = value else {
        return Err(CodecError::type_mismatch(&ct.name, "array", json_kind(value)));
    };
    if items.len() > ct.fields.len() {
        return Err(CodecError::unexpected_field(&ct.name, format!("position {}", ct.fields.len() + 1)));
    }

    let mut out = vec![ApiValue::Null; ct.fields.len()];
    let mut populated = 0;
    // Selected fields need their selector decoded first.
    for selected in [false, true] {
        for (i, field) in ct.fields.iter().enumerate() {
            if field.selector.is_some() != selected {
                continue;
            }
            match items.get(i).filter(|v| !v.is_null()) {
                Some(v) => {
                    out[i] = match field.selector {
                        Some(s) => {
                            let variant = variant_type(codec, ct, field, out.get(s))?;
                            decode_selected(codec, ct, field, variant, v)?
                        }
                        None => codec.decode(&field.type_name, v)?,
                    };
                    populated += 1;
                }
                None if !field.optional => return Err(CodecError::missing_field(&ct.name, field.name.as_str())),
                None => {}
            }
        }
    }
    check_populated(ct, populated)?;
    trim_trailing(&mut out, ApiValue::is_null);
    Ok(ApiValue::Array(out))
}

pub(crate) fn encode_choice(codec: &Codec, ct: &CompiledType, value: &ApiValue) -> CodecResult<Value> {
    let ApiValue::Map(entries) = value else {
        return Err(CodecError::type_mismatch(&ct.name, "map", value.kind_name()));
    };
    let mut iter = entries.iter();
    let (key, v) = match (iter.next(), iter.next()) {
        (Some(entry), None) => entry,
        _ => {
            return Err(CodecError::invalid_choice(
                &ct.name,
                format!("{} keys, expected exactly one", entries.len()),
            ))
        }
    };
    let field = match key {
        Key::Tag(tag) if ct.options.compact => ct.field_by_tag(*tag),
        Key::Name(name) if !ct.options.compact => ct.field_by_name(name),
        _ => None,
    }
    .ok_or_else(|| CodecError::unknown_variant(&ct.name, key.to_string()))?;

    let mut out = Map::new();
    out.insert(ct.field_key(field), codec.encode(&field.type_name, v)?);
    Ok(Value::Object(out))
}

pub(crate) fn decode_choice(codec: &Codec, ct: &CompiledType, value: &Value) -> CodecResult<ApiValue> {
    let Value::Object(entries) = value else {
        return Err(CodecError::type_mismatch(&ct.name, "object", json_kind(value)));
    };
    let mut iter = entries.iter();
    let (key, v) = match (iter.next(), iter.next()) {
        (Some(entry), None) => entry,
        _ => {
            return Err(CodecError::invalid_choice(
                &ct.name,
                format!("{} keys, expected exactly one", entries.len()),
            ))
        }
    };
    let field = ct
        .field_by_key(key)
        .ok_or_else(|| CodecError::unknown_variant(&ct.name, format!("{:?}", key)))?;
    let api_key = if ct.options.compact {
        Key::Tag(field.tag)
    } else {
        Key::Name(field.name.clone())
    };
    let decoded = codec.decode(&field.type_name, v)?;
    Ok(ApiValue::Map(BTreeMap::from([(api_key, decoded)])))
}

pub(crate) fn encode_enumerated(_: &Codec, ct: &CompiledType, value: &ApiValue) -> CodecResult<Value> {
    if ct.options.compact {
        return match value {
            ApiValue::Integer(tag) if ct.enum_names.contains_key(tag) => Ok(Value::from(*tag)),
            ApiValue::Integer(tag) => Err(CodecError::unknown_variant(&ct.name, tag.to_string())),
            other => Err(CodecError::type_mismatch(&ct.name, "integer", other.kind_name())),
        };
    }
    let ApiValue::String(name) = value else {
        return Err(CodecError::type_mismatch(&ct.name, "string", value.kind_name()));
    };
    let tag = ct
        .enum_tags
        .get(name)
        .ok_or_else(|| CodecError::unknown_variant(&ct.name, format!("{:?}", name)))?;
    Ok(if ct.id_tags {
        Value::from(*tag)
    } else {
        Value::String(name.clone())
    })
}

pub(crate) fn decode_enumerated(_: &Codec, ct: &CompiledType, value: &Value) -> CodecResult<ApiValue> {
    if ct.id_tags {
        let tag = value
            .as_i64()
            .ok_or_else(|| CodecError::type_mismatch(&ct.name, "integer", json_kind(value)))?;
        let name = ct
            .enum_names
            .get(&tag)
            .ok_or_else(|| CodecError::unknown_variant(&ct.name, tag.to_string()))?;
        return Ok(if ct.options.compact {
            ApiValue::Integer(tag)
        } else {
            ApiValue::String(name.clone())
        });
    }
    let Value::String(name) = value else {
        return Err(CodecError::type_mismatch(&ct.name, "string", json_kind(value)));
    };
    if ct.enum_tags.contains_key(name) {
        Ok(ApiValue::String(name.clone()))
    } else {
        Err(CodecError::unknown_variant(&ct.name, format!("{:?}", name)))
    }
}
