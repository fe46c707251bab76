//! Map and Record.
//!
//! The API value is always a name-keyed mapping. The serialized value is a
//! mapping keyed by name or tag, or for non-verbose Records a positional
//! sequence. A field named by the flatten marker holds a Choice whose single
//! key is spliced into the surrounding mapping instead of nested under the
//! field.

use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value};

use super::selector::{decode_selected, encode_selected, variant_type};
use super::structure::{check_populated, trim_trailing};
use super::{json_kind, ApiValue, Codec, CodecError, CodecResult, Key};
use crate::schema::{BaseKind, CompiledField, CompiledType, Shape};

fn flattened_choice<'a>(codec: &'a Codec, ct: &CompiledType, field: &CompiledField) -> CodecResult<&'a CompiledType> {
    let choice = codec.lookup(&field.type_name)?;
    if choice.kind != BaseKind::Choice {
        return Err(CodecError::type_mismatch(&ct.name, "Choice", choice.kind.as_str()));
    }
    Ok(choice)
}

fn choice_api_key(choice: &CompiledType, key: &Key) -> bool {
    match key {
        Key::Tag(tag) if choice.options.compact => choice.field_by_tag(*tag).is_some(),
        Key::Name(name) if !choice.options.compact => choice.field_by_name(name).is_some(),
        _ => false,
    }
}

fn declares_name(ct: &CompiledType, key: &Key) -> bool {
    matches!(key, Key::Name(name) if ct.field_by_name(name).is_some_and(|f| !f.flatten))
}

fn too_many_variants(ct: &CompiledType, choice: &CompiledType, keys: &[String]) -> CodecError {
    CodecError::invalid_choice(
        &ct.name,
        format!("keys {} all select a variant of {}", keys.join(", "), choice.name),
    )
}

fn selector_value<'v>(ct: &CompiledType, field: &CompiledField, entries: &'v BTreeMap<Key, ApiValue>) -> Option<&'v ApiValue> {
    let sibling = &ct.fields[field.selector?];
    entries.get(&Key::Name(sibling.name.clone()))
}

pub(crate) fn encode_maprec(codec: &Codec, ct: &CompiledType, value: &ApiValue) -> CodecResult<Value> {
    let ApiValue::Map(entries) = value else {
        return Err(CodecError::type_mismatch(&ct.name, "map", value.kind_name()));
    };

    let mut consumed: HashSet<&Key> = HashSet::new();
    let mut slots: Vec<Option<Value>> = vec![None; ct.fields.len()];

    for selected in [false, true] {
        for (i, field) in ct.fields.iter().enumerate() {
            if field.selector.is_some() != selected {
                continue;
            }
            if field.flatten {
                let choice = flattened_choice(codec, ct, field)?;
                let matches: Vec<(&Key, &ApiValue)> = entries
                    .iter()
                    .filter(|(k, v)| !v.is_null() && !declares_name(ct, k) && choice_api_key(choice, k))
                    .collect();
                match matches.as_slice() {
                    [] if !field.optional => return Err(CodecError::missing_field(&ct.name, field.name.as_str())),
                    [] => {}
                    [(key, v)] => {
                        let (key, v) = (*key, *v);
                        let single = ApiValue::Map(BTreeMap::from([(key.clone(), v.clone())]));
                        slots[i] = Some(codec.encode(&field.type_name, &single)?);
                        consumed.insert(key);
                    }
                    many => {
                        let keys: Vec<String> = many.iter().map(|(k, _)| k.to_string()).collect();
                        return Err(too_many_variants(ct, choice, &keys));
                    }
                }
                continue;
            }

            match entries.get_key_value(&Key::Name(field.name.clone())).filter(|(_, v)| !v.is_null()) {
                Some((key, v)) => {
                    slots[i] = Some(match field.selector {
                        Some(_) => {
                            let variant = variant_type(codec, ct, field, selector_value(ct, field, entries))?;
                            encode_selected(codec, ct, field, variant, v)?
                        }
                        None => codec.encode(&field.type_name, v)?,
                    });
                    consumed.insert(key);
                }
                None if !field.optional => return Err(CodecError::missing_field(&ct.name, field.name.as_str())),
                None => {}
            }
        }
    }

    if let Some(extra) = entries.keys().find(|k| !consumed.contains(k)) {
        return Err(CodecError::unexpected_field(&ct.name, extra.to_string()));
    }
    check_populated(ct, slots.iter().filter(|s| s.is_some()).count())?;

    match ct.shape {
        Shape::Mapping => {
            let mut out = Map::new();
            for (field, slot) in ct.fields.iter().zip(slots) {
                match (slot, field.flatten) {
                    (Some(Value::Object(spliced)), true) => out.extend(spliced),
                    (Some(v), _) => {
                        out.insert(ct.field_key(field), v);
                    }
                    (None, _) => {}
                }
            }
            Ok(Value::Object(out))
        }
        Shape::Sequence => {
            let mut out: Vec<Value> = slots.into_iter().map(|s| s.unwrap_or(Value::Null)).collect();
            trim_trailing(&mut out, Value::is_null);
            Ok(Value::Array(out))
        }
    }
}

pub(crate) fn decode_maprec(codec: &Codec, ct: &CompiledType, value: &Value) -> CodecResult<ApiValue> {
    let (object, sequence) = match (ct.shape, value) {
        (Shape::Mapping, Value::Object(obj)) => (Some(obj), None),
        (Shape::Sequence, Value::Array(items)) => {
            if items.len() > ct.fields.len() {
                return Err(CodecError::unexpected_field(
                    &ct.name,
                    format!("position {}", ct.fields.len() + 1),
                ));
            }
            (None, Some(items))
        }
        (Shape::Mapping, other) => return Err(CodecError::type_mismatch(&ct.name, "object", json_kind(other))),
        (Shape::Sequence, other) => return Err(CodecError::type_mismatch(&ct.name, "array", json_kind(other))),
    };

    let mut out: BTreeMap<Key, ApiValue> = BTreeMap::new();
    let mut consumed: HashSet<String> = HashSet::new();
    let mut populated = 0;

    for selected in [false, true] {
        for (i, field) in ct.fields.iter().enumerate() {
            if field.selector.is_some() != selected {
                continue;
            }
            if field.flatten {
                let choice = flattened_choice(codec, ct, field)?;
                let found = match (object, sequence) {
                    (Some(obj), _) => {
                        let matches: Vec<(&String, &Value)> = obj
                            .iter()
                            .filter(|(k, v)| {
                                !v.is_null()
                                    && !ct.field_by_key(k).is_some_and(|f| !f.flatten)
                                    && choice.field_by_key(k).is_some()
                            })
                            .collect();
                        match matches.as_slice() {
                            [] => None,
                            [(key, v)] => {
                                consumed.insert(key.to_string());
                                let mut single = Map::new();
                                single.insert(key.to_string(), (*v).clone());
                                Some(Value::Object(single))
                            }
                            many => {
                                let keys: Vec<String> = many.iter().map(|(k, _)| k.to_string()).collect();
                                return Err(too_many_variants(ct, choice, &keys));
                            }
                        }
                    }
                    (None, Some(items)) => items.get(i).filter(|v| !v.is_null()).cloned(),
                    (None, None) => None,
                };
                match found {
                    Some(sv) => {
                        if let ApiValue::Map(variant) = codec.decode(&field.type_name, &sv)? {
                            out.extend(variant);
                        }
                        populated += 1;
                    }
                    None if !field.optional => return Err(CodecError::missing_field(&ct.name, field.name.as_str())),
                    None => {}
                }
                continue;
            }

            let serialized = match (object, sequence) {
                (Some(obj), _) => {
                    let key = ct.field_key(field);
                    let v = obj.get(&key);
                    consumed.insert(key);
                    v
                }
                (None, Some(items)) => items.get(i),
                (None, None) => None,
            };
            match serialized.filter(|v| !v.is_null()) {
                Some(v) => {
                    let decoded = match field.selector {
                        Some(_) => {
                            let variant = variant_type(codec, ct, field, selector_value(ct, field, &out))?;
                            decode_selected(codec, ct, field, variant, v)?
                        }
                        None => codec.decode(&field.type_name, v)?,
                    };
                    out.insert(Key::Name(field.name.clone()), decoded);
                    populated += 1;
                }
                None if !field.optional => return Err(CodecError::missing_field(&ct.name, field.name.as_str())),
                None => {}
            }
        }
    }

    if let Some(obj) = object {
        if let Some(extra) = obj.keys().find(|k| !consumed.contains(k.as_str())) {
            return Err(CodecError::unexpected_field(&ct.name, extra.as_str()));
        }
    }
    check_populated(ct, populated)?;
    Ok(ApiValue::Map(out))
}
