//! Runtime type selection for `atfield` fields.
//!
//! A selected field is declared with a Choice type, but its value is not
//! wrapped in a one-key mapping. The sibling named by `atfield` holds the
//! variant name (or tag), and the variant's type is applied to the value
//! directly. The variant is resolved again for every value.

use serde_json::Value;

use super::{json_kind, ApiValue, Codec, CodecError, CodecResult};
use crate::schema::{CompiledField, CompiledType};

/// Resolves the variant type chosen by the selector's API value.
pub(crate) fn variant_type<'a>(
    codec: &'a Codec,
    owner: &CompiledType,
    field: &CompiledField,
    selector: Option<&ApiValue>,
) -> CodecResult<&'a CompiledType> {
    let choice = codec.lookup(&field.item_type)?;
    let selector_name = field
        .selector
        .and_then(|i| owner.fields.get(i))
        .map(|f| f.name.as_str())
        .unwrap_or_default();
    let variant = match selector {
        None | Some(ApiValue::Null) => return Err(CodecError::missing_field(&owner.name, selector_name)),
        Some(ApiValue::String(name)) => choice
            .field_by_name(name)
            .ok_or_else(|| CodecError::unknown_variant(&choice.name, format!("{:?}", name)))?,
        Some(ApiValue::Integer(tag)) => choice
            .field_by_tag(*tag)
            .ok_or_else(|| CodecError::unknown_variant(&choice.name, tag.to_string()))?,
        Some(other) => {
            return Err(CodecError::type_mismatch(
                &owner.name,
                "variant name or tag",
                other.kind_name(),
            ))
        }
    };
    codec.lookup(&variant.type_name)
}

fn check_count(owner: &CompiledType, field: &CompiledField, len: usize) -> CodecResult<()> {
    match field.cardinality {
        Some((lo, hi)) if len < lo || len > hi => Err(CodecError::range(
            &owner.name,
            format!("field {:?} has {} elements, expected {}..={}", field.name, len, lo, hi),
        )),
        _ => Ok(()),
    }
}

pub(crate) fn encode_selected(
    codec: &Codec,
    owner: &CompiledType,
    field: &CompiledField,
    variant: &CompiledType,
    value: &ApiValue,
) -> CodecResult<Value> {
    if field.cardinality.is_none() {
        return (variant.encode)(codec, variant, value);
    }
    let ApiValue::Array(items) = value else {
        return Err(CodecError::type_mismatch(&owner.name, "array", value.kind_name()));
    };
    check_count(owner, field, items.len())?;
    items
        .iter()
        .map(|item| (variant.encode)(codec, variant, item))
        .collect::<CodecResult<Vec<_>>>()
        .map(Value::Array)
}

pub(crate) fn decode_selected(
    codec: &Codec,
    owner: &CompiledType,
    field: &CompiledField,
    variant: &CompiledType,
    value: &Value,
) -> CodecResult<ApiValue> {
    if field.cardinality.is_none() {
        return (variant.decode)(codec, variant, value);
    }
    let Value::Array(items) = value else {
        return Err(CodecError::type_mismatch(&owner.name, "array", json_kind(value)));
    };
    check_count(owner, field, items.len())?;
    items
        .iter()
        .map(|item| (variant.decode)(codec, variant, item))
        .collect::<CodecResult<Vec<_>>>()
        .map(ApiValue::Array)
}
