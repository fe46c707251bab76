//! Schema compiler.
//!
//! Turns a [`Schema`] into a [`SymbolTable`]: every declared type, every
//! primitive kind and every helper type the compiler synthesizes, indexed by
//! name and carrying the encode/decode functions of its kind. The table is
//! immutable once built.

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::debug;
use regex::Regex;

use super::errors::SchemaError;
use super::options::{check_field_options, check_type_options, parse_field_options, parse_type_options};
use super::options::{FieldOptions, TypeOptions};
use super::types::{BaseKind, FieldDef, Schema, Tag, TypeDef};
use crate::codec::{self, DecodeFn, EncodeFn, Profile};
use crate::config::CodecConfig;
use crate::constants::{DEFAULT_BINARY_CONVERSION, FLATTEN_MARKER, SYNTHETIC_PREFIX};
use crate::format::{self, ConversionEntry, FormatCheck};

/// Serialized layout of a keyed structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Object keyed by field name or tag
    Mapping,
    /// Positional sequence, index = tag - 1
    Sequence,
}

/// A field of a compiled structured type.
#[derive(Debug, Clone)]
pub struct CompiledField {
    pub def: FieldDef,
    pub tag: Tag,
    pub name: String,
    pub options: FieldOptions,
    /// Type used to encode the field value; a synthesized `ArrayOf` for
    /// repeated fields.
    pub type_name: String,
    /// Element type: the declared type, or a synthesized derived enumeration.
    pub item_type: String,
    /// `(min, max)` element count of a repeated field.
    pub cardinality: Option<(usize, usize)>,
    pub optional: bool,
    /// Index of the sibling whose value selects this field's type.
    pub selector: Option<usize>,
    pub flatten: bool,
}

/// Symbol-table entry for one type.
pub struct CompiledType {
    pub def: TypeDef,
    pub name: String,
    pub kind: BaseKind,
    pub options: TypeOptions,
    pub encode: EncodeFn,
    pub decode: DecodeFn,
    /// Identifiers serialize as tags rather than names.
    pub id_tags: bool,
    pub shape: Shape,
    pub fields: Vec<CompiledField>,
    pub by_tag: HashMap<Tag, usize>,
    pub by_name: HashMap<String, usize>,
    pub enum_names: HashMap<Tag, String>,
    pub enum_tags: HashMap<String, Tag>,
    pub format: Option<&'static FormatCheck>,
    pub conversion: Option<&'static ConversionEntry>,
    pub pattern: Option<Regex>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    /// Referenced type of a derived enumeration that is not declared.
    /// Reported as `UnknownType` when the entry is first used.
    pub unresolved: Option<String>,
}

impl fmt::Debug for CompiledType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledType")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("options", &self.options)
            .field("id_tags", &self.id_tags)
            .field("shape", &self.shape)
            .field("fields", &self.fields)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish()
    }
}

impl CompiledType {
    /// Serialized key of a field or variant under this type's identifier style.
    pub fn field_key(&self, field: &CompiledField) -> String {
        if self.id_tags {
            field.tag.to_string()
        } else {
            field.name.clone()
        }
    }

    /// Finds a field by its serialized key.
    pub fn field_by_key(&self, key: &str) -> Option<&CompiledField> {
        let index = if self.id_tags {
            key.parse::<Tag>().ok().and_then(|tag| self.by_tag.get(&tag))
        } else {
            self.by_name.get(key)
        };
        index.map(|&i| &self.fields[i])
    }

    pub fn field_by_name(&self, name: &str) -> Option<&CompiledField> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    pub fn field_by_tag(&self, tag: Tag) -> Option<&CompiledField> {
        self.by_tag.get(&tag).map(|&i| &self.fields[i])
    }

    pub fn is_synthesized(&self) -> bool {
        self.name.starts_with(SYNTHETIC_PREFIX)
    }
}

/// All compiled types of one (schema, profile) pair.
#[derive(Debug)]
pub struct SymbolTable {
    pub profile: Profile,
    types: HashMap<String, CompiledType>,
    synthesized: usize,
}

impl SymbolTable {
    pub fn get(&self, name: &str) -> Option<&CompiledType> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of compiler-generated helper types.
    pub fn synthesized_count(&self) -> usize {
        self.synthesized
    }

    /// Names of all entries, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Compiles `schema` for the given profile and bounds.
pub fn compile(schema: &Schema, profile: Profile, config: &CodecConfig) -> Result<SymbolTable, SchemaError> {
    let mut index: HashMap<&str, &TypeDef> = HashMap::new();
    for td in &schema.types {
        if td.name.is_empty() || td.name.starts_with(SYNTHETIC_PREFIX) {
            return Err(SchemaError::InvalidTypeName(td.name.clone()));
        }
        if index.insert(td.name.as_str(), td).is_some() {
            return Err(SchemaError::DuplicateType(td.name.clone()));
        }
    }

    let mut compiler = Compiler {
        index,
        profile,
        config,
        synthesized: Vec::new(),
    };

    let mut types = HashMap::new();
    for td in &schema.types {
        let ct = compiler.compile_type(td)?;
        types.insert(td.name.clone(), ct);
    }
    for kind in BaseKind::PRIMITIVES {
        if !types.contains_key(kind.as_str()) {
            let ct = compiler.compile_type(&TypeDef::new(kind.as_str(), kind, &[]))?;
            types.insert(ct.name.clone(), ct);
        }
    }

    let synthesized = compiler.synthesized.len();
    for ct in compiler.synthesized {
        types.insert(ct.name.clone(), ct);
    }

    debug!(
        "Compiled schema '{}': {} types ({} synthesized), profile {:?}",
        schema.meta.module,
        types.len(),
        synthesized,
        profile
    );

    Ok(SymbolTable {
        profile,
        types,
        synthesized,
    })
}

struct Compiler<'s> {
    index: HashMap<&'s str, &'s TypeDef>,
    profile: Profile,
    config: &'s CodecConfig,
    synthesized: Vec<CompiledType>,
}

fn functions_for(kind: BaseKind) -> (EncodeFn, DecodeFn) {
    use codec::{primitive, record, structure};
    match kind {
        BaseKind::Binary => (primitive::encode_binary, primitive::decode_binary),
        BaseKind::Boolean => (primitive::encode_boolean, primitive::decode_boolean),
        BaseKind::Integer => (primitive::encode_integer, primitive::decode_integer),
        BaseKind::Number => (primitive::encode_number, primitive::decode_number),
        BaseKind::Null => (primitive::encode_null, primitive::decode_null),
        BaseKind::String => (primitive::encode_string, primitive::decode_string),
        BaseKind::Array => (structure::encode_array, structure::decode_array),
        BaseKind::ArrayOf => (structure::encode_array_of, structure::decode_array_of),
        BaseKind::Choice => (structure::encode_choice, structure::decode_choice),
        BaseKind::Enumerated => (structure::encode_enumerated, structure::decode_enumerated),
        BaseKind::Map | BaseKind::Record => (record::encode_maprec, record::decode_maprec),
    }
}

fn to_count(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

impl<'s> Compiler<'s> {
    fn next_synthetic_name(&self) -> String {
        format!("{}{}", SYNTHETIC_PREFIX, self.synthesized.len() + 1)
    }

    fn compile_type(&mut self, td: &TypeDef) -> Result<CompiledType, SchemaError> {
        let kind = td.base_kind;
        let options = parse_type_options(&td.options)?;
        check_type_options(&td.name, kind, &options)?;
        self.check_field_presence(td)?;

        if kind == BaseKind::ArrayOf && options.rtype.is_none() {
            return Err(SchemaError::MissingOption {
                type_name: td.name.clone(),
                option: "rtype",
            });
        }

        let format = match &options.format {
            Some(name) => Some(format::lookup(&td.name, name, kind)?),
            None => None,
        };
        let conversion = match (&options.cvt, kind) {
            (Some(method), _) => Some(format::lookup_conversion(&td.name, method, kind)?),
            (None, BaseKind::Binary) => Some(format::lookup_conversion(&td.name, DEFAULT_BINARY_CONVERSION, kind)?),
            (None, _) => None,
        };
        let pattern = match &options.pattern {
            Some(p) => Some(Regex::new(p).map_err(|e| SchemaError::InvalidPattern {
                type_name: td.name.clone(),
                message: e.to_string(),
            })?),
            None => None,
        };
        let (min, max) = self.resolve_bounds(td, kind, &options)?;

        let (encode, decode) = functions_for(kind);
        let id_tags = options.compact || !self.profile.verbose_identifiers;
        let shape = if kind == BaseKind::Record && !self.profile.verbose_records {
            Shape::Sequence
        } else {
            Shape::Mapping
        };

        let mut ct = CompiledType {
            def: td.clone(),
            name: td.name.clone(),
            kind,
            options,
            encode,
            decode,
            id_tags,
            shape,
            fields: Vec::new(),
            by_tag: HashMap::new(),
            by_name: HashMap::new(),
            enum_names: HashMap::new(),
            enum_tags: HashMap::new(),
            format,
            conversion,
            pattern,
            min,
            max,
            unresolved: None,
        };

        match kind {
            BaseKind::Enumerated => self.compile_items(td, &mut ct)?,
            k if k.requires_fields() => self.compile_fields(td, &mut ct)?,
            _ => {}
        }
        Ok(ct)
    }

    fn check_field_presence(&self, td: &TypeDef) -> Result<(), SchemaError> {
        let has_fields = td.fields.as_ref().is_some_and(|f| !f.is_empty());
        if td.base_kind.requires_fields() {
            if td.fields.is_none() {
                return Err(SchemaError::invalid_definition(
                    &td.name,
                    format!("{} requires a field list", td.base_kind),
                ));
            }
        } else if has_fields {
            return Err(SchemaError::invalid_definition(
                &td.name,
                format!("{} cannot have fields", td.base_kind),
            ));
        }
        Ok(())
    }

    fn resolve_bounds(
        &self,
        td: &TypeDef,
        kind: BaseKind,
        options: &TypeOptions,
    ) -> Result<(Option<i64>, Option<i64>), SchemaError> {
        let declared_max = options.max.filter(|&m| m > 0);
        let as_bound = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
        let (min, max) = match kind {
            BaseKind::String => (options.min, declared_max.or(Some(as_bound(self.config.max_string)))),
            BaseKind::Binary => (options.min, declared_max.or(Some(as_bound(self.config.max_binary)))),
            BaseKind::ArrayOf => (
                Some(options.min.unwrap_or(1)),
                declared_max.or(Some(as_bound(self.config.max_array))),
            ),
            BaseKind::Integer | BaseKind::Number => (options.min, options.max),
            _ => (options.min, declared_max),
        };
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(SchemaError::invalid_definition(
                    &td.name,
                    format!("min {} exceeds max {}", lo, hi),
                ));
            }
        }
        Ok((min, max))
    }

    fn compile_items(&self, td: &TypeDef, ct: &mut CompiledType) -> Result<(), SchemaError> {
        let own = td.fields.as_deref().unwrap_or(&[]);
        let items: Vec<(Tag, String)> = match &ct.options.rtype {
            Some(rtype) => {
                if !own.is_empty() {
                    return Err(SchemaError::invalid_definition(
                        &td.name,
                        "a derived enumeration cannot declare its own items",
                    ));
                }
                match self.index.get(rtype.as_str()) {
                    Some(source) => match &source.fields {
                        Some(fields) => fields.iter().map(|f| (f.tag(), f.name().to_string())).collect(),
                        None => {
                            return Err(SchemaError::invalid_definition(
                                &td.name,
                                format!("cannot derive items from {}, it has no fields", rtype),
                            ))
                        }
                    },
                    None => {
                        ct.unresolved = Some(rtype.clone());
                        Vec::new()
                    }
                }
            }
            None => own.iter().map(|f| (f.tag(), f.name().to_string())).collect(),
        };

        for (tag, name) in items {
            if ct.enum_names.insert(tag, name.clone()).is_some() {
                return Err(SchemaError::DuplicateTag {
                    type_name: td.name.clone(),
                    tag,
                });
            }
            if ct.enum_tags.insert(name.clone(), tag).is_some() {
                return Err(SchemaError::DuplicateField {
                    type_name: td.name.clone(),
                    field: name,
                });
            }
        }
        Ok(())
    }

    fn compile_fields(&mut self, td: &TypeDef, ct: &mut CompiledType) -> Result<(), SchemaError> {
        let kind = td.base_kind;
        let ordinal = matches!(kind, BaseKind::Array | BaseKind::Record) || (kind == BaseKind::Choice && ct.options.compact);
        let mut seen_tags = HashSet::new();
        let mut seen_names = HashSet::new();

        for (position, fd) in td.fields.as_deref().unwrap_or(&[]).iter().enumerate() {
            let Some(type_ref) = fd.type_ref() else {
                return Err(SchemaError::invalid_definition(
                    &td.name,
                    format!("field {:?} has no type", fd.name()),
                ));
            };
            let tag = fd.tag();
            let name = fd.name();

            if !seen_tags.insert(tag) {
                return Err(SchemaError::DuplicateTag {
                    type_name: td.name.clone(),
                    tag,
                });
            }
            if !seen_names.insert(name.to_string()) {
                return Err(SchemaError::DuplicateField {
                    type_name: td.name.clone(),
                    field: name.to_string(),
                });
            }
            let expected = position as Tag + 1;
            if ordinal && tag != expected {
                return Err(SchemaError::TagOrdinalMismatch {
                    type_name: td.name.clone(),
                    field: name.to_string(),
                    tag,
                    expected,
                });
            }

            let options = parse_field_options(fd.options())?;
            check_field_options(&td.name, kind, name, type_ref, &options)?;

            let flatten = name == FLATTEN_MARKER;
            if flatten && !matches!(kind, BaseKind::Map | BaseKind::Record) {
                return Err(SchemaError::invalid_definition(
                    &td.name,
                    "the flatten marker is only allowed in Map and Record",
                ));
            }

            let item_type = match &options.rtype {
                Some(rtype) => self.synthesize_enum(rtype)?,
                None => type_ref.to_string(),
            };

            let (type_name, cardinality) = if options.is_repeated() {
                let lo = to_count(options.min.unwrap_or(1)).max(1);
                let hi = match options.max {
                    Some(m) if m > 0 => to_count(m),
                    _ => self.config.max_array,
                };
                if lo > hi {
                    return Err(SchemaError::invalid_definition(
                        &td.name,
                        format!("field {:?}: min {} exceeds max {}", name, lo, hi),
                    ));
                }
                (self.synthesize_array_of(&item_type, lo, hi)?, Some((lo, hi)))
            } else {
                (item_type.clone(), None)
            };

            ct.by_tag.insert(tag, position);
            ct.by_name.insert(name.to_string(), position);
            ct.fields.push(CompiledField {
                def: fd.clone(),
                tag,
                name: name.to_string(),
                optional: options.is_optional(),
                options,
                type_name,
                item_type,
                cardinality,
                selector: None,
                flatten,
            });
        }

        self.check_flattened_keys(td, ct)?;
        self.resolve_selectors(td, ct)
    }

    /// Variants of a flattened Choice share the parent's key space, so their
    /// names and tags must not repeat those of the other fields.
    fn check_flattened_keys(&self, td: &TypeDef, ct: &CompiledType) -> Result<(), SchemaError> {
        let siblings = || ct.fields.iter().filter(|f| !f.flatten);
        for field in ct.fields.iter().filter(|f| f.flatten) {
            let Some(choice) = self.index.get(field.type_name.as_str()) else {
                continue;
            };
            if choice.base_kind != BaseKind::Choice {
                continue;
            }
            for variant in choice.fields.as_deref().unwrap_or(&[]) {
                if siblings().any(|f| f.name == variant.name()) {
                    return Err(SchemaError::DuplicateField {
                        type_name: td.name.clone(),
                        field: variant.name().to_string(),
                    });
                }
                if siblings().any(|f| f.tag == variant.tag()) {
                    return Err(SchemaError::DuplicateTag {
                        type_name: td.name.clone(),
                        tag: variant.tag(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Links every `atfield` option to the sibling it names, by name or tag.
    fn resolve_selectors(&self, td: &TypeDef, ct: &mut CompiledType) -> Result<(), SchemaError> {
        for i in 0..ct.fields.len() {
            let Some(target) = ct.fields[i].options.atfield.clone() else {
                continue;
            };
            let sibling = ct
                .by_name
                .get(&target)
                .or_else(|| target.parse::<Tag>().ok().and_then(|tag| ct.by_tag.get(&tag)))
                .copied()
                .filter(|&j| j != i)
                .ok_or_else(|| SchemaError::UnknownField {
                    type_name: td.name.clone(),
                    field: ct.fields[i].name.clone(),
                    target: target.clone(),
                })?;

            let item_type = &ct.fields[i].item_type;
            let known_kind = match self.index.get(item_type.as_str()) {
                Some(declared) => Some(declared.base_kind),
                None => item_type.parse::<BaseKind>().ok().filter(|k| k.is_primitive()),
            };
            if let Some(kind) = known_kind {
                if kind != BaseKind::Choice {
                    return Err(SchemaError::invalid_definition(
                        &td.name,
                        format!(
                            "field {:?} selects a variant of {}, which is not a Choice",
                            ct.fields[i].name, item_type
                        ),
                    ));
                }
            }
            ct.fields[i].selector = Some(sibling);
        }
        Ok(())
    }

    fn synthesize_array_of(&mut self, item_type: &str, min: usize, max: usize) -> Result<String, SchemaError> {
        let name = self.next_synthetic_name();
        let td = TypeDef::new(name.as_str(), BaseKind::ArrayOf, &[])
            .with_options(vec![format!("*{}", item_type), format!("[{}", min), format!("]{}", max)]);
        self.push_synthesized(td)
    }

    fn synthesize_enum(&mut self, rtype: &str) -> Result<String, SchemaError> {
        let name = self.next_synthetic_name();
        let td = TypeDef::new(name.as_str(), BaseKind::Enumerated, &[])
            .with_options(vec![format!("*{}", rtype)])
            .with_fields(Vec::new());
        self.push_synthesized(td)
    }

    fn push_synthesized(&mut self, td: TypeDef) -> Result<String, SchemaError> {
        let ct = self.compile_type(&td)?;
        let name = ct.name.clone();
        self.synthesized.push(ct);
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(types: serde_json::Value) -> Schema {
        serde_json::from_value(json!({"meta": {"module": "unittests-Compiler"}, "types": types})).unwrap()
    }

    fn compile_verbose(types: serde_json::Value) -> Result<SymbolTable, SchemaError> {
        compile(&schema(types), Profile::VERBOSE, &CodecConfig::default())
    }

    #[test]
    fn test_indexes_fields_by_name_and_tag() {
        let table = compile_verbose(json!([
            ["Rgba", "Map", [], "", [
                [2, "red", "Integer", [], ""],
                [4, "green", "Integer", ["[0"], ""]
            ]]
        ]))
        .unwrap();
        let rgba = table.get("Rgba").unwrap();
        assert_eq!(rgba.field_by_tag(4).unwrap().name, "green");
        assert!(rgba.field_by_name("green").unwrap().optional);
        assert!(!rgba.field_by_name("red").unwrap().optional);
        assert_eq!(rgba.field_key(rgba.field_by_tag(2).unwrap()), "red");
        assert_eq!(rgba.shape, Shape::Mapping);
    }

    #[test]
    fn test_primitives_always_present() {
        let table = compile_verbose(json!([])).unwrap();
        for kind in BaseKind::PRIMITIVES {
            assert!(table.get(kind.as_str()).is_some());
        }
        assert_eq!(table.len(), 6);
        assert_eq!(table.get("String").unwrap().max, Some(255));
    }

    #[test]
    fn test_profile_sets_identifier_style_and_shape() {
        let types = json!([
            ["Rec", "Record", [], "", [[1, "a", "String", [], ""]]],
            ["Menu", "Choice", ["="], "", [[1, "a", "String", [], ""]]]
        ]);
        let verbose = compile_verbose(types.clone()).unwrap();
        assert!(!verbose.get("Rec").unwrap().id_tags);
        assert!(verbose.get("Menu").unwrap().id_tags);

        let minified = compile(&schema(types), Profile::MINIFIED, &CodecConfig::default()).unwrap();
        let rec = minified.get("Rec").unwrap();
        assert!(rec.id_tags);
        assert_eq!(rec.shape, Shape::Sequence);
        assert_eq!(rec.field_by_key("1").unwrap().name, "a");
    }

    #[test]
    fn test_repeated_field_synthesizes_array_of() {
        let table = compile_verbose(json!([
            ["Rec", "Record", [], "", [
                [1, "tags", "String", ["[0", "]0"], ""],
                [2, "pair", "Integer", ["[2", "]3"], ""]
            ]]
        ]))
        .unwrap();
        assert_eq!(table.synthesized_count(), 2);

        let rec = table.get("Rec").unwrap();
        let tags = &rec.fields[0];
        assert!(tags.type_name.starts_with(SYNTHETIC_PREFIX));
        assert_eq!(tags.item_type, "String");
        assert_eq!(tags.cardinality, Some((1, 100)));
        assert!(tags.optional);

        let helper = table.get(&tags.type_name).unwrap();
        assert!(helper.is_synthesized());
        assert_eq!(helper.kind, BaseKind::ArrayOf);
        assert_eq!(helper.options.rtype.as_deref(), Some("String"));
        assert_eq!((helper.min, helper.max), (Some(1), Some(100)));

        let pair = table.get(&rec.fields[1].type_name).unwrap();
        assert_eq!((pair.min, pair.max), (Some(2), Some(3)));
    }

    #[test]
    fn test_derived_enumerations() {
        let table = compile_verbose(json!([
            ["Menu", "Choice", [], "", [
                [1, "color", "String", [], ""],
                [4, "animal", "String", [], ""]
            ]],
            ["MenuKind", "Enumerated", ["*Menu"], "", []],
            ["Order", "Record", [], "", [
                [1, "kind", "Enumerated", ["*Menu"], ""]
            ]]
        ]))
        .unwrap();
        let kind = table.get("MenuKind").unwrap();
        assert_eq!(kind.enum_tags.get("animal"), Some(&4));
        assert_eq!(kind.enum_names.get(&1).map(String::as_str), Some("color"));

        let field = &table.get("Order").unwrap().fields[0];
        let helper = table.get(&field.type_name).unwrap();
        assert_eq!(helper.kind, BaseKind::Enumerated);
        assert_eq!(helper.enum_tags.len(), 2);
    }

    #[test]
    fn test_undeclared_derivation_is_lazy() {
        let table = compile_verbose(json!([["Lost", "Enumerated", ["*Nowhere"], "", []]])).unwrap();
        assert_eq!(table.get("Lost").unwrap().unresolved.as_deref(), Some("Nowhere"));
    }

    #[test]
    fn test_selector_resolution() {
        let table = compile_verbose(json!([
            ["Menu", "Choice", [], "", [[1, "color", "String", [], ""]]],
            ["Pick", "Record", [], "", [
                [1, "type", "Enumerated", ["*Menu"], ""],
                [2, "value", "Menu", ["&type"], ""]
            ]],
            ["ByTag", "Array", [], "", [
                [1, "type", "Integer", [], ""],
                [2, "value", "Menu", ["&1"], ""]
            ]]
        ]))
        .unwrap();
        assert_eq!(table.get("Pick").unwrap().fields[1].selector, Some(0));
        assert_eq!(table.get("ByTag").unwrap().fields[1].selector, Some(0));

        let err = compile_verbose(json!([
            ["Menu", "Choice", [], "", [[1, "color", "String", [], ""]]],
            ["Pick", "Record", [], "", [[1, "value", "Menu", ["&kind"], ""]]]
        ]))
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownField { .. }));

        let err = compile_verbose(json!([
            ["Pick", "Record", [], "", [
                [1, "type", "String", [], ""],
                [2, "value", "Integer", ["&type"], ""]
            ]]
        ]))
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDefinition { .. }));
    }

    #[test]
    fn test_structural_defects() {
        let cases = vec![
            (
                json!([["Pos", "Array", [], "", [[2, "x", "Integer", [], ""]]]]),
                "TagOrdinalMismatch",
            ),
            (
                json!([["Rgba", "Map", [], "", [
                    [2, "red", "Integer", [], ""],
                    [2, "blue", "Integer", [], ""]
                ]]]),
                "DuplicateTag",
            ),
            (
                json!([["Rgba", "Map", [], "", [
                    [2, "red", "Integer", [], ""],
                    [3, "red", "Integer", [], ""]
                ]]]),
                "DuplicateField",
            ),
            (json!([["Dup", "String", [], ""], ["Dup", "Integer", [], ""]]), "DuplicateType"),
            (json!([["$1", "String", [], ""]]), "InvalidTypeName"),
            (json!([["List", "ArrayOf", [], ""]]), "MissingOption"),
            (json!([["Word", "String", ["$[a-"], ""]]), "InvalidPattern"),
            (json!([["Flag", "Boolean", ["[1"], ""]]), "UnsupportedOption"),
            (json!([["Addr", "String", ["@ipv4-net"], ""]]), "UnsupportedFormat"),
            (json!([["Addr", "Binary", [".rot13"], ""]]), "UnsupportedFormat"),
            (json!([["Bad", "String", ["#x"], ""]]), "UnknownOption"),
            (json!([["Rec", "Record", [], ""]]), "InvalidDefinition"),
            (
                json!([["Ch", "Choice", [], "", [[1, "<", "String", [], ""]]]]),
                "InvalidDefinition",
            ),
        ];
        for (types, expected) in cases {
            let err = compile_verbose(types.clone()).unwrap_err();
            let name = format!("{:?}", err);
            assert!(name.starts_with(expected), "{types} -> {name}, expected {expected}");
        }
    }

    #[test]
    fn test_compact_choice_tags_must_be_ordinal() {
        let types = json!([["Ch", "Choice", ["="], "", [[1, "a", "String", [], ""], [4, "b", "String", [], ""]]]]);
        assert!(matches!(
            compile_verbose(types),
            Err(SchemaError::TagOrdinalMismatch { tag: 4, expected: 2, .. })
        ));
        let types = json!([["Ch", "Choice", [], "", [[1, "a", "String", [], ""], [4, "b", "String", [], ""]]]]);
        assert!(compile_verbose(types).is_ok());
    }

    #[test]
    fn test_config_bounds_apply() {
        let config = CodecConfig {
            max_array: 5,
            max_string: 10,
            max_binary: 8,
        };
        let s = schema(json!([
            ["Name", "String", [], ""],
            ["Blob", "Binary", ["]0"], ""],
            ["List", "ArrayOf", ["*Name"], ""]
        ]));
        let table = compile(&s, Profile::VERBOSE, &config).unwrap();
        assert_eq!(table.get("Name").unwrap().max, Some(10));
        assert_eq!(table.get("Blob").unwrap().max, Some(8));
        assert_eq!(table.get("List").unwrap().max, Some(5));
        assert_eq!(table.get("List").unwrap().min, Some(1));
    }
}
