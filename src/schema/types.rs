//! Type model for JADN schema documents.
//!
//! A schema is module metadata plus an ordered list of type definitions.
//! Definitions (de)serialize from the compact list notation used by schema
//! files, e.g. `["Color", "Enumerated", [], "", [[1, "red", ""]]]`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Integer identifier of a field or enumerated item.
pub type Tag = i64;

/// A complete schema: module metadata and type definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub meta: ModuleMeta,
    pub types: Vec<TypeDef>,
}

impl Schema {
    pub fn new(module: impl Into<String>, types: Vec<TypeDef>) -> Self {
        Self {
            meta: ModuleMeta::new(module),
            types,
        }
    }

    /// Returns the definition with the given name, if declared.
    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.name == name)
    }
}

/// Module-level metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModuleMeta {
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `(namespace-id, module-name)` pairs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exports: Vec<String>,
}

impl ModuleMeta {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            ..Self::default()
        }
    }
}

/// Built-in base kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseKind {
    Binary,
    Boolean,
    Integer,
    Number,
    Null,
    String,
    Array,
    ArrayOf,
    Choice,
    Enumerated,
    Map,
    Record,
}

impl BaseKind {
    pub const PRIMITIVES: [BaseKind; 6] = [
        BaseKind::Binary,
        BaseKind::Boolean,
        BaseKind::Integer,
        BaseKind::Number,
        BaseKind::Null,
        BaseKind::String,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::Boolean => "Boolean",
            Self::Integer => "Integer",
            Self::Number => "Number",
            Self::Null => "Null",
            Self::String => "String",
            Self::Array => "Array",
            Self::ArrayOf => "ArrayOf",
            Self::Choice => "Choice",
            Self::Enumerated => "Enumerated",
            Self::Map => "Map",
            Self::Record => "Record",
        }
    }

    pub fn is_primitive(self) -> bool {
        Self::PRIMITIVES.contains(&self)
    }

    pub fn is_structured(self) -> bool {
        !self.is_primitive()
    }

    /// Whether a definition of this kind must carry a field list.
    pub fn requires_fields(self) -> bool {
        self.is_structured() && self != Self::ArrayOf
    }
}

impl fmt::Display for BaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Binary" => Self::Binary,
            "Boolean" => Self::Boolean,
            "Integer" => Self::Integer,
            "Number" => Self::Number,
            "Null" => Self::Null,
            "String" => Self::String,
            "Array" => Self::Array,
            "ArrayOf" => Self::ArrayOf,
            "Choice" => Self::Choice,
            "Enumerated" => Self::Enumerated,
            "Map" => Self::Map,
            "Record" => Self::Record,
            other => return Err(format!("unknown base type: {other}")),
        })
    }
}

/// A single type definition.
///
/// Options are kept in their compact string notation; the compiler parses
/// them with [`crate::schema::options`].
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub base_kind: BaseKind,
    pub options: Vec<String>,
    pub description: String,
    pub fields: Option<Vec<FieldDef>>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>, base_kind: BaseKind, options: &[&str]) -> Self {
        Self {
            name: name.into(),
            base_kind,
            options: options.iter().map(|o| o.to_string()).collect(),
            description: String::new(),
            fields: None,
        }
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldDef>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A field of a structured type, or an item of an Enumerated type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDef {
    /// `[tag, name, description]`
    Item {
        tag: Tag,
        name: String,
        description: String,
    },
    /// `[tag, name, type, [options], description]`
    Field {
        tag: Tag,
        name: String,
        type_ref: String,
        options: Vec<String>,
        description: String,
    },
}

impl FieldDef {
    pub fn item(tag: Tag, name: impl Into<String>) -> Self {
        Self::Item {
            tag,
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn field(tag: Tag, name: impl Into<String>, type_ref: impl Into<String>, options: &[&str]) -> Self {
        Self::Field {
            tag,
            name: name.into(),
            type_ref: type_ref.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            description: String::new(),
        }
    }

    pub fn tag(&self) -> Tag {
        match self {
            Self::Item { tag, .. } | Self::Field { tag, .. } => *tag,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Item { name, .. } | Self::Field { name, .. } => name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Item { description, .. } | Self::Field { description, .. } => description,
        }
    }

    /// Declared type of a field; `None` for enumerated items.
    pub fn type_ref(&self) -> Option<&str> {
        match self {
            Self::Item { .. } => None,
            Self::Field { type_ref, .. } => Some(type_ref),
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            Self::Item { .. } => &[],
            Self::Field { options, .. } => options,
        }
    }
}

// Compact list notation

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawTypeDef {
    Structured(String, String, Vec<String>, String, Vec<FieldDef>),
    Primitive(String, String, Vec<String>, String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawFieldDef {
    Field(Tag, String, String, Vec<String>, String),
    Item(Tag, String, String),
}

impl Serialize for TypeDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let raw = match &self.fields {
            Some(fields) => RawTypeDef::Structured(
                self.name.clone(),
                self.base_kind.to_string(),
                self.options.clone(),
                self.description.clone(),
                fields.clone(),
            ),
            None => RawTypeDef::Primitive(
                self.name.clone(),
                self.base_kind.to_string(),
                self.options.clone(),
                self.description.clone(),
            ),
        };
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TypeDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (name, base, options, description, fields) = match RawTypeDef::deserialize(deserializer)? {
            RawTypeDef::Structured(n, b, o, d, f) => (n, b, o, d, Some(f)),
            RawTypeDef::Primitive(n, b, o, d) => (n, b, o, d, None),
        };
        let base_kind = base.parse::<BaseKind>().map_err(D::Error::custom)?;
        Ok(Self {
            name,
            base_kind,
            options,
            description,
            fields,
        })
    }
}

impl Serialize for FieldDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let raw = match self.clone() {
            Self::Item {
                tag,
                name,
                description,
            } => RawFieldDef::Item(tag, name, description),
            Self::Field {
                tag,
                name,
                type_ref,
                options,
                description,
            } => RawFieldDef::Field(tag, name, type_ref, options, description),
        };
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawFieldDef::deserialize(deserializer)? {
            RawFieldDef::Field(tag, name, type_ref, options, description) => Self::Field {
                tag,
                name,
                type_ref,
                options,
                description,
            },
            RawFieldDef::Item(tag, name, description) => Self::Item {
                tag,
                name,
                description,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_from_list_notation() {
        let doc = json!({
            "meta": {"module": "unittests-Types", "exports": ["Color"]},
            "types": [
                ["Name", "String", ["[1", "]32"], "a short name"],
                ["Color", "Enumerated", [], "", [
                    [1, "red", ""],
                    [2, "green", ""]
                ]],
                ["Point", "Record", [], "", [
                    [1, "x", "Integer", [], ""],
                    [2, "y", "Integer", ["[0"], "optional"]
                ]]
            ]
        });

        let schema: Schema = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(schema.meta.module, "unittests-Types");
        assert_eq!(schema.types.len(), 3);
        assert_eq!(schema.types[0].base_kind, BaseKind::String);
        assert!(schema.types[0].fields.is_none());

        let color = schema.get_type("Color").unwrap();
        let items = color.fields.as_ref().unwrap();
        assert_eq!(items[1], FieldDef::item(2, "green"));

        let point = schema.get_type("Point").unwrap();
        let y = &point.fields.as_ref().unwrap()[1];
        assert_eq!(y.type_ref(), Some("Integer"));
        assert_eq!(y.options(), ["[0".to_string()]);
        assert_eq!(y.description(), "optional");

        assert_eq!(serde_json::to_value(&schema).unwrap(), doc);
    }

    #[test]
    fn test_unknown_base_kind_rejected() {
        let doc = json!(["Thing", "Tuple", [], ""]);
        assert!(serde_json::from_value::<TypeDef>(doc).is_err());
    }

    #[test]
    fn test_base_kind_families() {
        assert!(BaseKind::Binary.is_primitive());
        assert!(BaseKind::ArrayOf.is_structured());
        assert!(!BaseKind::ArrayOf.requires_fields());
        assert!(BaseKind::Record.requires_fields());
        assert_eq!("Choice".parse::<BaseKind>().unwrap(), BaseKind::Choice);
    }
}
