//! In-memory API values.

use std::collections::BTreeMap;
use std::fmt;

use crate::schema::Tag;

/// Key of an API mapping: a field name, or a tag for `compact` choices.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Tag(Tag),
    Name(String),
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<Tag> for Key {
    fn from(tag: Tag) -> Self {
        Key::Tag(tag)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Tag(tag) => write!(f, "{}", tag),
            Key::Name(name) => f.write_str(name),
        }
    }
}

/// A native value on the application side of the codec.
///
/// `Null` inside an `Array` marks an absent optional position.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiValue {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    String(String),
    Binary(Vec<u8>),
    Array(Vec<ApiValue>),
    Map(BTreeMap<Key, ApiValue>),
}

impl ApiValue {
    /// Builds a mapping from key/value pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<Key>,
        V: Into<ApiValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        ApiValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ApiValue::Null => "null",
            ApiValue::Bool(_) => "boolean",
            ApiValue::Integer(_) => "integer",
            ApiValue::Number(_) => "number",
            ApiValue::String(_) => "string",
            ApiValue::Binary(_) => "binary",
            ApiValue::Array(_) => "array",
            ApiValue::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ApiValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ApiValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ApiValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ApiValue]> {
        match self {
            ApiValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<Key, ApiValue>> {
        match self {
            ApiValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a mapping entry by key.
    pub fn get<K: Into<Key>>(&self, key: K) -> Option<&ApiValue> {
        self.as_map().and_then(|m| m.get(&key.into()))
    }
}

impl From<bool> for ApiValue {
    fn from(v: bool) -> Self {
        ApiValue::Bool(v)
    }
}

impl From<i64> for ApiValue {
    fn from(v: i64) -> Self {
        ApiValue::Integer(v)
    }
}

impl From<i32> for ApiValue {
    fn from(v: i32) -> Self {
        ApiValue::Integer(v.into())
    }
}

impl From<f64> for ApiValue {
    fn from(v: f64) -> Self {
        ApiValue::Number(v)
    }
}

impl From<&str> for ApiValue {
    fn from(v: &str) -> Self {
        ApiValue::String(v.to_string())
    }
}

impl From<String> for ApiValue {
    fn from(v: String) -> Self {
        ApiValue::String(v)
    }
}

impl From<Vec<u8>> for ApiValue {
    fn from(v: Vec<u8>) -> Self {
        ApiValue::Binary(v)
    }
}

impl From<&[u8]> for ApiValue {
    fn from(v: &[u8]) -> Self {
        ApiValue::Binary(v.to_vec())
    }
}

impl From<Vec<ApiValue>> for ApiValue {
    fn from(v: Vec<ApiValue>) -> Self {
        ApiValue::Array(v)
    }
}

impl From<BTreeMap<Key, ApiValue>> for ApiValue {
    fn from(v: BTreeMap<Key, ApiValue>) -> Self {
        ApiValue::Map(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_builder_and_accessors() {
        let v = ApiValue::map([("red", 255), ("green", 0)]);
        assert_eq!(v.get("red"), Some(&ApiValue::Integer(255)));
        assert_eq!(v.get("blue"), None);
        assert_eq!(v.kind_name(), "map");

        let tagged = ApiValue::map([(4_i64, ApiValue::from("x"))]);
        assert_eq!(tagged.get(4_i64).and_then(ApiValue::as_str), Some("x"));
    }

    #[test]
    fn test_keys_order_and_display() {
        let mut keys = vec![Key::from("b"), Key::from(2_i64), Key::from("a")];
        keys.sort();
        assert_eq!(keys, vec![Key::Tag(2), Key::from("a"), Key::from("b")]);
        assert_eq!(Key::Tag(7).to_string(), "7");
        assert_eq!(Key::from("seven").to_string(), "seven");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(ApiValue::from(vec![0xc6_u8, 2]), ApiValue::Binary(vec![0xc6, 2]));
        assert_eq!(ApiValue::from(3), ApiValue::Integer(3));
        assert!(ApiValue::Null.is_null());
        assert_eq!(ApiValue::from(vec![ApiValue::from(true)]).as_array().map(<[_]>::len), Some(1));
    }
}
