//! Format registry.
//!
//! A static table of named value checkers (the `format` option) and
//! binary to text conversions (the `cvt` option), keyed by name and the
//! base kind they apply to. Lookups happen while a schema is compiled, so an
//! unsupported name is a schema defect rather than a per-value failure.

pub mod checks;
pub mod convert;

use crate::schema::{BaseKind, SchemaError};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// Predicate over the native value of a primitive kind.
#[derive(Clone, Copy)]
pub enum Checker {
    String(fn(&str) -> bool),
    Binary(fn(&[u8]) -> bool),
    Integer(fn(i64) -> bool),
}

/// A named semantic checker.
#[derive(Clone, Copy)]
pub struct FormatCheck {
    pub name: &'static str,
    pub kind: BaseKind,
    pub checker: Checker,
}

pub type TextEncodeFn = fn(&[u8]) -> Result<String, String>;
pub type TextDecodeFn = fn(&str) -> Result<Vec<u8>, String>;
pub type NetEncodeFn = fn(&[u8], i64) -> Result<String, String>;
pub type NetDecodeFn = fn(&str) -> Result<(Vec<u8>, i64), String>;

/// A reversible conversion between a native value and its text form.
#[derive(Clone, Copy)]
pub enum Conversion {
    /// Byte buffer to text, used by Binary types.
    Text { encode: TextEncodeFn, decode: TextDecodeFn },
    /// `[address, prefix length]` to CIDR text, used by Array types.
    Network { encode: NetEncodeFn, decode: NetDecodeFn },
}

#[derive(Clone, Copy)]
pub struct ConversionEntry {
    pub name: &'static str,
    pub kind: BaseKind,
    pub conversion: Conversion,
}

impl fmt::Debug for FormatCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FormatCheck({} for {})", self.name, self.kind)
    }
}

impl fmt::Debug for ConversionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConversionEntry({} for {})", self.name, self.kind)
    }
}

const fn text(name: &'static str, encode: TextEncodeFn, decode: TextDecodeFn) -> ConversionEntry {
    ConversionEntry {
        name,
        kind: BaseKind::Binary,
        conversion: Conversion::Text { encode, decode },
    }
}

const fn network(name: &'static str, encode: NetEncodeFn, decode: NetDecodeFn) -> ConversionEntry {
    ConversionEntry {
        name,
        kind: BaseKind::Array,
        conversion: Conversion::Network { encode, decode },
    }
}

static CHECKS: Lazy<HashMap<&'static str, FormatCheck>> = Lazy::new(|| {
    [
        ("hostname", BaseKind::String, Checker::String(checks::hostname)),
        ("email", BaseKind::String, Checker::String(checks::email)),
        ("uri", BaseKind::String, Checker::String(checks::uri)),
        ("ip-addr", BaseKind::Binary, Checker::Binary(checks::ip_addr)),
        ("mac-addr", BaseKind::Binary, Checker::Binary(checks::mac_addr)),
        ("port", BaseKind::Integer, Checker::Integer(checks::port)),
    ]
    .into_iter()
    .map(|(name, kind, checker)| (name, FormatCheck { name, kind, checker }))
    .collect()
});

static CONVERSIONS: Lazy<HashMap<&'static str, ConversionEntry>> = Lazy::new(|| {
    [
        text("base64url", convert::base64url_encode, convert::base64url_decode),
        text("b", convert::base64url_encode, convert::base64url_decode),
        text("hex", convert::hex_encode, convert::hex_decode),
        text("x", convert::hex_encode, convert::hex_decode),
        text("ip-addr", convert::ip_encode, convert::ip_decode),
        text("ipv4-addr", convert::ipv4_encode, convert::ipv4_decode),
        text("ipv6-addr", convert::ipv6_encode, convert::ipv6_decode),
        network("ipv4-net", convert::ipv4_net_encode, convert::ipv4_net_decode),
        network("ipv6-net", convert::ipv6_net_encode, convert::ipv6_net_decode),
    ]
    .into_iter()
    .map(|entry| (entry.name, entry))
    .collect()
});

/// Resolves the checker named by a `format` option for a type of `kind`.
pub fn lookup(type_name: &str, format: &str, kind: BaseKind) -> Result<&'static FormatCheck, SchemaError> {
    CHECKS
        .get(format)
        .filter(|check| check.kind == kind)
        .ok_or_else(|| SchemaError::UnsupportedFormat {
            type_name: type_name.to_string(),
            format: format.to_string(),
            kind: kind.to_string(),
        })
}

/// Resolves the conversion named by a `cvt` option for a type of `kind`.
pub fn lookup_conversion(type_name: &str, method: &str, kind: BaseKind) -> Result<&'static ConversionEntry, SchemaError> {
    CONVERSIONS
        .get(method)
        .filter(|entry| entry.kind == kind)
        .ok_or_else(|| SchemaError::UnsupportedFormat {
            type_name: type_name.to_string(),
            format: method.to_string(),
            kind: kind.to_string(),
        })
}

/// Names of all registered checkers, sorted.
pub fn format_names() -> Vec<&'static str> {
    let mut names: Vec<_> = CHECKS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Names of all registered conversions, sorted.
pub fn conversion_names() -> Vec<&'static str> {
    let mut names: Vec<_> = CONVERSIONS.keys().copied().collect();
    names.sort_unstable();
    names
}
