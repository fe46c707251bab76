//! Option codec.
//!
//! Type and field options are written in a compact notation: each option is
//! a string whose first character is the option tag and whose remainder is
//! the value, e.g. `"[0"` (min 0), `"*Integer"` (rtype Integer) or `"="`
//! (compact). This module converts between that notation and typed option
//! sets, and knows which options each base kind accepts.

use super::errors::SchemaError;
use super::types::BaseKind;

/// Parsed type-level options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeOptions {
    pub compact: bool,
    pub cvt: Option<String>,
    pub format: Option<String>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub rtype: Option<String>,
    pub pattern: Option<String>,
}

/// Parsed field-level options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOptions {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub atfield: Option<String>,
    pub rtype: Option<String>,
    pub etype: Option<String>,
    pub default: Option<String>,
}

fn split_token(token: &str) -> Result<(char, &str), SchemaError> {
    let mut chars = token.chars();
    let tag = chars
        .next()
        .ok_or_else(|| SchemaError::UnknownOption(token.to_string()))?;
    Ok((tag, chars.as_str()))
}

fn parse_int(option: &'static str, token: &str, value: &str) -> Result<i64, SchemaError> {
    value.parse::<i64>().map_err(|_| SchemaError::InvalidOptionValue {
        option,
        token: token.to_string(),
    })
}

/// Converts a list of type option strings to a [`TypeOptions`].
pub fn parse_type_options<S: AsRef<str>>(tokens: &[S]) -> Result<TypeOptions, SchemaError> {
    let mut opts = TypeOptions::default();
    for token in tokens {
        let token = token.as_ref();
        let (tag, value) = split_token(token)?;
        match tag {
            '=' => opts.compact = true,
            '.' => opts.cvt = Some(value.to_string()),
            '@' => opts.format = Some(value.to_string()),
            '[' => opts.min = Some(parse_int("min", token, value)?),
            ']' => opts.max = Some(parse_int("max", token, value)?),
            '*' => opts.rtype = Some(value.to_string()),
            '$' => opts.pattern = Some(value.to_string()),
            _ => return Err(SchemaError::UnknownOption(token.to_string())),
        }
    }
    Ok(opts)
}

/// Converts a list of field option strings to a [`FieldOptions`].
pub fn parse_field_options<S: AsRef<str>>(tokens: &[S]) -> Result<FieldOptions, SchemaError> {
    let mut opts = FieldOptions::default();
    for token in tokens {
        let token = token.as_ref();
        let (tag, value) = split_token(token)?;
        match tag {
            '[' => opts.min = Some(parse_int("min", token, value)?),
            ']' => opts.max = Some(parse_int("max", token, value)?),
            '&' => opts.atfield = Some(value.to_string()),
            '*' => opts.rtype = Some(value.to_string()),
            '/' => opts.etype = Some(value.to_string()),
            '!' => opts.default = Some(value.to_string()),
            _ => return Err(SchemaError::UnknownOption(token.to_string())),
        }
    }
    Ok(opts)
}

impl TypeOptions {
    /// Names of the options that are set.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.compact {
            names.push("compact");
        }
        if self.cvt.is_some() {
            names.push("cvt");
        }
        if self.format.is_some() {
            names.push("format");
        }
        if self.min.is_some() {
            names.push("min");
        }
        if self.max.is_some() {
            names.push("max");
        }
        if self.rtype.is_some() {
            names.push("rtype");
        }
        if self.pattern.is_some() {
            names.push("pattern");
        }
        names
    }

    /// Converts back to compact option strings.
    pub fn to_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        if self.compact {
            tokens.push("=".to_string());
        }
        if let Some(v) = &self.cvt {
            tokens.push(format!(".{v}"));
        }
        if let Some(v) = &self.format {
            tokens.push(format!("@{v}"));
        }
        if let Some(v) = self.min {
            tokens.push(format!("[{v}"));
        }
        if let Some(v) = self.max {
            tokens.push(format!("]{v}"));
        }
        if let Some(v) = &self.rtype {
            tokens.push(format!("*{v}"));
        }
        if let Some(v) = &self.pattern {
            tokens.push(format!("${v}"));
        }
        tokens
    }
}

impl FieldOptions {
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.min.is_some() {
            names.push("min");
        }
        if self.max.is_some() {
            names.push("max");
        }
        if self.atfield.is_some() {
            names.push("atfield");
        }
        if self.rtype.is_some() {
            names.push("rtype");
        }
        if self.etype.is_some() {
            names.push("etype");
        }
        if self.default.is_some() {
            names.push("default");
        }
        names
    }

    pub fn to_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        if let Some(v) = self.min {
            tokens.push(format!("[{v}"));
        }
        if let Some(v) = self.max {
            tokens.push(format!("]{v}"));
        }
        if let Some(v) = &self.atfield {
            tokens.push(format!("&{v}"));
        }
        if let Some(v) = &self.rtype {
            tokens.push(format!("*{v}"));
        }
        if let Some(v) = &self.etype {
            tokens.push(format!("/{v}"));
        }
        if let Some(v) = &self.default {
            tokens.push(format!("!{v}"));
        }
        tokens
    }

    /// A field is optional when its minimum cardinality is 0.
    pub fn is_optional(&self) -> bool {
        self.min == Some(0)
    }

    /// A field repeats when its maximum cardinality is anything but 1.
    pub fn is_repeated(&self) -> bool {
        matches!(self.max, Some(max) if max != 1)
    }
}

/// Type options accepted by each base kind.
pub fn supported_type_options(kind: BaseKind) -> &'static [&'static str] {
    match kind {
        BaseKind::Binary => &["min", "max", "format", "cvt"],
        BaseKind::Boolean => &[],
        BaseKind::Integer => &["min", "max", "format"],
        BaseKind::Number => &["min", "max", "format"],
        BaseKind::Null => &[],
        BaseKind::String => &["min", "max", "pattern", "format"],
        BaseKind::Array => &["min", "max", "cvt"],
        BaseKind::ArrayOf => &["min", "max", "rtype"],
        BaseKind::Choice => &["compact"],
        BaseKind::Enumerated => &["compact", "rtype"],
        BaseKind::Map => &["compact", "min", "max"],
        BaseKind::Record => &["compact", "min", "max"],
    }
}

/// Rejects any type option outside the set supported by `kind`.
pub fn check_type_options(type_name: &str, kind: BaseKind, opts: &TypeOptions) -> Result<(), SchemaError> {
    let allowed = supported_type_options(kind);
    match opts.names().into_iter().find(|name| !allowed.contains(name)) {
        Some(option) => Err(SchemaError::UnsupportedOption {
            type_name: type_name.to_string(),
            option,
            context: kind.to_string(),
        }),
        None => Ok(()),
    }
}

/// Rejects field options that do not apply to the field's position.
///
/// `rtype` is only meaningful on an inline `Enumerated` field and `atfield`
/// only inside positional or keyed containers.
pub fn check_field_options(
    type_name: &str,
    parent: BaseKind,
    field_name: &str,
    field_type: &str,
    opts: &FieldOptions,
) -> Result<(), SchemaError> {
    let unsupported = |option: &'static str| SchemaError::UnsupportedOption {
        type_name: type_name.to_string(),
        option,
        context: format!("field {field_name:?} ({field_type})"),
    };
    if opts.rtype.is_some() && field_type != BaseKind::Enumerated.as_str() {
        return Err(unsupported("rtype"));
    }
    if opts.atfield.is_some() && !matches!(parent, BaseKind::Array | BaseKind::Map | BaseKind::Record) {
        return Err(unsupported("atfield"));
    }
    Ok(())
}
