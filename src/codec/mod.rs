//! Codec engine.
//!
//! A [`Codec`] owns a compiled [`SymbolTable`] and converts between
//! [`ApiValue`]s and serialized [`serde_json::Value`]s. Every entry point
//! looks up the compiled type and calls the encode/decode function selected
//! for its kind at compile time; those functions recurse back through the
//! codec for nested types.

pub mod error;
pub(crate) mod primitive;
pub(crate) mod record;
pub(crate) mod selector;
pub(crate) mod structure;
pub mod value;

pub use error::{CodecError, CodecResult};
pub use value::{ApiValue, Key};

use log::{info, trace};
use serde_json::Value;

use crate::config::CodecConfig;
use crate::schema::{compile, CompiledType, Schema, SchemaError, SymbolTable};

pub type EncodeFn = fn(&Codec, &CompiledType, &ApiValue) -> CodecResult<Value>;
pub type DecodeFn = fn(&Codec, &CompiledType, &Value) -> CodecResult<ApiValue>;

/// Serialization profile: structure shape and identifier shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    /// Records serialize as mappings rather than positional sequences
    pub verbose_records: bool,
    /// Identifiers serialize as names rather than tags
    pub verbose_identifiers: bool,
}

impl Profile {
    pub const VERBOSE: Profile = Profile::new(true, true);
    pub const CONCISE: Profile = Profile::new(false, true);
    pub const MINIFIED: Profile = Profile::new(false, false);

    pub const fn new(verbose_records: bool, verbose_identifiers: bool) -> Self {
        Self {
            verbose_records,
            verbose_identifiers,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::VERBOSE
    }
}

/// Schema-driven encoder/decoder.
#[derive(Debug)]
pub struct Codec {
    schema: Schema,
    config: CodecConfig,
    symbols: SymbolTable,
}

impl Codec {
    /// Compiles `schema` with the default bounds.
    pub fn new(schema: Schema, verbose_records: bool, verbose_identifiers: bool) -> Result<Self, SchemaError> {
        Self::with_config(
            schema,
            Profile::new(verbose_records, verbose_identifiers),
            CodecConfig::default(),
        )
    }

    pub fn with_config(schema: Schema, profile: Profile, config: CodecConfig) -> Result<Self, SchemaError> {
        let symbols = compile(&schema, profile, &config)?;
        Ok(Self {
            schema,
            config,
            symbols,
        })
    }

    /// Rebuilds the symbol table for another profile.
    ///
    /// On failure the codec keeps its previous table.
    pub fn set_profile(&mut self, verbose_records: bool, verbose_identifiers: bool) -> Result<(), SchemaError> {
        let profile = Profile::new(verbose_records, verbose_identifiers);
        self.symbols = compile(&self.schema, profile, &self.config)?;
        info!("Codec for '{}' switched to profile {:?}", self.schema.meta.module, profile);
        Ok(())
    }

    pub fn profile(&self) -> Profile {
        self.symbols.profile
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Names of every resolvable type, including synthesized ones.
    pub fn type_names(&self) -> Vec<&str> {
        self.symbols.names()
    }

    /// Serializes an API value of type `type_name`.
    pub fn encode(&self, type_name: &str, value: &ApiValue) -> CodecResult<Value> {
        let ct = self.lookup(type_name)?;
        trace!("encode {} ({})", ct.name, ct.kind);
        (ct.encode)(self, ct, value)
    }

    /// Deserializes a value of type `type_name`.
    pub fn decode(&self, type_name: &str, value: &Value) -> CodecResult<ApiValue> {
        let ct = self.lookup(type_name)?;
        trace!("decode {} ({})", ct.name, ct.kind);
        (ct.decode)(self, ct, value)
    }

    pub fn lookup(&self, type_name: &str) -> CodecResult<&CompiledType> {
        let ct = self
            .symbols
            .get(type_name)
            .ok_or_else(|| CodecError::unknown_type(type_name))?;
        match &ct.unresolved {
            Some(missing) => Err(CodecError::unknown_type(missing.as_str())),
            None => Ok(ct),
        }
    }
}

/// Short name of a serialized value's variant, used in error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
