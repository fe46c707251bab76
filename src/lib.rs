//! # jadn
//!
//! A schema-driven structural codec. A [`Schema`] of primitive and
//! structured type definitions is compiled once into a symbol table; a
//! [`Codec`] then converts between native [`ApiValue`]s and JSON documents
//! under a verbose, concise or minified [`Profile`].
//!
//! ```
//! use jadn::{ApiValue, Codec, Schema};
//! use serde_json::json;
//!
//! let schema: Schema = serde_json::from_value(json!({
//!     "meta": {"module": "example"},
//!     "types": [
//!         ["Point", "Record", [], "", [
//!             [1, "x", "Integer", [], ""],
//!             [2, "y", "Integer", [], ""]
//!         ]]
//!     ]
//! })).unwrap();
//!
//! let point = ApiValue::map([("x", 3), ("y", 4)]);
//! let verbose = Codec::new(schema.clone(), true, true).unwrap();
//! assert_eq!(verbose.encode("Point", &point).unwrap(), json!({"x": 3, "y": 4}));
//!
//! let minified = Codec::new(schema, false, false).unwrap();
//! assert_eq!(minified.encode("Point", &point).unwrap(), json!([3, 4]));
//! ```

pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod schema;

pub use codec::{ApiValue, Codec, CodecError, CodecResult, Key, Profile};
pub use config::{CodecConfig, ConfigError};
pub use error::{JadnError, JadnResult};
pub use schema::{BaseKind, FieldDef, ModuleMeta, Schema, SchemaError, TypeDef};
