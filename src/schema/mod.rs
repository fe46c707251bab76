//! Schema model and compilation.

pub mod compiler;
pub mod errors;
pub mod options;
pub mod types;

pub use compiler::{compile, CompiledField, CompiledType, Shape, SymbolTable};
pub use errors::SchemaError;
pub use options::{parse_field_options, parse_type_options, FieldOptions, TypeOptions};
pub use types::{BaseKind, FieldDef, ModuleMeta, Schema, Tag, TypeDef};
