//! Common constants used across the codec.
//!
//! These defaults are used for sequence, string and binary bounds
//! when a schema does not declare an explicit `max`.
pub const DEFAULT_MAX_ARRAY: usize = 100;
pub const DEFAULT_MAX_STRING: usize = 255;
pub const DEFAULT_MAX_BINARY: usize = 3276;

/// Field name that splices a Choice's single key/value into the parent.
pub const FLATTEN_MARKER: &str = "<";

/// Prefix of compiler-generated type names. Not allowed in schema type names.
pub const SYNTHETIC_PREFIX: &str = "$";

/// Binary-to-text conversion used when a Binary type has no `cvt` option.
pub const DEFAULT_BINARY_CONVERSION: &str = "base64url";
