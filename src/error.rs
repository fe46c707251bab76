use crate::codec::CodecError;
use crate::config::ConfigError;
use crate::schema::SchemaError;
use std::fmt;

/// Unified error type for the crate.
///
/// Schema defects, per-value codec failures, configuration problems and
/// failures of the surrounding JSON layer all funnel into this type so
/// callers can propagate any of them with `?`.
#[derive(Debug)]
pub enum JadnError {
    /// The schema could not be compiled
    Schema(SchemaError),

    /// A value failed to encode or decode
    Codec(CodecError),

    /// Errors related to configuration
    Config(ConfigError),

    /// Errors related to serialization/deserialization of documents
    Serialization(String),
}

impl fmt::Display for JadnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(err) => write!(f, "Schema error: {}", err),
            Self::Codec(err) => write!(f, "Codec error: {}", err),
            Self::Config(err) => write!(f, "Configuration error: {}", err),
            Self::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for JadnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Schema(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Serialization(_) => None,
        }
    }
}

impl From<SchemaError> for JadnError {
    fn from(error: SchemaError) -> Self {
        JadnError::Schema(error)
    }
}

impl From<CodecError> for JadnError {
    fn from(error: CodecError) -> Self {
        JadnError::Codec(error)
    }
}

impl From<ConfigError> for JadnError {
    fn from(error: ConfigError) -> Self {
        JadnError::Config(error)
    }
}

/// Conversion from serde_json::Error to JadnError
impl From<serde_json::Error> for JadnError {
    fn from(error: serde_json::Error) -> Self {
        JadnError::Serialization(error.to_string())
    }
}

/// Result type alias for operations that can result in a JadnError
pub type JadnResult<T> = Result<T, JadnError>;
