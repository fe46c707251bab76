use thiserror::Error;

/// Structural defects detected while compiling a schema.
///
/// These abort construction of a [`crate::Codec`]; no codec is usable in a
/// partially compiled state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Unknown option: {0:?}")]
    UnknownOption(String),

    #[error("Invalid value for option {option} in {token:?}")]
    InvalidOptionValue { option: &'static str, token: String },

    #[error("{type_name}: option {option} is not supported for {context}")]
    UnsupportedOption {
        type_name: String,
        option: &'static str,
        context: String,
    },

    #[error("{type_name}: unsupported format {format:?} for {kind}")]
    UnsupportedFormat {
        type_name: String,
        format: String,
        kind: String,
    },

    #[error("{type_name}: duplicate tag {tag}")]
    DuplicateTag { type_name: String, tag: i64 },

    #[error("{type_name}: duplicate field name {field:?}")]
    DuplicateField { type_name: String, field: String },

    #[error("Duplicate type name: {0}")]
    DuplicateType(String),

    #[error("{type_name}: field {field:?} has tag {tag}, expected {expected}")]
    TagOrdinalMismatch {
        type_name: String,
        field: String,
        tag: i64,
        expected: i64,
    },

    #[error("Invalid type name: {0:?}")]
    InvalidTypeName(String),

    #[error("{type_name}: invalid pattern: {message}")]
    InvalidPattern { type_name: String, message: String },

    #[error("{type_name}: missing required option {option}")]
    MissingOption {
        type_name: String,
        option: &'static str,
    },

    #[error("{type_name}: field {field:?} refers to unknown sibling {target:?}")]
    UnknownField {
        type_name: String,
        field: String,
        target: String,
    },

    #[error("{type_name}: {message}")]
    InvalidDefinition { type_name: String, message: String },
}

impl SchemaError {
    /// Create an invalid definition error with context
    pub fn invalid_definition<S: Into<String>>(type_name: &str, message: S) -> Self {
        Self::InvalidDefinition {
            type_name: type_name.to_string(),
            message: message.into(),
        }
    }
}
