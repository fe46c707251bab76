use thiserror::Error;

/// Failures of a single encode or decode call.
///
/// Every variant names the type being processed when the failure occurred.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("{type_name}: expected {expected}, found {found}")]
    TypeMismatch {
        type_name: String,
        expected: &'static str,
        found: String,
    },

    #[error("{type_name}: {message}")]
    RangeError { type_name: String, message: String },

    #[error("{type_name}: missing required field {field:?}")]
    MissingField { type_name: String, field: String },

    #[error("{type_name}: unexpected field {field:?}")]
    UnexpectedField { type_name: String, field: String },

    #[error("{type_name}: invalid choice: {message}")]
    InvalidChoice { type_name: String, message: String },

    #[error("{type_name}: {value} is not a valid variant")]
    UnknownVariant { type_name: String, value: String },

    #[error("{type_name}: {value} is not a valid {format}")]
    FormatConstraintViolation {
        type_name: String,
        format: String,
        value: String,
    },

    #[error("{type_name}: conversion failed: {message}")]
    FormatConversionError { type_name: String, message: String },

    #[error("Unknown type: {type_name}")]
    UnknownType { type_name: String },
}

impl CodecError {
    pub fn type_mismatch<S: Into<String>>(type_name: &str, expected: &'static str, found: S) -> Self {
        Self::TypeMismatch {
            type_name: type_name.to_string(),
            expected,
            found: found.into(),
        }
    }

    pub fn range<S: Into<String>>(type_name: &str, message: S) -> Self {
        Self::RangeError {
            type_name: type_name.to_string(),
            message: message.into(),
        }
    }

    pub fn missing_field<S: Into<String>>(type_name: &str, field: S) -> Self {
        Self::MissingField {
            type_name: type_name.to_string(),
            field: field.into(),
        }
    }

    pub fn unexpected_field<S: Into<String>>(type_name: &str, field: S) -> Self {
        Self::UnexpectedField {
            type_name: type_name.to_string(),
            field: field.into(),
        }
    }

    pub fn invalid_choice<S: Into<String>>(type_name: &str, message: S) -> Self {
        Self::InvalidChoice {
            type_name: type_name.to_string(),
            message: message.into(),
        }
    }

    pub fn unknown_variant<S: Into<String>>(type_name: &str, value: S) -> Self {
        Self::UnknownVariant {
            type_name: type_name.to_string(),
            value: value.into(),
        }
    }

    pub fn conversion<S: Into<String>>(type_name: &str, message: S) -> Self {
        Self::FormatConversionError {
            type_name: type_name.to_string(),
            message: message.into(),
        }
    }

    pub fn unknown_type<S: Into<String>>(type_name: S) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
        }
    }

    /// Name of the error kind, independent of its payload.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "TypeMismatch",
            Self::RangeError { .. } => "RangeError",
            Self::MissingField { .. } => "MissingField",
            Self::UnexpectedField { .. } => "UnexpectedField",
            Self::InvalidChoice { .. } => "InvalidChoice",
            Self::UnknownVariant { .. } => "UnknownVariant",
            Self::FormatConstraintViolation { .. } => "FormatConstraintViolation",
            Self::FormatConversionError { .. } => "FormatConversionError",
            Self::UnknownType { .. } => "UnknownType",
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
