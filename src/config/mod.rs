//! Codec bounds configuration.
//!
//! Schemas may leave sizes unbounded. Each codec carries its own
//! [`CodecConfig`] supplying the limits used in that case, so two codecs
//! built from the same schema can apply different limits.

pub mod error;

pub use error::{ConfigError, ConfigResult};

use crate::constants::{DEFAULT_MAX_ARRAY, DEFAULT_MAX_BINARY, DEFAULT_MAX_STRING};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default size limits applied when a type declares no `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Maximum element count of a sequence
    pub max_array: usize,
    /// Maximum length of a string, in characters
    pub max_string: usize,
    /// Maximum length of a byte buffer
    pub max_binary: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_array: DEFAULT_MAX_ARRAY,
            max_string: DEFAULT_MAX_STRING,
            max_binary: DEFAULT_MAX_BINARY,
        }
    }
}

impl CodecConfig {
    /// Parse a flat TOML table; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: CodecConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded codec config from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for (name, value) in [
            ("max_array", self.max_array),
            ("max_string", self.max_string),
            ("max_binary", self.max_binary),
        ] {
            if value == 0 {
                return Err(ConfigError::validation(format!("{} must be greater than 0", name)));
            }
        }
        Ok(())
    }
}
