// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoder configuration.
//!
//! ```toml
//! date_format = "%d/%m/%Y"
//! max_depth = 128
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{DecodeError, Result};
use crate::schema::check_date_format;

/// Date pattern of the built-in date converter.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Default limit on array/object nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Settings shared by the decoder and encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Pattern for date fields that declare no format of their own
    pub date_format: String,
    /// Maximum array/object nesting before decoding fails
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecoderConfig {
    /// Parse a config from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: DecoderConfig =
            toml::from_str(text).map_err(|e| DecodeError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            DecodeError::invalid_config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Check the date pattern compiles and the depth limit is usable.
    pub fn validate(&self) -> Result<()> {
        check_date_format(&self.date_format).map_err(|_| {
            DecodeError::invalid_config(format!("invalid date_format '{}'", self.date_format))
        })?;
        if self.max_depth == 0 {
            return Err(DecodeError::invalid_config("max_depth must be at least 1"));
        }
        Ok(())
    }

    /// Whether the date pattern differs from the built-in converter's.
    pub fn overrides_date_format(&self) -> bool {
        self.date_format != DEFAULT_DATE_FORMAT
    }
}
