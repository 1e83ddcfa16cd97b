// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoder configuration.
//!
//! Supports both programmatic and file-based configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default recursion limit for nested data types.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Largest dynamic array count representable as a signed 32-bit length.
pub const MAX_DYNAMIC_LENGTH: usize = i32::MAX as usize;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Padding rule applied before each value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentPolicy {
    /// Align every value to its computed alignment.
    #[default]
    Natural,
    /// No padding; every alignment is 1.
    Packed,
}

/// Decoder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Padding rule.
    #[serde(default)]
    pub alignment: AlignmentPolicy,

    /// Largest accepted dynamic array count, at most [`MAX_DYNAMIC_LENGTH`].
    #[serde(default = "default_max_dynamic_length")]
    pub max_dynamic_length: usize,

    /// Recursion limit for nested data types.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
}

fn default_max_dynamic_length() -> usize {
    MAX_DYNAMIC_LENGTH
}

fn default_max_nesting_depth() -> usize {
    DEFAULT_MAX_NESTING_DEPTH
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            alignment: AlignmentPolicy::Natural,
            max_dynamic_length: default_max_dynamic_length(),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl DecodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration without alignment padding.
    pub fn packed() -> Self {
        Self {
            alignment: AlignmentPolicy::Packed,
            ..Self::default()
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_dynamic_length == 0 {
            return Err(ConfigError::Invalid(
                "max_dynamic_length must be positive".into(),
            ));
        }
        if self.max_dynamic_length > MAX_DYNAMIC_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "max_dynamic_length must not exceed {MAX_DYNAMIC_LENGTH}"
            )));
        }
        if self.max_nesting_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_nesting_depth must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Dynamic count limit in effect, capped at [`MAX_DYNAMIC_LENGTH`] even
    /// for configurations built without [`validate`](Self::validate).
    pub fn effective_max_dynamic_length(&self) -> usize {
        self.max_dynamic_length.min(MAX_DYNAMIC_LENGTH)
    }

    /// Alignment actually applied for a value whose natural alignment is `natural`.
    pub fn effective_alignment(&self, natural: usize) -> usize {
        match self.alignment {
            AlignmentPolicy::Natural => natural,
            AlignmentPolicy::Packed => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DecodeConfig::default();
        assert_eq!(config.alignment, AlignmentPolicy::Natural);
        assert_eq!(config.max_dynamic_length, i32::MAX as usize);
        assert_eq!(config.max_nesting_depth, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
alignment = "packed"
max_dynamic_length = 1024
"#;
        let config = DecodeConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.alignment, AlignmentPolicy::Packed);
        assert_eq!(config.max_dynamic_length, 1024);
        assert_eq!(config.max_nesting_depth, DEFAULT_MAX_NESTING_DEPTH);
        assert_eq!(config.effective_alignment(8), 1);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = DecodeConfig::from_toml_str("").unwrap();
        assert_eq!(config, DecodeConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let config = DecodeConfig {
            max_dynamic_length: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let err = DecodeConfig::from_toml_str("max_nesting_depth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_validate_rejects_unsigned_length_limit() {
        let config = DecodeConfig {
            max_dynamic_length: u32::MAX as usize,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert_eq!(config.effective_max_dynamic_length(), MAX_DYNAMIC_LENGTH);

        let err = DecodeConfig::from_toml_str("max_dynamic_length = 4294967295").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(DecodeConfig::from_toml_str("max_dynamic_length = 2147483647").is_ok());
    }

    #[test]
    fn test_unknown_alignment_is_rejected() {
        let err = DecodeConfig::from_toml_str("alignment = \"loose\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
