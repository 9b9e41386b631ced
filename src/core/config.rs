//! Conversion configuration with documented constants
//!
//! Limits and file names the conversion depends on live here so the
//! binary can override them from a TOML file.

use crate::core::error::{Result, RicoError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional companion features that unlock specialised item classes.
///
/// Detected by the environment and handed to the resolver; never queried from inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Eco residential, eco commercial and high-tech office classes
    pub eco_specialization: bool,
    /// Tourist and leisure commercial classes
    pub tourism_leisure: bool,
}

impl Capabilities {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            eco_specialization: true,
            tourism_leisure: true,
        }
    }
}

/// Configuration for settings loading and conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RicoConfig {
    // === GROWABLE LIMITS ===
    /// Largest width (grid cells) a growable building may have
    ///
    /// Zoned lots are at most 4 cells wide; anything larger can never spawn.
    pub max_growable_width: u32,

    /// Largest length (grid cells) a growable building may have
    pub max_growable_length: u32,

    // === BUILDING PARAMETERS ===
    /// Construction time given to ploppable private buildings
    ///
    /// Must be non-zero: timing-dependent consumers divide by it.
    pub ploppable_construction_time: u32,

    /// Construction cost used when a settings entry omits one
    pub default_construction_cost: u32,

    // === SETTINGS FILES ===
    /// File name of the user's local override settings
    pub local_settings_file: String,

    /// File name of author settings shipped next to an asset package
    pub definition_file_name: String,

    // === PARALLELIZATION ===
    /// Minimum number of settings sources before validation runs in parallel
    pub parallel_threshold: usize,

    // === ENVIRONMENT ===
    /// Companion features available in this run
    pub capabilities: Capabilities,
}

impl Default for RicoConfig {
    fn default() -> Self {
        Self {
            max_growable_width: 4,
            max_growable_length: 4,

            ploppable_construction_time: 30,
            default_construction_cost: 10,

            local_settings_file: "LocalRICOSettings.xml".to_string(),
            definition_file_name: "PloppableRICODefinition.xml".to_string(),

            parallel_threshold: 16,

            capabilities: Capabilities::default(),
        }
    }
}

impl RicoConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; absent keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a config from a TOML string and validate it
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: RicoConfig = toml::from_str(content)?;
        config.validate().map_err(RicoError::ConfigError)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_growable_width == 0 || self.max_growable_length == 0 {
            return Err(format!(
                "growable limits must be positive (width {}, length {})",
                self.max_growable_width, self.max_growable_length
            ));
        }

        if self.ploppable_construction_time == 0 {
            return Err("ploppable_construction_time must be non-zero".into());
        }

        if self.local_settings_file.is_empty() || self.definition_file_name.is_empty() {
            return Err("settings file names must not be empty".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RicoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_growable_width, 4);
        assert_eq!(config.ploppable_construction_time, 30);
        assert_eq!(config.capabilities, Capabilities::none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RicoConfig::parse_toml(
            r#"
max_growable_width = 6

[capabilities]
eco_specialization = true
"#,
        )
        .unwrap();

        assert_eq!(config.max_growable_width, 6);
        assert_eq!(config.max_growable_length, 4);
        assert!(config.capabilities.eco_specialization);
        assert!(!config.capabilities.tourism_leisure);
        assert_eq!(config.definition_file_name, "PloppableRICODefinition.xml");
    }

    #[test]
    fn test_zero_construction_time_rejected() {
        let result = RicoConfig::parse_toml("ploppable_construction_time = 0");
        assert!(matches!(result, Err(RicoError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let result = RicoConfig::parse_toml("max_growable_width = \"wide\"");
        assert!(matches!(result, Err(RicoError::TomlError(_))));
    }
}
