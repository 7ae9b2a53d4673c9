//! Configuration module for esg-readiness.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use esg_readiness::config::{AppConfig, ConfigPreset, Validatable};
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::Offline);
//! assert!(!config.analysis.enabled);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .analysis_endpoint("https://analysis.example.com/v1")
//!     .min_score(Some(50.0))
//!     .build();
//! assert!(config.is_valid());
//! ```
//!
//! # Configuration File
//!
//! Place a `.esg-readiness.yaml` file in your project root or `~/.config/esg-readiness/`:
//!
//! ```yaml
//! analysis:
//!   endpoint: https://analysis.example.com/v1
//!   timeout_secs: 20
//! behavior:
//!   min_score: 50
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

// Re-export main types
pub use defaults::{
    ConfigPreset, DEFAULT_ANALYSIS_ENDPOINT, DEFAULT_ANALYSIS_MAX_RETRIES,
    DEFAULT_ANALYSIS_TIMEOUT_SECS,
};
pub use types::{
    AnalysisConfig, AppConfig, AppConfigBuilder, BehaviorConfig, OutputConfig, RegistryConfig,
};
pub use validation::{ConfigError, Validatable, MAX_ANALYSIS_RETRIES};

// Re-export file utilities
pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.esg-readiness.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_json_schema() {
        let schema = generate_json_schema().unwrap();
        assert!(schema.contains("\"analysis\""));
        assert!(schema.contains("timeout_secs"));
        assert!(schema.contains("min_score"));
    }
}
