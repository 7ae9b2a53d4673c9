//! Configuration types for esg-readiness operations.

use super::defaults::{
    DEFAULT_ANALYSIS_ENDPOINT, DEFAULT_ANALYSIS_MAX_RETRIES, DEFAULT_ANALYSIS_TIMEOUT_SECS,
};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// It can be constructed from CLI arguments, config files, or both
/// (with CLI overriding file settings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// External analysis service
    pub analysis: AnalysisConfig,
    /// Framework and mapping sources
    pub registry: RegistryConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Client configuration for the HTTP analysis service.
    #[cfg(feature = "analysis")]
    #[must_use]
    pub fn analysis_client_config(&self) -> crate::analysis::AnalysisClientConfig {
        crate::analysis::AnalysisClientConfig {
            endpoint: self.analysis.endpoint.clone(),
            timeout: std::time::Duration::from_secs(self.analysis.timeout_secs),
            max_retries: self.analysis.max_retries,
            api_key: self.analysis.api_key.clone(),
        }
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Enable or disable the external analysis service.
    pub const fn analysis_enabled(mut self, enabled: bool) -> Self {
        self.config.analysis.enabled = enabled;
        self
    }

    /// Set the analysis endpoint.
    pub fn analysis_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.analysis.endpoint = endpoint.into();
        self
    }

    /// Set the analysis request timeout in seconds.
    pub const fn analysis_timeout_secs(mut self, secs: u64) -> Self {
        self.config.analysis.timeout_secs = secs;
        self
    }

    /// Set the maximum number of retries.
    pub const fn analysis_max_retries(mut self, retries: u8) -> Self {
        self.config.analysis.max_retries = retries;
        self
    }

    /// Load frameworks from a file instead of the built-in set.
    pub fn frameworks_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.registry.frameworks_file = file;
        self
    }

    /// Load mapping tables from a file instead of the built-in set.
    pub fn mappings_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.registry.mappings_file = file;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Fail with exit code 1 when the overall score is below this value.
    pub const fn min_score(mut self, min_score: Option<f64>) -> Self {
        self.config.behavior.min_score = min_score;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sub-configuration Types
// ============================================================================

/// External analysis service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Call the analysis service on submit; when false, local scores are reported
    pub enabled: bool,
    /// Endpoint receiving the normalized request (http or https)
    pub endpoint: String,
    /// Request timeout in seconds
    #[schemars(range(min = 1))]
    pub timeout_secs: u64,
    /// Retries after a failed request (exponential backoff)
    #[schemars(range(max = 10))]
    pub max_retries: u8,
    /// API key sent as `x-api-key`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_ANALYSIS_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_ANALYSIS_TIMEOUT_SECS,
            max_retries: DEFAULT_ANALYSIS_MAX_RETRIES,
            api_key: None,
        }
    }
}

/// Framework and mapping sources. Unset paths use the built-in definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RegistryConfig {
    /// Framework definitions (YAML or JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frameworks_file: Option<PathBuf>,
    /// Mapping tables (YAML)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings_file: Option<PathBuf>,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Auto,
            file: None,
            no_color: false,
        }
    }
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Suppress non-essential output
    pub quiet: bool,
    /// Exit with code 1 if the overall score is below this value
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 100.0))]
    pub min_score: Option<f64>,
}
