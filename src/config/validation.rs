//! Configuration validation for esg-readiness.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AnalysisConfig, AppConfig, BehaviorConfig, OutputConfig, RegistryConfig};

/// Upper bound on analysis retries.
pub const MAX_ANALYSIS_RETRIES: u8 = 10;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.analysis.validate());
        errors.extend(self.registry.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for AnalysisConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Endpoint only matters when the service is actually called
        if self.enabled
            && !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://"))
        {
            errors.push(ConfigError::new(
                "analysis.endpoint",
                format!(
                    "Endpoint must be an http(s) URL, got '{}'",
                    self.endpoint
                ),
            ));
        }

        if self.timeout_secs == 0 {
            errors.push(ConfigError::new(
                "analysis.timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }

        if self.max_retries > MAX_ANALYSIS_RETRIES {
            errors.push(ConfigError::new(
                "analysis.max_retries",
                format!(
                    "Max retries must be at most {}, got {}",
                    MAX_ANALYSIS_RETRIES, self.max_retries
                ),
            ));
        }

        errors
    }
}

impl Validatable for RegistryConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (field, path) in [
            ("registry.frameworks_file", &self.frameworks_file),
            ("registry.mappings_file", &self.mappings_file),
        ] {
            if let Some(path) = path {
                if !path.exists() {
                    errors.push(ConfigError::new(
                        field,
                        format!("File does not exist: {}", path.display()),
                    ));
                }
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Validate output file path if specified
        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(min_score) = self.min_score {
            if !(0.0..=100.0).contains(&min_score) {
                errors.push(ConfigError::new(
                    "behavior.min_score",
                    format!("Minimum score must be between 0 and 100, got {min_score}"),
                ));
            }
        }
        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
