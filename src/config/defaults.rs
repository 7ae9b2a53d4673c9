//! Default configurations and presets for esg-readiness.
//!
//! Provides named presets for common use cases and default values.

use super::types::{AnalysisConfig, AppConfig, BehaviorConfig, OutputConfig, RegistryConfig};
use crate::reports::ReportFormat;
use crate::scoring::PROGRESSING_THRESHOLD;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Call the analysis service, human-readable output
    Default,
    /// Never call the analysis service; report local scores only
    Offline,
    /// CI/CD: JSON output, quiet, fail below the progressing band
    CiCd,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Offline => "offline",
            Self::CiCd => "ci-cd",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "offline" | "local" => Some(Self::Offline),
            "ci-cd" | "ci" | "pipeline" => Some(Self::CiCd),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Submit to the analysis service and print a readable summary",
            Self::Offline => "Score locally without contacting the analysis service",
            Self::CiCd => "JSON output that fails below the progressing band",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Offline, Self::CiCd]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Offline => Self::offline_preset(),
            ConfigPreset::CiCd => Self::ci_cd_preset(),
        }
    }

    /// Offline preset: analysis disabled, every submission uses local scores.
    #[must_use]
    pub fn offline_preset() -> Self {
        Self {
            analysis: AnalysisConfig {
                enabled: false,
                ..AnalysisConfig::default()
            },
            ..Self::default()
        }
    }

    /// CI/CD pipeline preset.
    ///
    /// - JSON output for machine parsing
    /// - Quiet mode to reduce noise
    /// - Exit code 1 below the progressing threshold
    #[must_use]
    pub fn ci_cd_preset() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            registry: RegistryConfig::default(),
            output: OutputConfig {
                format: ReportFormat::Json,
                file: None,
                no_color: true,
            },
            behavior: BehaviorConfig {
                quiet: true,
                min_score: Some(PROGRESSING_THRESHOLD),
            },
        }
    }
}

// ============================================================================
// Default Value Constants
// ============================================================================

/// Default analysis endpoint.
pub const DEFAULT_ANALYSIS_ENDPOINT: &str = "http://localhost:8080/analyze";

/// Default analysis request timeout in seconds.
pub const DEFAULT_ANALYSIS_TIMEOUT_SECS: u64 = 30;

/// Default number of retries for failed analysis requests.
pub const DEFAULT_ANALYSIS_MAX_RETRIES: u8 = 2;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_name() {
        assert_eq!(ConfigPreset::from_name("default"), Some(ConfigPreset::Default));
        assert_eq!(ConfigPreset::from_name("LOCAL"), Some(ConfigPreset::Offline));
        assert_eq!(ConfigPreset::from_name("pipeline"), Some(ConfigPreset::CiCd));
        assert_eq!(ConfigPreset::from_name("invalid"), None);
    }

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
    }

    #[test]
    fn test_offline_preset() {
        let config = AppConfig::offline_preset();
        assert!(!config.analysis.enabled);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_ci_cd_preset() {
        let config = AppConfig::ci_cd_preset();
        assert!(config.behavior.quiet);
        assert!(config.output.no_color);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert_eq!(config.behavior.min_score, Some(50.0));
    }
}
