//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".esg-readiness.yaml",
    ".esg-readiness.yml",
    "esg-readiness.yaml",
    "esg-readiness.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/esg-readiness/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // 1. Use explicit path if provided
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    // 2. Search current directory
    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    // 3. Search git root (if in a repo)
    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    // 4. Search user config directory
    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("esg-readiness")) {
            return Some(path);
        }
    }

    // 5. Search home directory
    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override. This is useful for
    /// layering CLI args over file config.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        // Analysis config
        if !other.analysis.enabled {
            self.analysis.enabled = false;
        }
        if other.analysis.endpoint != defaults.analysis.endpoint {
            self.analysis.endpoint.clone_from(&other.analysis.endpoint);
        }
        if other.analysis.timeout_secs != defaults.analysis.timeout_secs {
            self.analysis.timeout_secs = other.analysis.timeout_secs;
        }
        if other.analysis.max_retries != defaults.analysis.max_retries {
            self.analysis.max_retries = other.analysis.max_retries;
        }
        if other.analysis.api_key.is_some() {
            self.analysis.api_key.clone_from(&other.analysis.api_key);
        }

        // Registry config
        if other.registry.frameworks_file.is_some() {
            self.registry
                .frameworks_file
                .clone_from(&other.registry.frameworks_file);
        }
        if other.registry.mappings_file.is_some() {
            self.registry
                .mappings_file
                .clone_from(&other.registry.mappings_file);
        }

        // Output config - only override if explicitly set
        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        // Behavior config
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
        if other.behavior.min_score.is_some() {
            self.behavior.min_score = other.behavior.min_score;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r"# ESG Readiness Configuration File
# =================================
#
# Place it at:
#   - .esg-readiness.yaml in your project root
#   - ~/.config/esg-readiness/esg-readiness.yaml for global config
#
# CLI arguments always override file settings.

# External analysis service
analysis:
  # When false, submissions report locally estimated scores
  enabled: true
  endpoint: http://localhost:8080/analyze
  # Request timeout in seconds
  timeout_secs: 30
  # Retries after a failed request (1s, 2s, 4s ... backoff), at most 10
  max_retries: 2
  # api_key: your-key

# Framework and mapping sources (built-in definitions when omitted)
# registry:
#   frameworks_file: ./frameworks.yaml
#   mappings_file: ./mappings.yaml

# Output configuration
output:
  # Format: auto, summary, json
  format: auto
  # Output file path (omit for stdout)
  # file: report.json
  # Disable colored output
  no_color: false

# Behavior flags
behavior:
  # Suppress non-essential output
  quiet: false
  # Exit with code 1 when the overall score is below this value (0-100)
  # min_score: 50
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
