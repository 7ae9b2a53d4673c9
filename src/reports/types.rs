//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: summary if TTY, JSON otherwise
    #[default]
    Auto,
    /// Human-readable summary
    #[value(alias = "text")]
    Summary,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// Maximum items per list section (gaps, recommendations, opportunities)
    pub max_items: Option<usize>,
    /// List every criterion under its category
    pub include_criteria: bool,
    /// Where the report came from, shown in the header
    pub metadata: ReportMetadata,
}

impl ReportConfig {
    /// Truncate a list section to `max_items`.
    #[must_use]
    pub fn limit<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.max_items {
            Some(max) if max < items.len() => &items[..max],
            _ => items,
        }
    }
}

/// Metadata about the report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Answer sheet the session was replayed from
    pub answers_path: Option<String>,
    /// Saved service response that was interpreted
    pub response_path: Option<String>,
    /// Reason the service result was replaced by local scores
    pub fallback_reason: Option<String>,
}
