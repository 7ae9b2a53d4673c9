//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator, ReportMetadata};
use crate::model::AnalysisResult;
use crate::scoring::ScoreReport;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReportMetadata<'a> {
    tool: ToolInfo,
    generated_at: String,
    #[serde(flatten)]
    source: &'a ReportMetadata,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}

impl<'a> JsonReportMetadata<'a> {
    fn new(source: &'a ReportMetadata) -> Self {
        Self {
            tool: ToolInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            generated_at: Utc::now().to_rfc3339(),
            source,
        }
    }
}

#[derive(Serialize)]
struct JsonScoreReport<'a> {
    metadata: JsonReportMetadata<'a>,
    report: &'a ScoreReport,
}

#[derive(Serialize)]
struct JsonAnalysisReport<'a> {
    metadata: JsonReportMetadata<'a>,
    result: &'a AnalysisResult,
}

impl ReportGenerator for JsonReporter {
    fn generate_score_report(
        &self,
        report: &ScoreReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(&JsonScoreReport {
            metadata: JsonReportMetadata::new(&config.metadata),
            report,
        })
    }

    fn generate_analysis_report(
        &self,
        result: &AnalysisResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        self.render(&JsonAnalysisReport {
            metadata: JsonReportMetadata::new(&config.metadata),
            result,
        })
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
