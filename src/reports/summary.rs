//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::model::{AnalysisResult, Priority};
use crate::scoring::{ComplianceBand, ScoreReport};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn band_color(band: ComplianceBand) -> &'static str {
    match band {
        ComplianceBand::NeedsFoundation => "red",
        ComplianceBand::Progressing => "yellow",
        ComplianceBand::FinancingReady => "green",
    }
}

const fn priority_color(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "red",
        Priority::Medium => "yellow",
        Priority::Low => "dim",
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    /// "66/100 (Progressing)" or "n/a".
    fn score(&self, score: Option<f64>, band: Option<ComplianceBand>) -> String {
        match (score, band) {
            (Some(score), Some(band)) => self.color(
                &format!("{score:.0}/100 ({})", band.description()),
                band_color(band),
            ),
            (Some(score), None) => format!("{score:.0}/100"),
            _ => self.color("n/a", "dim"),
        }
    }

    fn header(&self, lines: &mut Vec<String>, title: &str, config: &ReportConfig) {
        lines.push(self.color(config.title.as_deref().unwrap_or(title), "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        if let Some(path) = &config.metadata.answers_path {
            lines.push(format!("{}  {}", self.color("Answers:", "cyan"), path));
        }
        if let Some(path) = &config.metadata.response_path {
            lines.push(format!("{}  {}", self.color("Response:", "cyan"), path));
        }
    }

    fn section(&self, lines: &mut Vec<String>, title: &str, items: &[String], total: usize) {
        if items.is_empty() {
            return;
        }
        lines.push(String::new());
        lines.push(self.color(title, "bold"));
        for item in items {
            lines.push(format!("  • {item}"));
        }
        if total > items.len() {
            lines.push(format!(
                "  {}",
                self.color(&format!("… and {} more", total - items.len()), "dim")
            ));
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_score_report(
        &self,
        report: &ScoreReport,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header(&mut lines, "ESG Readiness Estimate", config);

        lines.push(format!(
            "{}  {} ({})",
            self.color("Framework:", "cyan"),
            report.framework_name,
            report.framework_id
        ));
        lines.push(format!(
            "{}  {} of {} criteria answered",
            self.color("Coverage:", "cyan"),
            report.scored_criteria,
            report.total_criteria
        ));
        lines.push(format!(
            "{}  {}",
            self.color("Overall:", "cyan"),
            self.score(report.overall_score, report.band)
        ));

        lines.push(String::new());
        lines.push(self.color("Categories:", "bold"));
        for category in &report.categories {
            lines.push(format!(
                "  {:<28} {:>4.0}%  {}",
                category.name,
                category.weight * 100.0,
                self.score(category.score, category.band)
            ));
            if config.include_criteria {
                for criterion in &category.criteria {
                    let score = criterion
                        .score
                        .map_or_else(|| self.color("unanswered", "dim"), |s| format!("{s:.0}"));
                    lines.push(format!("      {:<30} {}", criterion.title, score));
                }
            }
        }

        Ok(lines.join("\n"))
    }

    fn generate_analysis_report(
        &self,
        result: &AnalysisResult,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header(&mut lines, "ESG Readiness Analysis", config);

        lines.push(format!("{}  {}", self.color("Source:", "cyan"), result.shape));
        if let Some(reason) = &config.metadata.fallback_reason {
            lines.push(format!("{}  {}", self.color("Note:", "yellow"), reason));
        }
        lines.push(format!(
            "{}  {}",
            self.color("Overall:", "cyan"),
            self.score(result.overall_score, result.compliance_level)
        ));
        if let Some(reported) = &result.reported_level {
            lines.push(format!("{}  {}", self.color("Reported:", "cyan"), reported));
        }

        if !result.category_scores.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Categories:", "bold"));
            for category in &result.category_scores {
                lines.push(format!(
                    "  {:<28} {}",
                    category.name,
                    self.score(Some(category.score), Some(category.band))
                ));
            }
        }

        if let Some(summary) = &result.summary {
            lines.push(String::new());
            lines.push(summary.clone());
        }

        let recommendations: Vec<String> = config
            .limit(&result.recommendations)
            .iter()
            .map(|r| {
                let mut line = format!(
                    "{} {}",
                    self.color(&format!("[{}]", r.priority), priority_color(r.priority)),
                    r.title
                );
                if let Some(timeframe) = &r.timeframe {
                    line.push_str(&format!(" ({timeframe})"));
                }
                line
            })
            .collect();
        self.section(
            &mut lines,
            "Recommendations:",
            &recommendations,
            result.recommendations.len(),
        );

        self.section(
            &mut lines,
            "Gaps:",
            config.limit(&result.gaps),
            result.gaps.len(),
        );

        let opportunities: Vec<String> = config
            .limit(&result.opportunities)
            .iter()
            .map(|o| match &o.provider {
                Some(provider) => format!("{} ({provider})", o.title),
                None => o.title.clone(),
            })
            .collect();
        self.section(
            &mut lines,
            "Financing opportunities:",
            &opportunities,
            result.opportunities.len(),
        );

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Recommendation, ResponseShape};

    fn result() -> AnalysisResult {
        let mut result =
            AnalysisResult::new(ResponseShape::FlatScoring).with_overall_score(Some(66.0));
        result.recommendations = vec![
            Recommendation::titled("Install smart meters"),
            Recommendation::titled("Publish a code of conduct"),
        ];
        result.gaps = vec!["No waste audit".to_string()];
        result
    }

    #[test]
    fn test_analysis_summary() {
        let text = SummaryReporter::new()
            .no_color()
            .generate_analysis_report(&result(), &ReportConfig::default())
            .unwrap();
        assert!(text.contains("66/100 (Progressing)"));
        assert!(text.contains("[medium] Install smart meters"));
        assert!(text.contains("No waste audit"));
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_max_items() {
        let config = ReportConfig {
            max_items: Some(1),
            ..ReportConfig::default()
        };
        let text = SummaryReporter::new()
            .no_color()
            .generate_analysis_report(&result(), &config)
            .unwrap();
        assert!(!text.contains("Publish a code of conduct"));
        assert!(text.contains("and 1 more"));
    }

    #[test]
    fn test_colored_output() {
        let text = SummaryReporter::new()
            .generate_analysis_report(&result(), &ReportConfig::default())
            .unwrap();
        assert!(text.contains("\x1b[33m"));
    }
}
