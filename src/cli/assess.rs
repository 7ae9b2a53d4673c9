//! Assess command handler.
//!
//! Replays an answer sheet and reports the locally estimated scores.

use super::sources::{load_registry, load_session};
use crate::config::AppConfig;
use crate::pipeline::{
    auto_detect_format, score_exit_code, should_use_color, write_output, OutputTarget,
};
use crate::reports::{create_reporter_with_options, ReportConfig, ReportMetadata};
use crate::scoring::ScoringEngine;
use anyhow::Result;
use std::path::Path;

/// Run the assess command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_assess(config: &AppConfig, answers_path: &Path, include_criteria: bool) -> Result<i32> {
    let registry = load_registry(config)?;
    let session = load_session(&registry, answers_path)?;
    let report = ScoringEngine::new().score_session(&session);

    let target = OutputTarget::from_option(config.output.file.clone());
    let format = auto_detect_format(config.output.format, &target);
    let reporter =
        create_reporter_with_options(format, should_use_color(config.output.no_color));
    let report_config = ReportConfig {
        include_criteria,
        metadata: ReportMetadata {
            answers_path: Some(answers_path.display().to_string()),
            ..ReportMetadata::default()
        },
        ..ReportConfig::default()
    };

    let content = reporter.generate_score_report(&report, &report_config)?;
    write_output(&content, &target, config.behavior.quiet)?;

    Ok(score_exit_code(
        report.overall_score,
        config.behavior.min_score,
    ))
}
