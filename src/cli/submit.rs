//! Submit command handler.
//!
//! Replays an answer sheet, sends it to the analysis service and reports the
//! result, falling back to local scores when the service cannot be used.

use super::sources::{load_mappings, load_registry, load_session};
use crate::analysis::{AnalysisService, NoOpAnalysisService};
use crate::config::AppConfig;
use crate::pipeline::{
    auto_detect_format, exit_codes, score_exit_code, should_use_color, submit, write_output,
    CancellationToken, OutputTarget, SubmissionOutcome,
};
use crate::reports::{create_reporter_with_options, ReportConfig, ReportMetadata};
use anyhow::Result;
use std::path::Path;

/// Service selected by the configuration.
fn build_service(
    config: &AppConfig,
    cancel: &CancellationToken,
) -> Result<Box<dyn AnalysisService>> {
    if !config.analysis.enabled {
        tracing::info!("Analysis disabled; reporting local scores");
        return Ok(Box::new(NoOpAnalysisService::new()));
    }

    #[cfg(feature = "analysis")]
    {
        let service = crate::analysis::HttpAnalysisService::new(config.analysis_client_config())?
            .with_cancellation(cancel.clone());
        Ok(Box::new(service))
    }

    #[cfg(not(feature = "analysis"))]
    {
        let _ = cancel;
        tracing::warn!("Built without the 'analysis' feature; reporting local scores");
        Ok(Box::new(NoOpAnalysisService::new()))
    }
}

/// Run the submit command, returning the desired exit code.
pub fn run_submit(config: &AppConfig, answers_path: &Path) -> Result<i32> {
    let registry = load_registry(config)?;
    let mappings = load_mappings(config)?;
    let session = load_session(&registry, answers_path)?;
    let cancel = CancellationToken::new();
    let service = build_service(config, &cancel)?;

    let outcome = submit(&session, &mappings, service.as_ref(), &cancel)?;

    let (result, fallback_reason) = match outcome {
        SubmissionOutcome::Analyzed(result) => (result, None),
        SubmissionOutcome::Fallback { result, reason } => (result, Some(reason)),
        SubmissionOutcome::Abandoned => {
            tracing::warn!("Submission abandoned");
            return Ok(exit_codes::ERROR);
        }
    };

    let target = OutputTarget::from_option(config.output.file.clone());
    let format = auto_detect_format(config.output.format, &target);
    let reporter =
        create_reporter_with_options(format, should_use_color(config.output.no_color));
    let report_config = ReportConfig {
        metadata: ReportMetadata {
            answers_path: Some(answers_path.display().to_string()),
            fallback_reason,
            ..ReportMetadata::default()
        },
        ..ReportConfig::default()
    };

    let content = reporter.generate_analysis_report(&result, &report_config)?;
    write_output(&content, &target, config.behavior.quiet)?;

    Ok(score_exit_code(
        result.overall_score,
        config.behavior.min_score,
    ))
}
