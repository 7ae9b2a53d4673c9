//! Interpret command handler.
//!
//! Reads a saved analysis service response and reports it in canonical form.

use crate::config::AppConfig;
use crate::interpret::ResponseInterpreter;
use crate::pipeline::{
    auto_detect_format, score_exit_code, should_use_color, write_output, OutputTarget,
};
use crate::reports::{create_reporter_with_options, ReportConfig, ReportMetadata};
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read the response body from a file, or stdin for `-`.
fn read_response(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read response from stdin")?;
        Ok(body)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read response from {}", path.display()))
    }
}

/// Run the interpret command, returning the desired exit code.
pub fn run_interpret(config: &AppConfig, response_path: &Path) -> Result<i32> {
    let body = read_response(response_path)?;
    let result = ResponseInterpreter::new().interpret(&body);
    tracing::debug!("Interpreted response as {}", result.shape);

    let target = OutputTarget::from_option(config.output.file.clone());
    let format = auto_detect_format(config.output.format, &target);
    let reporter =
        create_reporter_with_options(format, should_use_color(config.output.no_color));
    let report_config = ReportConfig {
        metadata: ReportMetadata {
            response_path: Some(response_path.display().to_string()),
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
