//! Request command handler.
//!
//! Prints the normalized request that `submit` would send.

use super::sources::{load_mappings, load_registry, load_session};
use crate::config::AppConfig;
use crate::normalize::RequestNormalizer;
use crate::pipeline::{exit_codes, write_output, OutputTarget};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the request command, returning the desired exit code.
pub fn run_request(config: &AppConfig, answers_path: &Path) -> Result<i32> {
    let registry = load_registry(config)?;
    let mappings = load_mappings(config)?;
    let session = load_session(&registry, answers_path)?;

    let request = RequestNormalizer::for_session(&mappings, &session)?.normalize(&session)?;
    let stats = request.stats;

    if !config.behavior.quiet {
        eprintln!(
            "Mapped {} values ({} unmapped, {} empty, {} unknown fields dropped)",
            stats.mapped, stats.dropped_unmapped, stats.dropped_absent, stats.dropped_unknown_field
        );
    }

    let content = serde_json::to_string_pretty(&request.to_json())
        .context("Failed to serialize request")?;
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&content, &target, config.behavior.quiet)?;

    Ok(exit_codes::SUCCESS)
}
