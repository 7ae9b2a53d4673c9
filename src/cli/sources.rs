//! Loading of frameworks, mapping tables and answer sheets for CLI handlers.

use crate::config::AppConfig;
use crate::normalize::MappingSet;
use crate::registry::SchemaRegistry;
use crate::session::{AnswerSheet, AssessmentSession};
use anyhow::{Context, Result};
use std::path::Path;

/// Registry from the configured frameworks file, or the built-in set.
pub fn load_registry(config: &AppConfig) -> Result<SchemaRegistry> {
    match &config.registry.frameworks_file {
        Some(path) => SchemaRegistry::from_path(path)
            .with_context(|| format!("Failed to load frameworks from {}", path.display())),
        None => SchemaRegistry::builtin().context("Failed to load built-in frameworks"),
    }
}

/// Mapping tables from the configured file, or the built-in set.
pub fn load_mappings(config: &AppConfig) -> Result<MappingSet> {
    match &config.registry.mappings_file {
        Some(path) => MappingSet::from_path(path)
            .with_context(|| format!("Failed to load mappings from {}", path.display())),
        None => MappingSet::builtin().context("Failed to load built-in mappings"),
    }
}

/// Replay an answer sheet into a fresh session.
pub fn load_session(registry: &SchemaRegistry, answers_path: &Path) -> Result<AssessmentSession> {
    let sheet = AnswerSheet::from_path(answers_path)
        .with_context(|| format!("Failed to read answers from {}", answers_path.display()))?;
    let mut session = AssessmentSession::new(registry, &sheet.framework)?;
    let replayed = sheet
        .replay_into(&mut session)
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .with_context(|| format!("Answers in {} are incomplete", answers_path.display()))?;

    tracing::info!(
        "Replayed {} of {} criteria for '{}'",
        replayed,
        session.total_criteria(),
        session.framework_id()
    );
    Ok(session)
}
