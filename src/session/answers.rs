//! Answer sheets: pre-recorded answers replayed through a session.

use super::AssessmentSession;
use crate::error::{AssessmentError, ErrorContext, Result};
use crate::model::{FieldResponses, ResponseDraft};
use crate::registry::SchemaRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Answers for one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub criterion: String,
    #[serde(default)]
    pub fields: FieldResponses,
    #[serde(default)]
    pub notes: String,
}

/// A framework id plus answers keyed by criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSheet {
    pub framework: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl AnswerSheet {
    /// Parse a YAML (or JSON, which is valid YAML) answer sheet.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load an answer sheet from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AssessmentError::io(path, e))?;
        Self::from_yaml_str(&content).with_context(|| format!("reading {}", path.display()))
    }

    /// Start a session for the sheet's framework and replay the answers into it.
    pub fn start_session(&self, registry: &SchemaRegistry) -> Result<AssessmentSession> {
        let mut session = AssessmentSession::new(registry, &self.framework)?;
        self.replay_into(&mut session)?;
        Ok(session)
    }

    /// Submit answers in traversal order from the session's current position.
    ///
    /// Stops at the first criterion without an answer, leaving a partial
    /// session. Answers that fail validation propagate `IncompleteResponse`.
    /// Answers naming criteria the framework does not have are logged and
    /// ignored. Returns the number of criteria submitted.
    pub fn replay_into(&self, session: &mut AssessmentSession) -> Result<usize> {
        if self.framework != session.framework_id() {
            tracing::warn!(
                "Answer sheet targets '{}' but session uses '{}'",
                self.framework,
                session.framework_id()
            );
        }

        let mut by_criterion: HashMap<&str, &Answer> = HashMap::new();
        for answer in &self.answers {
            if session.framework().find_criterion(&answer.criterion).is_none() {
                tracing::warn!(
                    "Ignoring answer for unknown criterion '{}' in framework '{}'",
                    answer.criterion,
                    session.framework_id()
                );
                continue;
            }
            if by_criterion.insert(&answer.criterion, answer).is_some() {
                tracing::warn!(
                    "Duplicate answer for criterion '{}'; using the last one",
                    answer.criterion
                );
            }
        }

        let mut submitted = 0;
        while let Some(criterion_id) = session.current_criterion().map(|c| c.id.clone()) {
            let Some(answer) = by_criterion.get(criterion_id.as_str()) else {
                tracing::info!(
                    "No answer for '{}'; stopping after {} criteria",
                    criterion_id,
                    submitted
                );
                break;
            };
            let draft = ResponseDraft {
                field_responses: answer.fields.clone(),
                notes: answer.notes.clone(),
            };
            session.advance(draft)?;
            submitted += 1;
        }

        Ok(submitted)
    }
}
