//! Stepwise assessment session.
//!
//! A session walks the criteria of one framework in declaration order,
//! flattened across categories, collecting one [`Response`] per visited
//! criterion. The cursor only moves forward after the current criterion's
//! required fields validate; moving backward never discards data.
//!
//! ```
//! use esg_readiness::model::ResponseDraft;
//! use esg_readiness::registry::SchemaRegistry;
//! use esg_readiness::session::AssessmentSession;
//!
//! let registry = SchemaRegistry::builtin().unwrap();
//! let mut session = AssessmentSession::new(&registry, "iesg").unwrap();
//!
//! session
//!     .advance(ResponseDraft::new().with_field("assessed_suppliers_pct", 40))
//!     .unwrap();
//! assert_eq!(session.progress(), 0.5);
//! ```

mod answers;
mod validation;

pub use answers::{Answer, AnswerSheet};
pub use validation::{missing_required_fields, validate_response};

use crate::error::{AssessmentError, Result};
use crate::model::{Category, Criterion, Framework, Response, ResponseDraft};
use crate::registry::SchemaRegistry;
use crate::scoring::fallback_score;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Position of the cursor within the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cursor {
    pub category_index: usize,
    pub criterion_index: usize,
}

/// Traversal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Positioned on a criterion awaiting its response
    InProgress(Cursor),
    /// Every criterion has been submitted
    Complete,
}

/// One assessment in progress.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    framework: Arc<Framework>,
    /// Criteria in traversal order; empty categories contribute nothing
    sequence: Vec<Cursor>,
    /// Index into `sequence`; equal to its length once complete
    position: usize,
    responses: Vec<Response>,
    started_at: DateTime<Utc>,
}

impl AssessmentSession {
    /// Start a session for a registered framework.
    pub fn new(registry: &SchemaRegistry, framework_id: &str) -> Result<Self> {
        Ok(Self::for_framework(registry.framework_handle(framework_id)?))
    }

    /// Start a session for a framework handle.
    ///
    /// A framework without criteria starts out complete.
    #[must_use]
    pub fn for_framework(framework: Arc<Framework>) -> Self {
        let sequence = framework
            .categories
            .iter()
            .enumerate()
            .flat_map(|(category_index, cat)| {
                (0..cat.criteria.len()).map(move |criterion_index| Cursor {
                    category_index,
                    criterion_index,
                })
            })
            .collect();

        Self {
            framework,
            sequence,
            position: 0,
            responses: Vec::new(),
            started_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn framework(&self) -> &Framework {
        &self.framework
    }

    #[must_use]
    pub fn framework_id(&self) -> &str {
        &self.framework.id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Current traversal state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.sequence
            .get(self.position)
            .map_or(SessionState::Complete, |c| SessionState::InProgress(*c))
    }

    /// Cursor position, `None` once complete.
    #[must_use]
    pub fn cursor(&self) -> Option<Cursor> {
        self.sequence.get(self.position).copied()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.position >= self.sequence.len()
    }

    /// Category and criterion under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<(&Category, &Criterion)> {
        let cursor = self.cursor()?;
        let category = self.framework.categories.get(cursor.category_index)?;
        let criterion = category.criteria.get(cursor.criterion_index)?;
        Some((category, criterion))
    }

    /// Criterion under the cursor.
    #[must_use]
    pub fn current_criterion(&self) -> Option<&Criterion> {
        self.current().map(|(_, crit)| crit)
    }

    /// Validate and record a response for the current criterion, then move on.
    ///
    /// On failure the session is left unchanged. Re-submitting a criterion
    /// replaces its earlier response.
    pub fn advance(&mut self, draft: ResponseDraft) -> Result<&Response> {
        let criterion = self
            .current_criterion()
            .ok_or(AssessmentError::SessionComplete)?;
        validate_response(criterion, &draft.field_responses)?;

        let score = fallback_score(criterion, &draft.field_responses, &draft.notes);
        let response = Response {
            criterion_id: criterion.id.clone(),
            field_responses: draft.field_responses,
            notes: draft.notes,
            score,
        };
        tracing::debug!(
            "Recorded response for '{}' with fallback score {:.1}",
            response.criterion_id,
            score
        );

        let index = match self
            .responses
            .iter()
            .position(|r| r.criterion_id == response.criterion_id)
        {
            Some(existing) => {
                self.responses[existing] = response;
                existing
            }
            None => {
                self.responses.push(response);
                self.responses.len() - 1
            }
        };

        self.position += 1;
        if self.is_complete() {
            tracing::info!(
                "Assessment of '{}' complete ({} responses)",
                self.framework.id,
                self.responses.len()
            );
        }

        Ok(&self.responses[index])
    }

    /// Move the cursor back one criterion without discarding data.
    ///
    /// From the complete state this returns to the last criterion.
    pub fn retreat(&mut self) -> Result<()> {
        if self.position == 0 {
            return Err(AssessmentError::AtStart);
        }
        self.position -= 1;
        Ok(())
    }

    /// Share of criteria with a recorded response, in `[0, 1]`.
    ///
    /// Never decreases: responses are only added or replaced.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.sequence.len();
        if total == 0 {
            return 1.0;
        }
        (self.responses.len() as f64 / total as f64).min(1.0)
    }

    #[must_use]
    pub fn total_criteria(&self) -> usize {
        self.sequence.len()
    }

    /// Responses in the order they were first submitted.
    #[must_use]
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Response recorded for a criterion.
    #[must_use]
    pub fn response_for(&self, criterion_id: &str) -> Option<&Response> {
        self.responses.iter().find(|r| r.criterion_id == criterion_id)
    }

    /// Consume the session, keeping only its responses.
    #[must_use]
    pub fn into_responses(self) -> Vec<Response> {
        self.responses
    }
}
