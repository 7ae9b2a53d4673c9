//! Submission of a session to the analysis service with local fallback.

use crate::analysis::AnalysisService;
use crate::error::Result;
use crate::interpret::ResponseInterpreter;
use crate::model::AnalysisResult;
use crate::normalize::{MappingSet, RequestNormalizer};
use crate::scoring::ScoringEngine;
use crate::session::AssessmentSession;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag used to abandon an in-flight submission.
///
/// Clones share the same flag, so the UI side can cancel while the
/// submitting side checks.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the submission as abandoned.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// What a submission produced.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum SubmissionOutcome {
    /// The service answered with a usable payload
    Analyzed(AnalysisResult),
    /// Local fallback scores, with the reason the service result was not used
    Fallback { result: AnalysisResult, reason: String },
    /// The session was abandoned; nothing was merged
    Abandoned,
}

impl SubmissionOutcome {
    /// The result to display, if the submission was not abandoned.
    #[must_use]
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Analyzed(result) | Self::Fallback { result, .. } => Some(result),
            Self::Abandoned => None,
        }
    }

    #[must_use]
    pub fn into_result(self) -> Option<AnalysisResult> {
        match self {
            Self::Analyzed(result) | Self::Fallback { result, .. } => Some(result),
            Self::Abandoned => None,
        }
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Submit a session and reconcile the reply.
///
/// Service failures and unusable replies fall back to the session's local
/// scores; the caller always gets a result unless the token was cancelled.
/// Only fatal errors (e.g. no mapping table for the framework) are returned.
pub fn submit(
    session: &AssessmentSession,
    mappings: &MappingSet,
    service: &dyn AnalysisService,
    cancel: &CancellationToken,
) -> Result<SubmissionOutcome> {
    submit_with(
        session,
        mappings,
        service,
        &ScoringEngine::new(),
        &ResponseInterpreter::new(),
        cancel,
    )
}

/// [`submit`] with an explicit engine and interpreter.
pub fn submit_with(
    session: &AssessmentSession,
    mappings: &MappingSet,
    service: &dyn AnalysisService,
    engine: &ScoringEngine,
    interpreter: &ResponseInterpreter,
    cancel: &CancellationToken,
) -> Result<SubmissionOutcome> {
    if cancel.is_cancelled() {
        return Ok(SubmissionOutcome::Abandoned);
    }

    let request = RequestNormalizer::for_session(mappings, session)?.normalize(session)?;
    let local = engine.score_session(session).to_analysis_result();

    if !session.is_complete() {
        tracing::warn!(
            "Submitting incomplete assessment ({} of {} criteria)",
            session.responses().len(),
            session.total_criteria()
        );
    }

    tracing::info!(
        "Submitting '{}' to {} service ({} values)",
        session.framework_id(),
        service.name(),
        request.stats.mapped
    );
    let reply = service.analyze(&request.to_json());

    if cancel.is_cancelled() {
        tracing::info!("Submission abandoned; discarding reply");
        return Ok(SubmissionOutcome::Abandoned);
    }

    let body = match reply {
        Ok(body) => body,
        Err(e) if e.is_recoverable() => {
            tracing::warn!("Falling back to local scores: {}", e);
            return Ok(fallback(local, e.user_message(), &e.to_string()));
        }
        Err(e) => return Err(e),
    };

    match interpreter.try_interpret(&body) {
        Ok(result) => Ok(SubmissionOutcome::Analyzed(result)),
        Err(e) => {
            tracing::warn!("Falling back to local scores: {}", e);
            Ok(fallback(local, e.user_message(), &e.to_string()))
        }
    }
}

fn fallback(mut local: AnalysisResult, user_message: String, reason: &str) -> SubmissionOutcome {
    let synthetic = AnalysisResult::unavailable(reason);
    for gap in synthetic.gaps {
        local.push_gap(gap);
    }
    SubmissionOutcome::Fallback {
        result: local,
        reason: user_message,
    }
}
