//! Analysis service abstraction.

use crate::error::{AssessmentError, ExternalErrorKind, Result};
use serde_json::Value;

/// An external analysis service.
///
/// Implementations send the normalized request and return the raw response
/// body. Interpretation is left to [`crate::interpret::ResponseInterpreter`],
/// since the body's shape is not stable.
///
/// # Example
///
/// ```ignore
/// use esg_readiness::analysis::{AnalysisService, HttpAnalysisService, NoOpAnalysisService};
///
/// let service: Box<dyn AnalysisService> = if config.analysis.enabled {
///     Box::new(HttpAnalysisService::new(client_config)?)
/// } else {
///     Box::new(NoOpAnalysisService)
/// };
/// ```
pub trait AnalysisService: Send + Sync {
    /// Submit a request and return the raw response body.
    ///
    /// Transport failures, timeouts and non-2xx statuses are reported as
    /// [`AssessmentError::ExternalUnavailable`].
    fn analyze(&self, request: &Value) -> Result<String>;

    /// Name of this service (e.g. "http", "noop").
    fn name(&self) -> &'static str;

    /// Whether the service can be called at all.
    fn is_available(&self) -> bool;
}

/// A service that is never available.
///
/// Used when analysis is disabled; submissions fall back to local scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAnalysisService;

impl NoOpAnalysisService {
    /// Create a new no-op service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AnalysisService for NoOpAnalysisService {
    fn analyze(&self, _request: &Value) -> Result<String> {
        Err(AssessmentError::external(
            "analysis disabled",
            ExternalErrorKind::Disabled,
        ))
    }

    fn name(&self) -> &'static str {
        "noop"
    }

    fn is_available(&self) -> bool {
        false
    }
}
