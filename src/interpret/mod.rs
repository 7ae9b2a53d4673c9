//! Tolerant interpretation of external analysis responses.
//!
//! The service's reply has gone through several incompatible shapes. The
//! interpreter unwraps transport envelopes, detects the shape
//! ([`DetectedShape`]), decodes it into the canonical [`AnalysisResult`] and
//! re-bands every score locally. It never fails: anything unusable becomes
//! [`AnalysisResult::unavailable`], a result with all scores unset and a single
//! synthetic gap.
//!
//! ```
//! use esg_readiness::interpret::ResponseInterpreter;
//! use esg_readiness::scoring::ComplianceBand;
//!
//! let interpreter = ResponseInterpreter::new();
//! let result = interpreter.interpret(r#"{"scoring": {"overallScore": 80}}"#);
//! assert_eq!(result.compliance_level, Some(ComplianceBand::FinancingReady));
//!
//! let broken = interpreter.interpret("not json");
//! assert!(broken.overall_score.is_none());
//! assert_eq!(broken.gaps.len(), 1);
//! ```

mod checklist;
mod detection;
mod envelope;
mod extract;
mod shapes;

pub use checklist::{category_score, score_checklist, ChecklistStatus, UNKNOWN_CREDIT};
pub use detection::{detect_shape, DetectedShape};
pub use envelope::{unwrap_envelopes, Unwrapped, MAX_ENVELOPE_DEPTH};
pub use extract::humanize_key;

use crate::error::{AssessmentError, Result};
use crate::model::AnalysisResult;
use serde_json::Value;

/// Prefix of gaps carrying a failure the service reported alongside its data.
pub const SERVICE_NOTICE_PREFIX: &str = "Service reported";

/// Converts raw service payloads into [`AnalysisResult`]s.
#[derive(Debug, Clone, Copy)]
pub struct ResponseInterpreter {
    max_envelope_depth: usize,
}

impl Default for ResponseInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseInterpreter {
    /// Interpreter with the default envelope depth.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_envelope_depth: MAX_ENVELOPE_DEPTH,
        }
    }

    /// Interpreter with a custom envelope depth.
    #[must_use]
    pub const fn with_envelope_depth(max_envelope_depth: usize) -> Self {
        Self { max_envelope_depth }
    }

    /// Interpret a raw response body. Never fails.
    pub fn interpret(&self, raw: &str) -> AnalysisResult {
        Self::absorb(self.try_interpret(raw))
    }

    /// Interpret an already-parsed payload. Never fails.
    pub fn interpret_value(&self, value: Value) -> AnalysisResult {
        Self::absorb(self.try_interpret_value(value))
    }

    /// Interpret a raw response body, reporting why it was unusable.
    pub fn try_interpret(&self, raw: &str) -> Result<AnalysisResult> {
        if raw.trim().is_empty() {
            return Err(AssessmentError::UnrecognizedResponseShape(
                "empty response".to_string(),
            ));
        }
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            AssessmentError::UnrecognizedResponseShape(format!("malformed JSON: {e}"))
        })?;
        self.try_interpret_value(value)
    }

    /// Interpret a parsed payload, reporting why it was unusable.
    pub fn try_interpret_value(&self, value: Value) -> Result<AnalysisResult> {
        let Unwrapped { payload, notices } = unwrap_envelopes(value, self.max_envelope_depth)
            .map_err(AssessmentError::UnrecognizedResponseShape)?;
        let detected = detect_shape(&payload).ok_or_else(|| {
            AssessmentError::UnrecognizedResponseShape("no known response shape".to_string())
        })?;
        let mut result = shapes::decode(detected)?;
        for notice in notices {
            result.push_gap(format!("{SERVICE_NOTICE_PREFIX}: {notice}"));
        }
        Ok(result)
    }

    fn absorb(outcome: Result<AnalysisResult>) -> AnalysisResult {
        match outcome {
            Ok(result) => {
                tracing::debug!(
                    "Interpreted {} response: overall {:?}, {} categories",
                    result.shape,
                    result.overall_score,
                    result.category_scores.len()
                );
                result
            }
            Err(AssessmentError::UnrecognizedResponseShape(reason)) => {
                tracing::warn!("Analysis response unusable: {}", reason);
                AnalysisResult::unavailable(&reason)
            }
            Err(other) => {
                tracing::warn!("Analysis response unusable: {}", other);
                AnalysisResult::unavailable(&other.to_string())
            }
        }
    }
}

/// Interpret a raw response body with the default interpreter.
pub fn interpret_response(raw: &str) -> AnalysisResult {
    ResponseInterpreter::new().interpret(raw)
}
