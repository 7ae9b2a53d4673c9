//! Pipeline orchestration for assessments.
//!
//! This module provides the submission flow (normalize → analyze → interpret,
//! with local fallback) and shared output handling for CLI command handlers.

mod output;
mod submit;

pub use output::{auto_detect_format, should_use_color, write_output, OutputTarget};
pub use submit::{submit, submit_with, CancellationToken, SubmissionOutcome};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - score at or above the minimum (or no minimum set)
    pub const SUCCESS: i32 = 0;
    /// The overall score is below `--min-score`, or no score could be computed
    pub const BELOW_MIN_SCORE: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Exit code for an overall score checked against an optional minimum.
///
/// A missing score fails any minimum.
#[must_use]
pub fn score_exit_code(score: Option<f64>, min_score: Option<f64>) -> i32 {
    match (score, min_score) {
        (_, None) => exit_codes::SUCCESS,
        (Some(score), Some(min)) if score >= min => exit_codes::SUCCESS,
        (_, Some(min)) => {
            tracing::info!("Overall score {:?} is below minimum {}", score, min);
            exit_codes::BELOW_MIN_SCORE
        }
    }
}
