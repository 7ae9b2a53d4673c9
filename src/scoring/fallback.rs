//! Per-criterion fallback score.
//!
//! `score = min(100, completion_rate * 80 + confidence_bonus)`
//!
//! This is a placeholder policy used until (or instead of) an external score
//! exists. It measures how completely a criterion was answered, not how well
//! the business performs against it. The bonus is deterministic: it grows with
//! the share of optional inputs (optional fields plus free-form notes) that were
//! filled in and stays strictly below 20.

use crate::model::{Criterion, FieldResponses};

/// Points awarded for answering every required field.
pub const COMPLETION_POINTS: f64 = 80.0;

/// Upper bound reached when every optional input is filled.
pub const MAX_CONFIDENCE_BONUS: f64 = 19.0;

/// Share of required fields with a defined value.
///
/// A criterion without required fields is fully complete.
#[must_use]
pub fn completion_rate(criterion: &Criterion, fields: &FieldResponses) -> f64 {
    let mut required = 0usize;
    let mut answered = 0usize;
    for field in criterion.required_fields() {
        required += 1;
        if fields.get(&field.id).is_some_and(|v| v.is_defined()) {
            answered += 1;
        }
    }
    if required == 0 {
        1.0
    } else {
        answered as f64 / required as f64
    }
}

/// Bonus in `[0, 20)` for qualitative completeness.
///
/// Optional fields and notes each count as one optional input.
#[must_use]
pub fn confidence_bonus(criterion: &Criterion, fields: &FieldResponses, notes: &str) -> f64 {
    let mut inputs = 1usize;
    let mut filled = usize::from(!notes.trim().is_empty());
    for field in criterion.optional_fields() {
        inputs += 1;
        if fields.get(&field.id).is_some_and(|v| v.is_defined()) {
            filled += 1;
        }
    }
    MAX_CONFIDENCE_BONUS * filled as f64 / inputs as f64
}

/// Combine a completion rate and a bonus into a bounded score.
#[must_use]
pub fn combine(completion_rate: f64, bonus: f64) -> f64 {
    let rate = if completion_rate.is_finite() {
        completion_rate.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let bonus = if bonus.is_finite() {
        bonus.clamp(0.0, MAX_CONFIDENCE_BONUS)
    } else {
        0.0
    };
    (rate * COMPLETION_POINTS + bonus).min(100.0)
}

/// Fallback score for one criterion's answers.
#[must_use]
pub fn fallback_score(criterion: &Criterion, fields: &FieldResponses, notes: &str) -> f64 {
    combine(
        completion_rate(criterion, fields),
        confidence_bonus(criterion, fields, notes),
    )
}
