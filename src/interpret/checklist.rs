//! Baseline checklist scoring.
//!
//! A category's score is the weighted share of its items answered "Yes",
//! with "Unknown" earning partial credit:
//!
//! `score = Σ weight(status) / items * 100`, with Yes = 1, Unknown = 0.3, No = 0.
//!
//! Items whose status is none of these (e.g. "N/A", a number, or no status at
//! all) are left out of both the credit and the item count.

use super::extract::humanize_key;
use crate::model::CategoryScore;
use serde_json::{Map, Value};

/// Credit given to an item whose status is unknown.
pub const UNKNOWN_CREDIT: f64 = 0.3;

/// Status of one checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistStatus {
    Yes,
    No,
    Unknown,
}

impl ChecklistStatus {
    /// Parse a status value; `None` for anything outside Yes/No/Unknown.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let status = match value {
            Value::Bool(true) => Self::Yes,
            Value::Bool(false) => Self::No,
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "yes" | "y" | "true" | "done" | "complete" | "completed" => Self::Yes,
                "no" | "n" | "false" | "missing" => Self::No,
                "unknown" => Self::Unknown,
                _ => return None,
            },
            _ => return None,
        };
        Some(status)
    }

    /// Credit this status contributes.
    #[must_use]
    pub const fn credit(&self) -> f64 {
        match self {
            Self::Yes => 1.0,
            Self::Unknown => UNKNOWN_CREDIT,
            Self::No => 0.0,
        }
    }
}

/// Percentage score of a category's items; `None` when it has no items.
#[must_use]
pub fn category_score(statuses: &[ChecklistStatus]) -> Option<f64> {
    if statuses.is_empty() {
        return None;
    }
    let credit: f64 = statuses.iter().map(ChecklistStatus::credit).sum();
    Some(credit / statuses.len() as f64 * 100.0)
}

/// Statuses of one category in either payload form.
///
/// Map form: `{item: "Yes"}`. List form: `[{label, status}]`, where a bare
/// string entry is read as a status.
fn category_statuses(value: &Value) -> Vec<ChecklistStatus> {
    let raw: Vec<&Value> = match value {
        Value::Object(items) => items.values().collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(entry) => Some(entry.get("status").unwrap_or(&Value::Null)),
                Value::String(_) | Value::Bool(_) => Some(item),
                _ => None,
            })
            .collect(),
        _ => return Vec::new(),
    };

    let statuses: Vec<ChecklistStatus> =
        raw.iter().filter_map(|v| ChecklistStatus::from_value(v)).collect();
    if statuses.len() < raw.len() {
        tracing::debug!(
            "Skipped {} checklist item(s) with unrecognized status",
            raw.len() - statuses.len()
        );
    }
    statuses
}

/// Category scores of a checklist object, in payload order.
///
/// Categories without items are absent from the result.
#[must_use]
pub fn score_checklist(checklist: &Map<String, Value>) -> Vec<CategoryScore> {
    checklist
        .iter()
        .filter_map(|(name, items)| {
            let score = category_score(&category_statuses(items))?;
            Some(CategoryScore::new(humanize_key(name), score))
        })
        .collect()
}
