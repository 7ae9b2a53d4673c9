//! Shape detection for external analysis payloads.
//!
//! Detection inspects only the shape-distinguishing keys and produces a
//! [`DetectedShape`] before any score is read. Shapes are tried in a fixed
//! order: flat scoring, then per-framework scores, then checklist report,
//! then the processor's snake_case `scores` payload.

use crate::model::ResponseShape;
use serde_json::{Map, Value};

/// Keys whose object value marks the checklist shape.
const CHECKLIST_KEYS: &[&str] = &["report", "baseline_checklist"];

/// Tagged result of shape detection, borrowing the distinguishing parts.
#[derive(Debug, Clone, Copy)]
pub enum DetectedShape<'a> {
    /// `{scoring: {...}, opportunities: [...]}`
    FlatScoring {
        root: &'a Map<String, Value>,
        scoring: &'a Map<String, Value>,
    },
    /// Top-level objects each carrying a `scores` object
    PerFramework { root: &'a Map<String, Value> },
    /// `{report: {...}, baseline_checklist: {...}, gaps_detected: [...]}`
    Checklist { root: &'a Map<String, Value> },
    /// `{scores: {overall_score, ...}, recommendations, compliance_gaps}`
    ProcessorScores {
        root: &'a Map<String, Value>,
        scores: &'a Map<String, Value>,
    },
}

impl DetectedShape<'_> {
    /// Shape label recorded on the result.
    #[must_use]
    pub const fn shape(&self) -> ResponseShape {
        match self {
            Self::FlatScoring { .. } => ResponseShape::FlatScoring,
            Self::PerFramework { .. } => ResponseShape::PerFramework,
            Self::Checklist { .. } => ResponseShape::Checklist,
            Self::ProcessorScores { .. } => ResponseShape::ProcessorScores,
        }
    }
}

/// Sub-frameworks of a per-framework payload: `(name, scores)` in payload order.
pub fn sub_frameworks(
    root: &Map<String, Value>,
) -> impl Iterator<Item = (&str, &Map<String, Value>, &Map<String, Value>)> {
    root.iter().filter_map(|(name, value)| {
        let section = value.as_object()?;
        let scores = section.get("scores")?.as_object()?;
        Some((name.as_str(), section, scores))
    })
}

/// Detect the payload shape.
///
/// Returns `None` when the payload is not an object or matches no known shape.
#[must_use]
pub fn detect_shape(value: &Value) -> Option<DetectedShape<'_>> {
    let root = value.as_object()?;

    let detected = if let Some(scoring) = root.get("scoring").and_then(Value::as_object) {
        Some(DetectedShape::FlatScoring { root, scoring })
    } else if sub_frameworks(root).next().is_some() {
        Some(DetectedShape::PerFramework { root })
    } else if CHECKLIST_KEYS
        .iter()
        .any(|k| root.get(*k).is_some_and(Value::is_object))
    {
        Some(DetectedShape::Checklist { root })
    } else if let Some(scores) = root.get("scores").and_then(Value::as_object) {
        Some(DetectedShape::ProcessorScores { root, scores })
    } else {
        None
    };

    match &detected {
        Some(shape) => tracing::debug!("Detected response shape: {}", shape.shape()),
        None => tracing::debug!(
            "No known response shape among top-level keys {:?}",
            root.keys().collect::<Vec<_>>()
        ),
    }
    detected
}
