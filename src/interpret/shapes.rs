//! Per-shape decoders into the canonical result.

use super::checklist::score_checklist;
use super::detection::{sub_frameworks, DetectedShape};
use super::extract::{
    first_str, humanize_key, opportunity_list, recommendation_list, score_value, text_list,
};
use crate::error::{AssessmentError, Result};
use crate::model::{AnalysisResult, CategoryScore, ResponseShape};
use crate::scoring::mean;
use serde_json::{Map, Value};

/// Keys holding an overall score in the flat shape.
const OVERALL_KEYS: &[&str] = &["overallScore", "overall_score", "overall"];

/// Decode a detected payload.
///
/// Fails when the shape matched but carries no numeric score at all.
pub fn decode(detected: DetectedShape<'_>) -> Result<AnalysisResult> {
    let result = match detected {
        DetectedShape::FlatScoring { root, scoring } => decode_flat(root, scoring),
        DetectedShape::PerFramework { root } => decode_per_framework(root),
        DetectedShape::Checklist { root } => decode_checklist(root),
        DetectedShape::ProcessorScores { root, scores } => decode_processor(root, scores),
    };

    if result.has_scores() {
        Ok(result)
    } else {
        Err(AssessmentError::UnrecognizedResponseShape(format!(
            "{} payload carries no numeric scores",
            detected.shape()
        )))
    }
}

fn is_overall_key(key: &str) -> bool {
    OVERALL_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Category scores under `*Score` / `*_score` keys, overall keys excluded.
fn suffixed_scores(scores: &Map<String, Value>) -> Vec<CategoryScore> {
    scores
        .iter()
        .filter(|(key, _)| {
            !is_overall_key(key) && (key.ends_with("Score") || key.ends_with("_score"))
        })
        .filter_map(|(key, value)| {
            score_value(value).map(|score| CategoryScore::new(humanize_key(key), score))
        })
        .collect()
}

/// Explicit overall score, else the mean of the category scores.
fn overall_or_mean(scores: &Map<String, Value>, categories: &[CategoryScore]) -> Option<f64> {
    OVERALL_KEYS
        .iter()
        .find_map(|k| scores.get(*k).and_then(score_value))
        .or_else(|| mean(categories.iter().map(|c| c.score)))
}

/// `{scoring: {overallScore, environmentalScore, ...}, opportunities}`
fn decode_flat(root: &Map<String, Value>, scoring: &Map<String, Value>) -> AnalysisResult {
    let mut result = AnalysisResult::new(ResponseShape::FlatScoring);

    result.category_scores = suffixed_scores(scoring);
    let overall = overall_or_mean(scoring, &result.category_scores);

    result.recommendations = recommendation_list(scoring.get("recommendations"));
    result
        .recommendations
        .extend(recommendation_list(scoring.get("actionItems")));
    result.gaps = text_list(scoring.get("gaps"));
    result.opportunities = opportunity_list(
        root.get("opportunities")
            .or_else(|| scoring.get("opportunities")),
    );
    result.reported_level = first_str(scoring, &["complianceLevel", "compliance_level"])
        .map(str::to_string);
    result.summary = first_str(root, &["summary"])
        .or_else(|| first_str(scoring, &["summary"]))
        .map(str::to_string);

    result.with_overall_score(overall)
}

/// `{NSRF: {scores: {...}}, iESG: {scores: {...}}}`
///
/// The overall score is the unweighted mean of every category score present.
/// Category names are qualified by sub-framework when there is more than one.
fn decode_per_framework(root: &Map<String, Value>) -> AnalysisResult {
    let mut result = AnalysisResult::new(ResponseShape::PerFramework);
    let qualify = sub_frameworks(root).count() > 1;

    for (framework, section, scores) in sub_frameworks(root) {
        for (category, value) in scores {
            if is_overall_key(category) {
                continue;
            }
            let Some(score) = score_value(value) else {
                tracing::debug!("Ignoring non-numeric score {}/{}", framework, category);
                continue;
            };
            let name = if qualify {
                format!("{framework} {}", humanize_key(category))
            } else {
                humanize_key(category)
            };
            result.category_scores.push(CategoryScore::new(name, score));
        }

        result
            .recommendations
            .extend(recommendation_list(section.get("recommendations")));
        for gap in text_list(section.get("gaps")) {
            result.push_gap(gap);
        }
    }

    let overall = mean(result.category_scores.iter().map(|c| c.score));
    result.with_overall_score(overall)
}

/// `{framework, report: {...}, baseline_checklist: {...}, gaps_detected: [...]}`
fn decode_checklist(root: &Map<String, Value>) -> AnalysisResult {
    let mut result = AnalysisResult::new(ResponseShape::Checklist);
    let report = root.get("report").and_then(Value::as_object);

    // Top-level map form first, then the report's list form
    let top_level = root.get("baseline_checklist").and_then(Value::as_object);
    let nested = report
        .and_then(|r| r.get("baseline_checklist"))
        .and_then(Value::as_object);
    result.category_scores = [top_level, nested]
        .into_iter()
        .flatten()
        .map(score_checklist)
        .find(|scores| !scores.is_empty())
        .unwrap_or_default();

    for gap in text_list(root.get("gaps_detected"))
        .into_iter()
        .chain(text_list(report.and_then(|r| r.get("gaps_and_risks"))))
    {
        result.push_gap(gap);
    }

    if let Some(report) = report {
        result.recommendations = recommendation_list(report.get("prioritized_improvements"));
        result.reported_level = report
            .get("header")
            .and_then(Value::as_object)
            .and_then(|h| first_str(h, &["readiness_stage"]))
            .map(str::to_string);
        result.summary = match report.get("executive_summary") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Object(summary)) => {
                first_str(summary, &["summary", "overview", "text"]).map(str::to_string)
            }
            _ => None,
        };
    }

    let overall = mean(result.category_scores.iter().map(|c| c.score));
    result.with_overall_score(overall)
}

/// `{scores: {environmental_score, ..., overall_score, compliance_level},
/// recommendations, opportunities, compliance_gaps}`
fn decode_processor(root: &Map<String, Value>, scores: &Map<String, Value>) -> AnalysisResult {
    let mut result = AnalysisResult::new(ResponseShape::ProcessorScores);

    result.category_scores = suffixed_scores(scores);
    let overall = overall_or_mean(scores, &result.category_scores);

    result.recommendations = recommendation_list(root.get("recommendations"));
    result.opportunities = opportunity_list(root.get("opportunities"));
    for gap in text_list(root.get("compliance_gaps")) {
        result.push_gap(gap);
    }
    result.reported_level =
        first_str(scores, &["compliance_level", "complianceLevel"]).map(str::to_string);
    result.summary = first_str(root, &["summary"]).map(str::to_string);

    result.with_overall_score(overall)
}
