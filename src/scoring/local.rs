//! Conversion of a local score report into the canonical analysis result.

use super::band::{ComplianceBand, FINANCING_READY_THRESHOLD, PROGRESSING_THRESHOLD};
use super::engine::{CategoryReport, ScoreReport};
use crate::model::{AnalysisResult, CategoryScore, Priority, Recommendation, ResponseShape};

impl ScoreReport {
    /// Express this report in the canonical display model.
    ///
    /// Categories with data become category scores. Gaps list categories in the
    /// lowest band and criteria that were never answered. Recommendations target
    /// every category below financing-ready, most urgent first.
    pub fn to_analysis_result(&self) -> AnalysisResult {
        let mut result =
            AnalysisResult::new(ResponseShape::LocalFallback).with_overall_score(self.overall_score);

        result.category_scores = self
            .categories
            .iter()
            .filter_map(|c| c.score.map(|s| CategoryScore::new(c.name.clone(), s)))
            .collect();

        for category in &self.categories {
            if category.band == Some(ComplianceBand::NeedsFoundation) {
                result.push_gap(format!(
                    "{} practices need a foundation (estimated score {:.0})",
                    category.name,
                    category.score.unwrap_or_default()
                ));
            }
            for criterion in category.unanswered() {
                result.push_gap(format!("No information provided for {}", criterion.title));
            }
        }

        result.recommendations = local_recommendations(&self.categories);
        result.summary = Some(format!(
            "Estimated locally from {} of {} answered criteria.",
            self.scored_criteria, self.total_criteria
        ));
        result
    }
}

/// Recommendations for categories below financing-ready.
fn local_recommendations(categories: &[CategoryReport]) -> Vec<Recommendation> {
    let mut scored: Vec<(f64, Recommendation)> = categories
        .iter()
        .filter_map(|category| {
            let score = category.score?;
            if score >= FINANCING_READY_THRESHOLD {
                return None;
            }
            let priority = if score < PROGRESSING_THRESHOLD {
                Priority::High
            } else {
                Priority::Medium
            };
            let weakest: Vec<String> = category
                .criteria
                .iter()
                .filter(|c| c.score.is_some_and(|s| s < FINANCING_READY_THRESHOLD))
                .map(|c| format!("Strengthen evidence for {}", c.title))
                .collect();

            Some((
                score,
                Recommendation {
                    title: format!("Improve {} readiness", category.name),
                    description: format!(
                        "{} is estimated at {:.0}/100; complete outstanding inputs and document current practices.",
                        category.name, score
                    ),
                    priority,
                    timeframe: None,
                    actions: weakest,
                    category: Some(category.name.clone()),
                },
            ))
        })
        .collect();

    // Sort by priority, then lowest score first
    scored.sort_by(|(sa, a), (sb, b)| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| sa.partial_cmp(sb).unwrap_or(std::cmp::Ordering::Equal))
    });

    scored.into_iter().map(|(_, rec)| rec).collect()
}
