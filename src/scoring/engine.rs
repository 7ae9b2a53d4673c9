//! Scoring engine: criterion scores rolled up into category and framework scores.

use super::band::ComplianceBand;
use super::rollup::rollup;
use crate::model::{Framework, Response};
use crate::session::AssessmentSession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scoring engine version
pub const SCORING_ENGINE_VERSION: &str = "1.0";

/// Where a criterion score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreSource {
    /// Local fallback score assigned at submission
    Fallback,
    /// Score supplied by the external analysis service
    External,
}

/// Score of one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub id: String,
    pub title: String,
    pub weight: f64,
    /// `None` when the criterion has not been answered
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ScoreSource>,
}

/// Rolled-up score of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub id: String,
    pub name: String,
    pub weight: f64,
    /// `None` when no criterion in the category has a score
    pub score: Option<f64>,
    pub band: Option<ComplianceBand>,
    pub criteria: Vec<CriterionScore>,
}

impl CategoryReport {
    /// Criteria without a score.
    pub fn unanswered(&self) -> impl Iterator<Item = &CriterionScore> {
        self.criteria.iter().filter(|c| c.score.is_none())
    }
}

/// Local score report for one framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct ScoreReport {
    pub scoring_engine_version: String,
    pub framework_id: String,
    pub framework_name: String,
    /// `None` when no category has data
    pub overall_score: Option<f64>,
    pub band: Option<ComplianceBand>,
    pub categories: Vec<CategoryReport>,
    /// Criteria with a score
    pub scored_criteria: usize,
    pub total_criteria: usize,
    pub generated_at: DateTime<Utc>,
}

impl ScoreReport {
    /// Share of criteria with a score.
    #[must_use]
    pub fn coverage(&self) -> f64 {
        if self.total_criteria == 0 {
            1.0
        } else {
            self.scored_criteria as f64 / self.total_criteria as f64
        }
    }

    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.id == id)
    }
}

/// Computes fallback-based scores for a session.
///
/// External per-criterion scores, when supplied, take precedence over the
/// fallback score of the matching criterion.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    external_scores: HashMap<String, f64>,
}

impl ScoringEngine {
    /// Create an engine that uses fallback scores only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use externally supplied criterion scores where available.
    ///
    /// Non-finite scores are ignored and the rest are clamped to 0-100.
    #[must_use]
    pub fn with_external_scores<I, K>(mut self, scores: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        for (id, score) in scores {
            let id = id.into();
            if score.is_finite() {
                self.external_scores.insert(id, score.clamp(0.0, 100.0));
            } else {
                tracing::warn!("Ignoring non-finite external score for criterion '{}'", id);
            }
        }
        self
    }

    /// Score the responses collected by a session.
    pub fn score_session(&self, session: &AssessmentSession) -> ScoreReport {
        self.score_responses(session.framework(), session.responses())
    }

    /// Score a set of responses against a framework.
    ///
    /// Responses for criteria not present in the framework are ignored.
    pub fn score_responses(&self, framework: &Framework, responses: &[Response]) -> ScoreReport {
        let by_criterion: HashMap<&str, &Response> = responses
            .iter()
            .map(|r| (r.criterion_id.as_str(), r))
            .collect();

        let mut scored_criteria = 0;
        let categories: Vec<CategoryReport> = framework
            .categories
            .iter()
            .map(|category| {
                let criteria: Vec<CriterionScore> = category
                    .criteria
                    .iter()
                    .map(|criterion| {
                        let (score, source) = self.criterion_score(&criterion.id, &by_criterion);
                        CriterionScore {
                            id: criterion.id.clone(),
                            title: criterion.title.clone(),
                            weight: criterion.weight,
                            score,
                            source,
                        }
                    })
                    .collect();

                scored_criteria += criteria.iter().filter(|c| c.score.is_some()).count();
                let score = rollup(
                    criteria
                        .iter()
                        .filter_map(|c| c.score.map(|s| (s, c.weight))),
                );

                CategoryReport {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    weight: category.weight,
                    score,
                    band: score.map(ComplianceBand::from_score),
                    criteria,
                }
            })
            .collect();

        let overall_score = rollup(
            categories
                .iter()
                .filter_map(|c| c.score.map(|s| (s, c.weight))),
        );

        tracing::debug!(
            "Scored framework '{}': {} of {} criteria, overall {:?}",
            framework.id,
            scored_criteria,
            framework.criterion_count(),
            overall_score
        );

        ScoreReport {
            scoring_engine_version: SCORING_ENGINE_VERSION.to_string(),
            framework_id: framework.id.clone(),
            framework_name: framework.name.clone(),
            overall_score,
            band: overall_score.map(ComplianceBand::from_score),
            categories,
            scored_criteria,
            total_criteria: framework.criterion_count(),
            generated_at: Utc::now(),
        }
    }

    fn criterion_score(
        &self,
        criterion_id: &str,
        responses: &HashMap<&str, &Response>,
    ) -> (Option<f64>, Option<ScoreSource>) {
        if let Some(&score) = self.external_scores.get(criterion_id) {
            return (Some(score), Some(ScoreSource::External));
        }
        match responses.get(criterion_id) {
            Some(r) if r.score.is_finite() => (Some(r.score), Some(ScoreSource::Fallback)),
            _ => (None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldResponses;

    fn framework() -> Framework {
        serde_yaml::from_str(
            r"
id: demo
name: Demo
categories:
  - id: env
    name: Environmental
    weight: 0.6
    criteria:
      - { id: a, title: A, weight: 0.5 }
      - { id: b, title: B, weight: 0.3 }
      - { id: c, title: C, weight: 0.2 }
  - id: gov
    name: Governance
    weight: 0.4
    criteria:
      - { id: d, title: D, weight: 1.0 }
",
        )
        .unwrap()
    }

    fn response(id: &str, score: f64) -> Response {
        Response {
            criterion_id: id.to_string(),
            field_responses: FieldResponses::new(),
            notes: String::new(),
            score,
        }
    }

    #[test]
    fn test_category_rollup() {
        let fw = framework();
        let report = ScoringEngine::new().score_responses(
            &fw,
            &[response("a", 80.0), response("b", 60.0), response("c", 40.0)],
        );
        let env = report.category("env").unwrap();
        assert!((env.score.unwrap() - 66.0).abs() < 1e-9);
        assert_eq!(env.band, Some(ComplianceBand::Progressing));

        // Governance has no data, so the framework score is the environmental score
        assert!(report.category("gov").unwrap().score.is_none());
        assert!((report.overall_score.unwrap() - 66.0).abs() < 1e-9);
        assert_eq!(report.scored_criteria, 3);
        assert_eq!(report.total_criteria, 4);
    }

    #[test]
    fn test_no_responses_is_unscored() {
        let report = ScoringEngine::new().score_responses(&framework(), &[]);
        assert!(report.overall_score.is_none());
        assert!(report.band.is_none());
        assert!(report.coverage().abs() < f64::EPSILON);
    }

    #[test]
    fn test_external_scores_take_precedence() {
        let engine = ScoringEngine::new().with_external_scores([("a", 20.0), ("d", 150.0)]);
        let report = engine.score_responses(&framework(), &[response("a", 80.0)]);
        let a = &report.category("env").unwrap().criteria[0];
        assert_eq!(a.score, Some(20.0));
        assert_eq!(a.source, Some(ScoreSource::External));
        let d = &report.category("gov").unwrap().criteria[0];
        assert_eq!(d.score, Some(100.0));
    }

    #[test]
    fn test_non_finite_external_scores_ignored() {
        let engine = ScoringEngine::new().with_external_scores([("a", f64::NAN)]);
        let report = engine.score_responses(&framework(), &[response("a", 55.0)]);
        let a = &report.category("env").unwrap().criteria[0];
        assert_eq!(a.score, Some(55.0));
        assert_eq!(a.source, Some(ScoreSource::Fallback));
    }

    #[test]
    fn test_overall_weighted_across_categories() {
        let report = ScoringEngine::new()
            .score_responses(&framework(), &[response("a", 100.0), response("d", 50.0)]);
        // 0.6 * 100 + 0.4 * 50
        assert!((report.overall_score.unwrap() - 80.0).abs() < 1e-9);
        assert_eq!(report.band, Some(ComplianceBand::FinancingReady));
    }
}
