//! Property-based tests for local scoring.
//!
//! Checks the rollup and banding rules across random weights and scores,
//! plus the worked example from the scoring documentation.

use esg_readiness::model::Framework;
use esg_readiness::scoring::{
    combine, rollup, ComplianceBand, ScoringEngine, FINANCING_READY_THRESHOLD,
    PROGRESSING_THRESHOLD,
};
use proptest::prelude::*;

fn score() -> impl Strategy<Value = f64> {
    0.0f64..=100.0
}

fn weight() -> impl Strategy<Value = f64> {
    0.01f64..=10.0
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn rollup_stays_within_item_range(items in prop::collection::vec((score(), weight()), 1..20)) {
        let aggregate = rollup(items.iter().copied()).unwrap();
        let min = items.iter().map(|(s, _)| *s).fold(f64::INFINITY, f64::min);
        let max = items.iter().map(|(s, _)| *s).fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(aggregate >= min - 1e-9, "{} below minimum {}", aggregate, min);
        prop_assert!(aggregate <= max + 1e-9, "{} above maximum {}", aggregate, max);
    }

    #[test]
    fn rollup_is_scale_invariant(
        items in prop::collection::vec((score(), weight()), 1..20),
        factor in 0.1f64..100.0,
    ) {
        let base = rollup(items.iter().copied()).unwrap();
        let scaled = rollup(items.iter().map(|(s, w)| (*s, w * factor))).unwrap();
        prop_assert!((base - scaled).abs() < 1e-6, "{} != {}", base, scaled);
    }

    #[test]
    fn rollup_of_single_item_is_its_score(s in score(), w in weight()) {
        let aggregate = rollup([(s, w)]).unwrap();
        prop_assert!((aggregate - s).abs() < 1e-9);
    }

    #[test]
    fn rollup_ignores_order(mut items in prop::collection::vec((score(), weight()), 1..20)) {
        let forward = rollup(items.iter().copied()).unwrap();
        items.reverse();
        let backward = rollup(items.iter().copied()).unwrap();
        prop_assert!((forward - backward).abs() < 1e-6);
    }

    #[test]
    fn combined_score_is_bounded(rate in -1.0f64..2.0, bonus in -50.0f64..50.0) {
        let s = combine(rate, bonus);
        prop_assert!((0.0..=100.0).contains(&s), "score {} out of range", s);
    }

    #[test]
    fn band_matches_thresholds(s in -10.0f64..110.0) {
        let band = ComplianceBand::from_score(s);
        let expected = if s >= FINANCING_READY_THRESHOLD {
            ComplianceBand::FinancingReady
        } else if s >= PROGRESSING_THRESHOLD {
            ComplianceBand::Progressing
        } else {
            ComplianceBand::NeedsFoundation
        };
        prop_assert_eq!(band, expected);
    }

    #[test]
    fn band_is_monotonic(a in score(), b in score()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(ComplianceBand::from_score(low) <= ComplianceBand::from_score(high));
    }
}

// ============================================================================
// Fixed examples
// ============================================================================

fn three_criteria_framework() -> Framework {
    serde_yaml::from_str(
        r"
id: example
name: Example
categories:
  - id: environmental
    name: Environmental
    weight: 1.0
    criteria:
      - { id: energy, title: Energy, weight: 0.5 }
      - { id: waste, title: Waste, weight: 0.3 }
      - { id: water, title: Water, weight: 0.2 }
",
    )
    .unwrap()
}

#[test]
fn weighted_example_lands_in_progressing() {
    let framework = three_criteria_framework();
    let report = ScoringEngine::new()
        .with_external_scores([("energy", 80.0), ("waste", 60.0), ("water", 40.0)])
        .score_responses(&framework, &[]);

    let overall = report.overall_score.unwrap();
    assert!((overall - 66.0).abs() < 1e-9, "got {overall}");
    assert_eq!(report.band, Some(ComplianceBand::Progressing));
    assert_eq!(report.scored_criteria, 3);
}

#[test]
fn band_boundaries_are_inclusive() {
    assert_eq!(ComplianceBand::from_score(49.999), ComplianceBand::NeedsFoundation);
    assert_eq!(ComplianceBand::from_score(50.0), ComplianceBand::Progressing);
    assert_eq!(ComplianceBand::from_score(74.999), ComplianceBand::Progressing);
    assert_eq!(ComplianceBand::from_score(75.0), ComplianceBand::FinancingReady);
}

#[test]
fn empty_framework_has_no_score() {
    let framework: Framework =
        serde_yaml::from_str("id: empty\nname: Empty\ncategories: []\n").unwrap();
    let report = ScoringEngine::new().score_responses(&framework, &[]);
    assert!(report.overall_score.is_none());
    assert!(report.band.is_none());
    assert!((report.coverage() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn external_scores_are_clamped() {
    let framework = three_criteria_framework();
    let report = ScoringEngine::new()
        .with_external_scores([("energy", 140.0), ("waste", f64::NAN)])
        .score_responses(&framework, &[]);

    let category = report.category("environmental").unwrap();
    assert_eq!(category.criteria[0].score, Some(100.0));
    assert_eq!(category.criteria[1].score, None);
    assert_eq!(report.overall_score, Some(100.0));
}
