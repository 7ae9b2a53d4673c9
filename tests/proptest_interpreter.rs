//! Property-based tests for response interpretation.
//!
//! Ensures the interpreter and answer-sheet loader handle arbitrary input
//! without panicking, and that every interpreted result is well-formed.

use esg_readiness::interpret::interpret_response;
use esg_readiness::model::ResponseShape;
use esg_readiness::scoring::ComplianceBand;
use esg_readiness::session::AnswerSheet;
use proptest::prelude::*;
use serde_json::{json, Value};

/// Arbitrary JSON values of bounded depth.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1.0e6f64..1.0e6).prop_map(|n| json!(n)),
        "\\PC{0,20}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(
                prop_oneof![
                    Just("scoring".to_string()),
                    Just("scores".to_string()),
                    Just("overallScore".to_string()),
                    Just("baseline_checklist".to_string()),
                    Just("report".to_string()),
                    Just("statusCode".to_string()),
                    Just("body".to_string()),
                    Just("success".to_string()),
                    Just("data".to_string()),
                    "[a-zA-Z_]{1,12}",
                ],
                inner,
                0..6,
            )
            .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn assert_well_formed(raw: &str) -> Result<(), TestCaseError> {
    let result = interpret_response(raw);

    if let Some(score) = result.overall_score {
        prop_assert!((0.0..=100.0).contains(&score), "overall {} out of range", score);
        prop_assert_eq!(result.compliance_level, Some(ComplianceBand::from_score(score)));
    } else {
        prop_assert!(result.compliance_level.is_none());
    }
    for category in &result.category_scores {
        prop_assert!((0.0..=100.0).contains(&category.score));
    }
    if result.shape == ResponseShape::Unavailable {
        prop_assert!(result.overall_score.is_none());
        prop_assert!(result.category_scores.is_empty());
        prop_assert_eq!(result.gaps.len(), 1);
    } else {
        prop_assert!(result.has_scores());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn arbitrary_text_never_panics(s in "\\PC{0,500}") {
        assert_well_formed(&s)?;
    }

    #[test]
    fn arbitrary_json_is_well_formed(value in arb_json()) {
        assert_well_formed(&value.to_string())?;
    }

    #[test]
    fn flat_payload_bands_locally(
        overall in -50.0f64..150.0,
        label in "(Excellent|Good|Developing|Poor|[a-z]{0,8})",
    ) {
        let raw = json!({"scoring": {"overallScore": overall, "complianceLevel": label}}).to_string();
        let result = interpret_response(&raw);
        let expected = overall.clamp(0.0, 100.0);
        prop_assert_eq!(result.shape, ResponseShape::FlatScoring);
        prop_assert_eq!(result.compliance_level, Some(ComplianceBand::from_score(expected)));
    }

    #[test]
    fn answer_sheet_parsing_never_panics(s in "\\PC{0,300}") {
        let _ = AnswerSheet::from_yaml_str(&s);
    }
}
