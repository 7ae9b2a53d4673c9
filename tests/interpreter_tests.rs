//! Response interpreter tests against recorded service payloads.
//!
//! Each fixture under `tests/fixtures/responses` captures one of the reply
//! shapes the analysis service has produced.

use esg_readiness::interpret::{interpret_response, ResponseInterpreter};
use esg_readiness::model::{Priority, ResponseShape};
use esg_readiness::scoring::ComplianceBand;
use std::path::Path;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/responses");

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(Path::new(FIXTURES_DIR).join(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("score should be present");
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Flat scoring
// ============================================================================

mod flat_scoring {
    use super::*;

    #[test]
    fn scores_and_band() {
        let result = interpret_response(&load_fixture("flat_scoring.json"));

        assert_eq!(result.shape, ResponseShape::FlatScoring);
        assert_close(result.overall_score, 68.0);
        // The service's own label is kept but never drives the band
        assert_eq!(result.compliance_level, Some(ComplianceBand::Progressing));
        assert_eq!(result.reported_level.as_deref(), Some("Good"));

        let names: Vec<&str> = result.category_scores.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Environmental", "Social", "Governance"]);
        assert_close(result.category_score("governance"), 58.0);
    }

    #[test]
    fn recommendations_include_action_items() {
        let result = interpret_response(&load_fixture("flat_scoring.json"));

        assert_eq!(result.recommendations.len(), 3);
        let first = &result.recommendations[0];
        assert_eq!(first.title, "Energy Monitoring System");
        assert_eq!(first.priority, Priority::High);
        assert_eq!(first.timeframe.as_deref(), Some("3-6 months"));
        assert_eq!(first.actions.len(), 2);

        let action_item = &result.recommendations[2];
        assert_eq!(action_item.title, "Draft a supplier code of conduct");
        assert_eq!(action_item.priority, Priority::Low);
        assert_eq!(action_item.timeframe.as_deref(), Some("6 months"));
    }

    #[test]
    fn gaps_summary_and_opportunities() {
        let result = interpret_response(&load_fixture("flat_scoring.json"));

        assert_eq!(
            result.gaps,
            vec![
                "Missing carbon footprint tracking".to_string(),
                "No formal sustainability report".to_string(),
            ]
        );
        assert_eq!(
            result.summary.as_deref(),
            Some("Solid foundation with gaps in disclosure.")
        );

        // The untitled entry is skipped
        assert_eq!(result.opportunities.len(), 2);
        let scheme = &result.opportunities[0];
        assert_eq!(scheme.id.as_deref(), Some("grant-001"));
        assert_eq!(scheme.kind.as_deref(), Some("Financing"));
        assert_eq!(scheme.estimated_value.as_deref(), Some("Up to RM 50 million"));
        assert_eq!(scheme.eligibility_match, Some(85.0));
        assert_eq!(scheme.deadline.as_deref(), Some("2026-12-31"));
        assert_eq!(scheme.requirements.len(), 2);
        assert_eq!(result.opportunities[1].title, "ESG Certification Grant");
    }
}

// ============================================================================
// Per-framework scores
// ============================================================================

mod per_framework {
    use super::*;

    #[test]
    fn mean_of_present_scores() {
        let result = interpret_response(&load_fixture("per_framework.json"));

        assert_eq!(result.shape, ResponseShape::PerFramework);
        // 70, 60 and 50; null and the embedded overall are ignored
        assert_close(result.overall_score, 60.0);
        assert_eq!(result.compliance_level, Some(ComplianceBand::Progressing));
        assert_eq!(result.category_scores.len(), 3);
    }

    #[test]
    fn category_names_are_qualified() {
        let result = interpret_response(&load_fixture("per_framework.json"));

        assert_close(result.category_score("NSRF Environmental"), 70.0);
        assert_close(result.category_score("NSRF Social"), 60.0);
        assert_close(result.category_score("iESG Operational Excellence"), 50.0);
        assert!(result.category_score("NSRF Governance").is_none());
    }

    #[test]
    fn gaps_are_deduplicated_across_frameworks() {
        let result = interpret_response(&load_fixture("per_framework.json"));

        assert_eq!(
            result.gaps,
            vec![
                "No board-level ESG oversight".to_string(),
                "Supplier assessment below target".to_string(),
            ]
        );
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].title, "Adopt a formal risk register");
    }
}

// ============================================================================
// Baseline checklist
// ============================================================================

mod checklist {
    use super::*;

    #[test]
    fn weighted_checklist_scores() {
        let result = interpret_response(&load_fixture("checklist.json"));

        assert_eq!(result.shape, ResponseShape::Checklist);
        // (1 + 0 + 0.3) / 3
        assert_close(result.category_score("Environmental"), 43.333);
        assert_close(result.category_score("Governance"), 100.0);
        assert_close(result.overall_score, 71.667);
        assert_eq!(result.compliance_level, Some(ComplianceBand::Progressing));
    }

    #[test]
    fn report_sections_are_read() {
        let result = interpret_response(&load_fixture("checklist.json"));

        assert_eq!(result.reported_level.as_deref(), Some("Developing"));
        assert_eq!(
            result.summary.as_deref(),
            Some("Governance basics are in place.")
        );
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].priority, Priority::High);
        assert_eq!(
            result.gaps,
            vec![
                "No recycling program".to_string(),
                "Water usage is not metered".to_string(),
            ]
        );
    }
}

// ============================================================================
// Processor scores
// ============================================================================

mod processor_scores {
    use super::*;

    #[test]
    fn enveloped_processor_reply_is_decoded() {
        let result = interpret_response(&load_fixture("processor_envelope.json"));

        assert_eq!(result.shape, ResponseShape::ProcessorScores);
        assert_close(result.overall_score, 63.0);
        assert_eq!(result.compliance_level, Some(ComplianceBand::Progressing));
        assert_eq!(result.reported_level.as_deref(), Some("Good"));
        assert_close(result.category_score("Environmental"), 58.0);
        assert_close(result.category_score("Social"), 71.0);
        assert_close(result.category_score("Governance"), 60.0);
    }

    #[test]
    fn gaps_recommendations_and_opportunities() {
        let result = interpret_response(&load_fixture("processor_envelope.json"));

        assert_eq!(
            result.gaps,
            vec![
                "Missing carbon footprint tracking".to_string(),
                "No formal sustainability policy".to_string(),
            ]
        );
        assert_eq!(result.recommendations.len(), 2);
        assert_eq!(result.recommendations[0].priority, Priority::High);
        assert_eq!(result.recommendations[0].actions.len(), 2);
        assert_eq!(result.recommendations[1].priority, Priority::Medium);

        assert_eq!(result.opportunities.len(), 1);
        let scheme = &result.opportunities[0];
        assert_eq!(scheme.title, "Green Technology Financing Scheme");
        assert_eq!(scheme.eligibility_match, Some(72.5));
        assert_eq!(scheme.estimated_value.as_deref(), Some("Up to RM 50 million"));
        assert_eq!(scheme.requirements.len(), 2);
    }
}

// ============================================================================
// Envelopes and failures
// ============================================================================

mod envelopes {
    use super::*;

    #[test]
    fn gateway_envelope_matches_bare_payload() {
        let wrapped = interpret_response(&load_fixture("gateway_envelope.json"));
        let bare = interpret_response(&load_fixture("flat_scoring.json"));
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn envelope_depth_is_bounded() {
        let interpreter = ResponseInterpreter::with_envelope_depth(1);
        // Two envelopes deep: the inner one is left in place and matches no shape
        let result = interpreter.interpret(&load_fixture("gateway_envelope.json"));
        assert_eq!(result.shape, ResponseShape::Unavailable);
        assert_eq!(result.gaps.len(), 1);
    }

    #[test]
    fn failed_envelope_is_unavailable() {
        let result = interpret_response(r#"{"statusCode": 502, "body": "Bad gateway"}"#);
        assert_eq!(result.shape, ResponseShape::Unavailable);
        assert!(result.gaps[0].contains("502"));

        let result = interpret_response(r#"{"success": false, "error": "quota exceeded"}"#);
        assert_eq!(result.shape, ResponseShape::Unavailable);
        assert!(result.gaps[0].contains("quota exceeded"));
    }

    #[test]
    fn failed_processor_envelope_keeps_degraded_data() {
        let body = serde_json::json!({
            "success": false,
            "error": "upstream model error",
            "data": {"scores": {"overall_score": 30}, "compliance_gaps": []}
        })
        .to_string();
        let raw = serde_json::json!({"statusCode": 200, "body": body}).to_string();

        let result = interpret_response(&raw);
        assert_eq!(result.shape, ResponseShape::ProcessorScores);
        assert_close(result.overall_score, 30.0);
        assert_eq!(result.compliance_level, Some(ComplianceBand::NeedsFoundation));
        assert_eq!(result.gaps, vec!["Service reported: upstream model error".to_string()]);
    }

    #[test]
    fn try_interpret_reports_reason() {
        let interpreter = ResponseInterpreter::new();
        assert!(interpreter.try_interpret("").is_err());
        assert!(interpreter.try_interpret("<html>").is_err());
        assert!(interpreter
            .try_interpret(r#"{"scoring": {"complianceLevel": "Good"}}"#)
            .is_err());
        assert!(interpreter
            .try_interpret(&load_fixture("checklist.json"))
            .is_ok());
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        let result = interpret_response(r#"{"scoring": {"overallScore": 180, "socialScore": -5}}"#);
        assert_eq!(result.overall_score, Some(100.0));
        assert_eq!(result.category_score("Social"), Some(0.0));
        assert_eq!(result.compliance_level, Some(ComplianceBand::FinancingReady));
    }
}
