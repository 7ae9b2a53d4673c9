//! Session traversal and answer-sheet replay tests.
//!
//! These tests drive the built-in frameworks through whole assessments and
//! check the local scores that fall out of them.

use esg_readiness::error::{AssessmentError, EntityKind};
use esg_readiness::model::ResponseDraft;
use esg_readiness::registry::SchemaRegistry;
use esg_readiness::scoring::{ComplianceBand, ScoringEngine};
use esg_readiness::session::{AnswerSheet, AssessmentSession, SessionState};
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn registry() -> SchemaRegistry {
    SchemaRegistry::builtin().expect("built-in frameworks should load")
}

fn replay(registry: &SchemaRegistry, name: &str) -> AssessmentSession {
    AnswerSheet::from_path(&fixture_path(name))
        .expect("fixture should parse")
        .start_session(registry)
        .expect("fixture should replay")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Replay
// ============================================================================

mod replay {
    use super::*;

    #[test]
    fn complete_sheet_finishes_session() {
        let registry = registry();
        let session = replay(&registry, "answers/nsrf_complete.yaml");

        assert!(session.is_complete());
        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(session.responses().len(), 10);
        assert_close(session.progress(), 1.0);
        assert!(session.current().is_none());
    }

    #[test]
    fn responses_follow_traversal_order() {
        let registry = registry();
        let session = replay(&registry, "answers/nsrf_complete.yaml");

        let ids: Vec<&str> = session
            .responses()
            .iter()
            .map(|r| r.criterion_id.as_str())
            .collect();
        let expected: Vec<&str> = session
            .framework()
            .criteria()
            .map(|(_, c)| c.id.as_str())
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn fully_answered_criteria_score_99() {
        let registry = registry();
        let session = replay(&registry, "answers/nsrf_complete.yaml");

        for response in session.responses() {
            assert_close(response.score, 99.0);
        }
        let report = ScoringEngine::new().score_session(&session);
        assert_close(report.overall_score.unwrap(), 99.0);
        assert_eq!(report.band, Some(ComplianceBand::FinancingReady));
        assert_eq!(report.scored_criteria, 10);
        assert_close(report.coverage(), 1.0);
    }

    #[test]
    fn required_only_answers_score_80() {
        let registry = registry();
        let session = replay(&registry, "answers/nsrf_required_only.yaml");

        assert!(session.is_complete());
        for response in session.responses() {
            assert_close(response.score, 80.0);
        }
        let report = ScoringEngine::new().score_session(&session);
        assert_close(report.overall_score.unwrap(), 80.0);
        for category in &report.categories {
            assert_close(category.score.unwrap(), 80.0);
        }
    }

    #[test]
    fn partial_sheet_stops_at_first_gap() {
        let registry = registry();
        let session = replay(&registry, "answers/iesg_partial.yaml");

        assert!(!session.is_complete());
        assert_close(session.progress(), 0.5);
        assert_eq!(
            session.current_criterion().map(|c| c.id.as_str()),
            Some("innovation")
        );

        // Required field plus one of two optional inputs (code of conduct, no notes)
        let response = session.response_for("supply-chain").unwrap();
        assert_close(response.score, 89.5);

        let report = ScoringEngine::new().score_session(&session);
        assert_eq!(report.scored_criteria, 1);
        assert_eq!(report.total_criteria, 2);
        assert_close(report.overall_score.unwrap(), 89.5);
    }

    #[test]
    fn unknown_framework_is_not_found() {
        let sheet = AnswerSheet::from_yaml_str("framework: gri\nanswers: []\n").unwrap();
        let err = sheet.start_session(&registry()).unwrap_err();
        assert!(matches!(
            err,
            AssessmentError::NotFound {
                kind: EntityKind::Framework,
                ..
            }
        ));
    }

    #[test]
    fn invalid_answer_propagates_incomplete() {
        let sheet = AnswerSheet::from_yaml_str(
            "framework: iesg\nanswers:\n  - criterion: supply-chain\n    fields:\n      supplier_code_of_conduct: true\n",
        )
        .unwrap();
        let err = sheet.start_session(&registry()).unwrap_err();
        match err {
            AssessmentError::IncompleteResponse { criterion, missing } => {
                assert_eq!(criterion, "supply-chain");
                assert_eq!(missing, vec!["assessed_suppliers_pct".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn json_answer_sheet_is_accepted() {
        let sheet = AnswerSheet::from_yaml_str(
            r#"{"framework": "iesg", "answers": [
                {"criterion": "supply-chain", "fields": {"assessed_suppliers_pct": 10}},
                {"criterion": "innovation", "fields": {"innovation_spend_pct": 2}, "notes": "R&D budget"}
            ]}"#,
        )
        .unwrap();
        let session = sheet.start_session(&registry()).unwrap();
        assert!(session.is_complete());
        // One of two optional inputs filled (notes)
        assert_close(session.response_for("innovation").unwrap().score, 89.5);
    }
}

// ============================================================================
// Navigation
// ============================================================================

mod navigation {
    use super::*;

    #[test]
    fn rejected_response_leaves_session_unchanged() {
        let registry = registry();
        let mut session = AssessmentSession::new(&registry, "nsrf").unwrap();

        let err = session
            .advance(ResponseDraft::new().with_field("monthly_electricity_spend", 1200))
            .unwrap_err();
        assert!(matches!(err, AssessmentError::IncompleteResponse { .. }));
        assert!(err.is_recoverable());
        assert!(err.user_message().contains("tracks_energy_usage"));

        assert!(session.responses().is_empty());
        assert_eq!(
            session.current_criterion().map(|c| c.id.as_str()),
            Some("energy-efficiency")
        );
    }

    #[test]
    fn whitespace_text_does_not_satisfy_required() {
        let registry = registry();
        let mut session = AssessmentSession::new(&registry, "nsrf").unwrap();
        for _ in 0..6 {
            // Skip ahead through answers that are irrelevant here
            let criterion = session.current_criterion().unwrap().clone();
            let mut draft = ResponseDraft::new();
            for field in criterion.required_fields() {
                draft = match field.field_type {
                    esg_readiness::model::FieldType::Boolean => draft.with_field(&field.id, true),
                    esg_readiness::model::FieldType::Number => draft.with_field(&field.id, 1),
                    _ => draft.with_field(&field.id, "answered"),
                };
            }
            session.advance(draft).unwrap();
        }

        assert_eq!(
            session.current_criterion().map(|c| c.id.as_str()),
            Some("community-engagement")
        );
        let err = session
            .advance(ResponseDraft::new().with_field("community_programs", "   "))
            .unwrap_err();
        assert!(matches!(err, AssessmentError::IncompleteResponse { .. }));
    }

    #[test]
    fn retreat_keeps_answers_and_resubmit_replaces() {
        let registry = registry();
        let mut session = AssessmentSession::new(&registry, "iesg").unwrap();

        session
            .advance(ResponseDraft::new().with_field("assessed_suppliers_pct", 40))
            .unwrap();
        session.retreat().unwrap();

        assert_eq!(session.responses().len(), 1);
        assert_close(session.progress(), 0.5);
        assert_eq!(
            session.current_criterion().map(|c| c.id.as_str()),
            Some("supply-chain")
        );

        session
            .advance(
                ResponseDraft::new()
                    .with_field("assessed_suppliers_pct", 60)
                    .with_field("supplier_code_of_conduct", false),
            )
            .unwrap();
        assert_eq!(session.responses().len(), 1);
        assert_close(session.response_for("supply-chain").unwrap().score, 89.5);
    }

    #[test]
    fn boundaries_are_reported() {
        let registry = registry();
        let mut session = AssessmentSession::new(&registry, "iesg").unwrap();

        let err = session.retreat().unwrap_err();
        assert!(matches!(err, AssessmentError::AtStart));
        assert!(err.is_navigation_boundary());

        session
            .advance(ResponseDraft::new().with_field("assessed_suppliers_pct", 40))
            .unwrap();
        session
            .advance(ResponseDraft::new().with_field("innovation_spend_pct", 3))
            .unwrap();
        assert!(session.is_complete());

        let err = session
            .advance(ResponseDraft::new().with_field("innovation_spend_pct", 3))
            .unwrap_err();
        assert!(matches!(err, AssessmentError::SessionComplete));

        // Retreat from complete returns to the last criterion
        session.retreat().unwrap();
        assert_eq!(
            session.current_criterion().map(|c| c.id.as_str()),
            Some("innovation")
        );
        assert_eq!(session.responses().len(), 2);
    }

    #[test]
    fn progress_never_decreases() {
        let registry = registry();
        let mut session = AssessmentSession::new(&registry, "iesg").unwrap();
        let mut last = session.progress();

        let mut check = |session: &AssessmentSession| {
            let progress = session.progress();
            assert!(progress >= last, "progress went from {last} to {progress}");
            last = progress;
        };

        session
            .advance(ResponseDraft::new().with_field("assessed_suppliers_pct", 40))
            .unwrap();
        check(&session);
        session.retreat().unwrap();
        check(&session);
        session
            .advance(ResponseDraft::new().with_field("assessed_suppliers_pct", 50))
            .unwrap();
        check(&session);
        session
            .advance(ResponseDraft::new().with_field("innovation_spend_pct", 1))
            .unwrap();
        check(&session);
        session.retreat().unwrap();
        check(&session);

        assert_close(last, 1.0);
    }
}
