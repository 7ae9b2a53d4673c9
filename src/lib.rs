//! **A schema-driven engine for ESG self-assessments and financing-readiness scoring.**
//!
//! `esg-readiness` walks a business through the criteria of an ESG reporting
//! framework, estimates a readiness score locally, converts the collected answers
//! into the request format of an external analysis service, and reconciles the
//! service's (historically unstable) reply into one canonical result.
//!
//! ## Key Features
//!
//! - **Declarative Frameworks**: Frameworks, categories, criteria and typed fields are
//!   data, loaded from YAML or JSON and validated on load. Two frameworks ship built in.
//! - **Stepwise Sessions**: An [`AssessmentSession`] moves one criterion at a time and
//!   refuses to advance until required fields are filled.
//! - **Local Scoring**: Completion-based fallback scores, weighted rollups and readiness
//!   bands (`needs-foundation`, `progressing`, `financing-ready`).
//! - **Request Normalization**: Versioned mapping tables turn `(criterion, field)` pairs
//!   into the nested, typed payload the analysis service expects.
//! - **Tolerant Interpretation**: Every observed response shape (flat scoring,
//!   per-framework, baseline checklist) plus transport envelopes decode into
//!   [`AnalysisResult`]; unusable replies degrade to local scores instead of failing.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: Framework schema, responses and the canonical [`AnalysisResult`].
//! - **[`registry`]**: The read-only [`SchemaRegistry`] of frameworks.
//! - **[`session`]**: The cursor state machine and answer-sheet replay.
//! - **[`scoring`]**: Fallback scores, rollups and [`ComplianceBand`]s.
//! - **[`normalize`]**: Mapping tables and the [`RequestNormalizer`].
//! - **[`interpret`]**: The [`ResponseInterpreter`].
//! - **[`analysis`]**: The [`AnalysisService`] seam and its HTTP client.
//! - **[`pipeline`]**: Submission with fallback and cancellation.
//!
//! ## Getting Started
//!
//! ```
//! use esg_readiness::model::ResponseDraft;
//! use esg_readiness::registry::SchemaRegistry;
//! use esg_readiness::scoring::{ComplianceBand, ScoringEngine};
//! use esg_readiness::session::AssessmentSession;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = SchemaRegistry::builtin()?;
//!     let mut session = AssessmentSession::new(&registry, "iesg")?;
//!
//!     session.advance(
//!         ResponseDraft::new()
//!             .with_field("assessed_suppliers_pct", 40)
//!             .with_field("supplier_code_of_conduct", true),
//!     )?;
//!
//!     let report = ScoringEngine::new().score_session(&session);
//!     assert_eq!(report.scored_criteria, 1);
//!     assert!(report.band >= Some(ComplianceBand::FinancingReady));
//!     Ok(())
//! }
//! ```
//!
//! ### Submitting for Analysis
//!
//! *Note: the HTTP client requires the `analysis` feature (enabled by default).*
//!
//! ```no_run
//! use esg_readiness::analysis::{AnalysisClientConfig, HttpAnalysisService};
//! use esg_readiness::normalize::MappingSet;
//! use esg_readiness::pipeline::{submit, CancellationToken, SubmissionOutcome};
//! use esg_readiness::registry::SchemaRegistry;
//! use esg_readiness::session::AnswerSheet;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = SchemaRegistry::builtin()?;
//!     let session = AnswerSheet::from_path(Path::new("answers.yaml"))?.start_session(&registry)?;
//!     let service = HttpAnalysisService::new(AnalysisClientConfig::default())?;
//!
//!     match submit(&session, &MappingSet::builtin()?, &service, &CancellationToken::new())? {
//!         SubmissionOutcome::Analyzed(result) => println!("Score: {:?}", result.overall_score),
//!         SubmissionOutcome::Fallback { result, reason } => {
//!             println!("{reason} Estimated: {:?}", result.overall_score);
//!         }
//!         SubmissionOutcome::Abandoned => {}
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `analysis` (default): Enables the blocking HTTP client for the analysis service.
//!   This adds the `reqwest` dependency. Without it, submissions report local scores.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Counts and percentages are converted between usize and f64 throughout scoring
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    // Doc completeness: # Errors sections are not written for every fallible fn
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod interpret;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod registry;
pub mod reports;
pub mod scoring;
pub mod session;

// Re-export main types for convenience
pub use analysis::{AnalysisService, NoOpAnalysisService};
#[cfg(feature = "analysis")]
pub use analysis::{AnalysisClientConfig, HttpAnalysisService};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use error::{AssessmentError, EntityKind, ErrorContext, OptionContext, Result};
pub use interpret::{interpret_response, ResponseInterpreter};
pub use model::{
    AnalysisResult, Category, CategoryScore, Criterion, Field, FieldType, FieldValue, Framework,
    Recommendation, Response, ResponseDraft, ResponseShape,
};
pub use normalize::{MappingSet, MappingTable, NormalizedRequest, RequestNormalizer};
pub use pipeline::{submit, CancellationToken, SubmissionOutcome};
pub use registry::SchemaRegistry;
pub use reports::{ReportFormat, ReportGenerator};
pub use scoring::{ComplianceBand, ScoreReport, ScoringEngine};
pub use session::{AnswerSheet, AssessmentSession};
